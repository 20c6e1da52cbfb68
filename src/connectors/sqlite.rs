use rusqlite::types::ValueRef;
use rusqlite::Connection;
use tracing::info;

use crate::config::ConnectionParams;
use crate::error::{QueryKitError, Result};
use crate::traits::Connector;
use crate::types::{DatabaseType, RawQueryResult};

/// SQLite connector using rusqlite. `:memory:` opens a private in-memory database.
pub struct SqliteConnector {
    conn: Connection,
}

impl Connector for SqliteConnector {
    fn connect(params: &ConnectionParams) -> Result<Self> {
        let path = params
            .path
            .as_ref()
            .ok_or_else(|| QueryKitError::RequiredFieldMissing("path".to_string()))?;
        let conn =
            Connection::open(path).map_err(|e| QueryKitError::ConnectionFailed(e.to_string()))?;

        info!(path = %path.display(), "opened SQLite database");
        Ok(Self { conn })
    }

    fn dialect(&self) -> DatabaseType {
        DatabaseType::Sqlite
    }

    fn query(&mut self, sql: &str) -> Result<RawQueryResult> {
        let mut stmt = self.conn.prepare(sql).map_err(query_failed)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let count = columns.len();

        let mut rows = stmt.query([]).map_err(query_failed)?;
        let mut values = Vec::new();
        while let Some(row) = rows.next().map_err(query_failed)? {
            let mut row_values = Vec::with_capacity(count);
            for i in 0..count {
                row_values.push(value_to_string(row.get_ref(i).map_err(query_failed)?));
            }
            values.push(row_values);
        }

        Ok(RawQueryResult::new(columns, values))
    }

    fn execute(&mut self, sql: &str) -> Result<u64> {
        let changed = self.conn.execute(sql, []).map_err(query_failed)?;
        Ok(changed as u64)
    }
}

fn query_failed(e: rusqlite::Error) -> QueryKitError {
    QueryKitError::QueryFailed(e.to_string())
}

fn value_to_string(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
