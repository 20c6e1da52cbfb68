use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column as _, Connection as _, Row as _};
use tokio::runtime::{Builder, Runtime};
use tracing::info;

use crate::config::ConnectionParams;
use crate::error::{QueryKitError, Result};
use crate::traits::Connector;
use crate::types::{DatabaseType, RawQueryResult};

/// MySQL connector using sqlx.
///
/// Statements go through the text protocol (`raw_sql`), so every value
/// arrives as text regardless of its column type.
pub struct MySqlConnector {
    runtime: Runtime,
    conn: MySqlConnection,
}

impl Connector for MySqlConnector {
    fn connect(params: &ConnectionParams) -> Result<Self> {
        let host = params.required("host")?;
        let options = MySqlConnectOptions::new()
            .host(&host)
            .port(params.port_number()?)
            .username(&params.required("user")?)
            .password(&params.required("password")?)
            .database(&params.required("database")?)
            .charset(&params.charset_or_default().to_ascii_lowercase());

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| QueryKitError::ConnectionFailed(e.to_string()))?;

        let conn = runtime
            .block_on(MySqlConnection::connect_with(&options))
            .map_err(|e| QueryKitError::ConnectionFailed(e.to_string()))?;

        info!(host = %host, "connected to MySQL");
        Ok(Self { runtime, conn })
    }

    fn dialect(&self) -> DatabaseType {
        DatabaseType::MySql
    }

    fn query(&mut self, sql: &str) -> Result<RawQueryResult> {
        let rows = self
            .runtime
            .block_on(sqlx::raw_sql(sql).fetch_all(&mut self.conn))
            .map_err(|e| QueryKitError::QueryFailed(e.to_string()))?;

        let columns: Vec<String> = rows
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        let rows = rows.iter().map(row_values).collect::<Result<Vec<_>>>()?;
        Ok(RawQueryResult::new(columns, rows))
    }

    fn execute(&mut self, sql: &str) -> Result<u64> {
        let done = self
            .runtime
            .block_on(sqlx::raw_sql(sql).execute(&mut self.conn))
            .map_err(|e| QueryKitError::QueryFailed(e.to_string()))?;
        Ok(done.rows_affected())
    }
}

fn row_values(row: &MySqlRow) -> Result<Vec<Option<String>>> {
    (0..row.len())
        .map(|i| {
            // Text protocol: the raw bytes are the textual value
            row.try_get_unchecked::<Option<&[u8]>, _>(i)
                .map(|v| v.map(|bytes| String::from_utf8_lossy(bytes).into_owned()))
                .map_err(|e| QueryKitError::QueryFailed(e.to_string()))
        })
        .collect()
}
