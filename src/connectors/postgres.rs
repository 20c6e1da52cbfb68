use tokio::runtime::{Builder, Runtime};
use tokio_postgres::{Client, Config, NoTls, SimpleQueryMessage, SimpleQueryRow};
use tracing::{error, info};

use crate::config::ConnectionParams;
use crate::error::{QueryKitError, Result};
use crate::traits::Connector;
use crate::types::{DatabaseType, RawQueryResult};

/// PostgreSQL connector using tokio-postgres.
///
/// Owns a current-thread runtime; every call blocks on it.
pub struct PostgresConnector {
    runtime: Runtime,
    client: Client,
}

impl Connector for PostgresConnector {
    fn connect(params: &ConnectionParams) -> Result<Self> {
        let host = params.required("host")?;
        let mut config = Config::new();
        config
            .host(&host)
            .port(params.port_number()?)
            .user(&params.required("user")?)
            .password(params.required("password")?)
            .dbname(&params.required("database")?);

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| QueryKitError::ConnectionFailed(e.to_string()))?;

        let (client, connection) = runtime
            .block_on(config.connect(NoTls))
            .map_err(|e| QueryKitError::ConnectionFailed(e.to_string()))?;

        // Driven whenever the runtime is blocked on a query
        runtime.spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "PostgreSQL connection error");
            }
        });

        info!(host = %host, "connected to PostgreSQL");
        Ok(Self { runtime, client })
    }

    fn dialect(&self) -> DatabaseType {
        DatabaseType::PostgreSql
    }

    fn query(&mut self, sql: &str) -> Result<RawQueryResult> {
        let messages = self
            .runtime
            .block_on(self.client.simple_query(sql))
            .map_err(|e| QueryKitError::QueryFailed(e.to_string()))?;

        let mut result = RawQueryResult::empty();
        for message in messages {
            match message {
                SimpleQueryMessage::Row(row) => {
                    if result.columns.is_empty() {
                        result.columns = row
                            .columns()
                            .iter()
                            .map(|c| c.name().to_string())
                            .collect();
                    }
                    result.rows.push(row_values(&row));
                }
                SimpleQueryMessage::CommandComplete(count) => result.rows_affected = count,
                _ => {}
            }
        }
        Ok(result)
    }

    fn execute(&mut self, sql: &str) -> Result<u64> {
        Ok(self.query(sql)?.rows_affected)
    }
}

/// Text values of a row; the simple query protocol returns every column as text.
fn row_values(row: &SimpleQueryRow) -> Vec<Option<String>> {
    (0..row.len())
        .map(|i| row.get(i).map(str::to_string))
        .collect()
}
