use crate::config::ConnectionParams;
use crate::error::Result;
use crate::types::{DatabaseType, RawQueryResult};

/// Trait for database backend implementations.
/// Connectors are responsible for:
/// - Opening the connection described by validated [`ConnectionParams`]
/// - Running raw SQL text and converting rows to [`RawQueryResult`]
///
/// A connector is owned by exactly one driver and is never shared.
pub trait Connector: Send {
    /// Open a connection. Failures are reported as `ConnectionFailed`.
    fn connect(params: &ConnectionParams) -> Result<Self>
    where
        Self: Sized;

    /// The SQL dialect this connector speaks.
    fn dialect(&self) -> DatabaseType;

    /// Run a row-returning statement.
    fn query(&mut self, sql: &str) -> Result<RawQueryResult>;

    /// Run a statement without a result set and return the affected row count.
    fn execute(&mut self, sql: &str) -> Result<u64>;
}

/// Applies the identifier rewrite `dialect` needs to backtick-quoted SQL.
///
/// Backticks inside single-quoted literals are left untouched.
pub fn rewrite_for_dialect(sql: &str, dialect: DatabaseType) -> String {
    match dialect {
        DatabaseType::PostgreSql => {
            let mut in_literal = false;
            sql.chars()
                .map(|c| match c {
                    '\'' => {
                        in_literal = !in_literal;
                        c
                    }
                    '`' if !in_literal => '"',
                    _ => c,
                })
                .collect()
        }
        DatabaseType::MySql | DatabaseType::Sqlite => sql.to_string(),
    }
}
