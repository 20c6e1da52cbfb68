use tracing::debug;

use crate::builders::{render, QueryState};
use crate::config::ConnectionParams;
use crate::connectors::{MySqlConnector, PostgresConnector, SqliteConnector};
use crate::error::{QueryKitError, Result};
use crate::traits::{rewrite_for_dialect, Connector};
use crate::types::{
    DatabaseType, OrderDirection, QueryResult, QueryType, RawQueryResult, Row, SqlValue,
    WhereType,
};

/// Main entry point for querykit.
///
/// Holds one backend connection and the statement currently being built.
/// Every builder call returns `Result<&mut Driver>` so calls chain with `?`.
/// A driver is meant for one call chain at a time; it is `Send` but has no
/// internal locking.
///
/// # Example
/// ```ignore
/// let mut db = Driver::connect(
///     DatabaseType::Sqlite,
///     ConnectionParams::new().path("app.db"),
/// )?;
///
/// let rows = db
///     .select("users", ["id", "name"])?
///     .where_("age", ">", 18, None)?
///     .order_by("name", OrderDirection::Asc)?
///     .limit(10)?
///     .get_all()?;
/// ```
pub struct Driver {
    state: QueryState,
    connector: Box<dyn Connector>,
}

impl Driver {
    /// Validate `params` for `kind`, then open a connection.
    ///
    /// Missing fields fail with `RequiredFieldMissing` before any connection
    /// attempt is made.
    pub fn connect(kind: DatabaseType, params: ConnectionParams) -> Result<Self> {
        params.validate(kind)?;

        let connector: Box<dyn Connector> = match kind {
            DatabaseType::MySql => Box::new(MySqlConnector::connect(&params)?),
            DatabaseType::PostgreSql => Box::new(PostgresConnector::connect(&params)?),
            DatabaseType::Sqlite => Box::new(SqliteConnector::connect(&params)?),
        };
        Ok(Self::with_connector(connector))
    }

    /// Create a driver around an already connected backend.
    /// Useful for testing or custom backends.
    pub fn with_connector(connector: Box<dyn Connector>) -> Self {
        Self {
            state: QueryState::new(),
            connector,
        }
    }

    pub fn dialect(&self) -> DatabaseType {
        self.connector.dialect()
    }

    /// The statement being built.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Start a SELECT of `columns` from `table`.
    pub fn select<I, S>(&mut self, table: &str, columns: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.state.select(table, columns)?;
        Ok(self)
    }

    /// Build a complete INSERT of `(column, value)` pairs.
    pub fn insert<I, K, V>(&mut self, table: &str, data: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        self.state.insert(table, data)?;
        Ok(self)
    }

    /// Start an UPDATE setting `(column, value)` pairs. Needs a `where_` call.
    pub fn update<I, K, V>(&mut self, table: &str, data: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        self.state.update(table, data)?;
        Ok(self)
    }

    /// Start a DELETE from `table`. Needs a `where_` call.
    pub fn delete(&mut self, table: &str) -> Result<&mut Self> {
        self.state.delete(table)?;
        Ok(self)
    }

    /// Add a WHERE predicate.
    ///
    /// The first predicate of a statement never carries a join: a `join`
    /// given there is dropped with a warning. Every later predicate is
    /// prefixed by its join, and `None` on a later predicate means `AND`,
    /// so `where_("a", "=", 1, None)?.where_("b", "=", 2, None)?` renders
    /// `WHERE a = '1' AND b = '2' `. Use [`Driver::or_where`] or pass
    /// `Some(WhereType::Or)` for `OR`.
    pub fn where_(
        &mut self,
        column: &str,
        operator: &str,
        value: impl Into<SqlValue>,
        join: Option<WhereType>,
    ) -> Result<&mut Self> {
        self.state.add_where(column, operator, value, join)?;
        Ok(self)
    }

    pub fn and_where(
        &mut self,
        column: &str,
        operator: &str,
        value: impl Into<SqlValue>,
    ) -> Result<&mut Self> {
        self.where_(column, operator, value, Some(WhereType::And))
    }

    pub fn or_where(
        &mut self,
        column: &str,
        operator: &str,
        value: impl Into<SqlValue>,
    ) -> Result<&mut Self> {
        self.where_(column, operator, value, Some(WhereType::Or))
    }

    /// Add an ORDER BY term. SELECT only.
    pub fn order_by(&mut self, column: &str, direction: OrderDirection) -> Result<&mut Self> {
        self.state.add_order_by(column, direction)?;
        Ok(self)
    }

    /// Set the LIMIT, replacing any earlier one. SELECT only; 0 means no limit.
    pub fn limit(&mut self, limit: u64) -> Result<&mut Self> {
        self.state.set_limit(limit)?;
        Ok(self)
    }

    /// Render the current statement without running it.
    ///
    /// Identifiers are returned backtick-quoted even for PostgreSQL; the
    /// dialect rewrite only happens on execution.
    pub fn get_prepared_query(&mut self) -> Result<String> {
        self.prepare()
    }

    /// Render (SELECT, UPDATE, DELETE) and run the current statement.
    ///
    /// SELECTs return rows; writes return an empty result carrying the
    /// affected row count. The statement is kept, so it can be run again
    /// until the next `select`/`insert`/`update`/`delete`.
    pub fn execute(&mut self) -> Result<QueryResult> {
        let sql = self.prepare()?;
        let dialect = self.connector.dialect();
        let sql = rewrite_for_dialect(&sql, dialect);
        debug!(%dialect, sql = %sql, "executing statement");

        let raw = match self.state.query_type() {
            Some(QueryType::Select) => self.connector.query(&sql)?,
            _ => RawQueryResult::affected(self.connector.execute(&sql)?),
        };
        Ok(QueryResult::from_raw(raw))
    }

    /// Run the statement and return every row.
    pub fn get_all(&mut self) -> Result<Vec<Row>> {
        Ok(self.execute()?.rows())
    }

    /// Run the statement and return the first row, if any.
    pub fn get_row(&mut self) -> Result<Option<Row>> {
        Ok(self.execute()?.first_row())
    }

    /// Run the statement and return the first column of the first row.
    /// `None` for an empty result or a NULL value.
    pub fn get_value(&mut self) -> Result<Option<String>> {
        Ok(self.execute()?.first_value())
    }

    fn prepare(&mut self) -> Result<String> {
        if self
            .state
            .query_type()
            .is_some_and(QueryType::accepts_where)
        {
            self.state.prepared = Some(render(&self.state)?);
        }
        self.state.prepared.clone().ok_or_else(|| {
            QueryKitError::SequenceBroken("no prepared statement to execute".to_string())
        })
    }
}
