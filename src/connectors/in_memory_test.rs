use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::ConnectionParams;
use crate::error::{QueryKitError, Result};
use crate::traits::Connector;
use crate::types::{DatabaseType, RawQueryResult};

/// How a recorded statement reached the connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Query,
    Execute,
}

/// A recorded statement for verification.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub sql: String,
    pub kind: CallKind,
}

#[derive(Default)]
struct State {
    responses: VecDeque<Result<RawQueryResult>>,
    recorded_queries: Vec<RecordedQuery>,
    default_response: RawQueryResult,
}

/// An in-memory connector for testing.
///
/// Clones share the same recorded statements and queued responses, so a test
/// can hand one clone to a driver and inspect the other.
///
/// # Example
/// ```
/// use querykit::connectors::{InMemoryTestConnector, InMemoryTestResponseBuilder};
/// use querykit::Driver;
///
/// let connector = InMemoryTestConnector::new().with_response(
///     InMemoryTestResponseBuilder::new()
///         .columns(&["id", "name"])
///         .row(&["1", "Alice"])
///         .build(),
/// );
/// let mut driver = Driver::with_connector(Box::new(connector.clone()));
/// driver.select("users", ["id", "name"]).unwrap();
/// let rows = driver.get_all().unwrap();
///
/// assert_eq!(rows[0].get("name").unwrap(), Some("Alice"));
/// connector.assert_last_query("SELECT `id`,`name` FROM `users` ");
/// ```
#[derive(Clone)]
pub struct InMemoryTestConnector {
    state: Arc<Mutex<State>>,
    dialect: DatabaseType,
}

impl InMemoryTestConnector {
    /// Create a new connector speaking the SQLite dialect with no queued responses.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            dialect: DatabaseType::Sqlite,
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pretend to be another backend; changes the identifier rewrite the driver applies.
    pub fn with_dialect(mut self, dialect: DatabaseType) -> Self {
        self.dialect = dialect;
        self
    }

    /// Add a response to be returned by the next statement.
    /// Responses are returned in FIFO order.
    pub fn with_response(self, response: RawQueryResult) -> Self {
        self.state().responses.push_back(Ok(response));
        self
    }

    /// Add multiple responses to be returned by subsequent statements.
    pub fn with_responses(self, responses: impl IntoIterator<Item = RawQueryResult>) -> Self {
        self.state()
            .responses
            .extend(responses.into_iter().map(Ok));
        self
    }

    /// Make the next statement fail with `QueryFailed`.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.state()
            .responses
            .push_back(Err(QueryKitError::QueryFailed(message.into())));
        self
    }

    /// Set a default response to use when no queued responses remain.
    pub fn with_default_response(self, response: RawQueryResult) -> Self {
        self.state().default_response = response;
        self
    }

    /// Get all recorded statements that have been run.
    pub fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.state().recorded_queries.clone()
    }

    /// Get the last recorded statement, if any.
    pub fn last_query(&self) -> Option<RecordedQuery> {
        self.state().recorded_queries.last().cloned()
    }

    /// Clear all recorded statements.
    pub fn clear_recorded_queries(&self) {
        self.state().recorded_queries.clear();
    }

    /// Assert that the last statement matches the expected SQL.
    pub fn assert_last_query(&self, expected_sql: &str) {
        let last = self.last_query().expect("No queries were recorded");
        assert_eq!(
            last.sql, expected_sql,
            "SQL mismatch.\nExpected: {}\nActual: {}",
            expected_sql, last.sql
        );
    }

    /// Assert that exactly n statements were run.
    pub fn assert_query_count(&self, expected: usize) {
        let actual = self.state().recorded_queries.len();
        assert_eq!(
            actual, expected,
            "Query count mismatch. Expected: {}, Actual: {}",
            expected, actual
        );
    }

    fn record(&self, sql: &str, kind: CallKind) -> Result<RawQueryResult> {
        let mut state = self.state();
        state.recorded_queries.push(RecordedQuery {
            sql: sql.to_string(),
            kind,
        });

        // Return next queued response or default
        match state.responses.pop_front() {
            Some(response) => response,
            None => Ok(state.default_response.clone()),
        }
    }
}

impl Default for InMemoryTestConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for InMemoryTestConnector {
    fn connect(_params: &ConnectionParams) -> Result<Self> {
        Ok(Self::new())
    }

    fn dialect(&self) -> DatabaseType {
        self.dialect
    }

    fn query(&mut self, sql: &str) -> Result<RawQueryResult> {
        self.record(sql, CallKind::Query)
    }

    fn execute(&mut self, sql: &str) -> Result<u64> {
        Ok(self.record(sql, CallKind::Execute)?.rows_affected)
    }
}

/// Builder for creating test responses easily.
pub struct InMemoryTestResponseBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    rows_affected: u64,
}

impl InMemoryTestResponseBuilder {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            rows_affected: 0,
        }
    }

    /// Set the column names for the response.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add a row of non-NULL values.
    pub fn row(mut self, values: &[&str]) -> Self {
        self.rows
            .push(values.iter().map(|s| Some(s.to_string())).collect());
        self
    }

    /// Add a row where `None` stands for NULL.
    pub fn nullable_row(mut self, values: &[Option<&str>]) -> Self {
        self.rows
            .push(values.iter().map(|v| v.map(str::to_string)).collect());
        self
    }

    /// Set the affected row count reported for write statements.
    pub fn rows_affected(mut self, count: u64) -> Self {
        self.rows_affected = count;
        self
    }

    /// Build the RawQueryResult.
    pub fn build(self) -> RawQueryResult {
        RawQueryResult {
            columns: self.columns,
            rows: self.rows,
            rows_affected: self.rows_affected,
        }
    }
}

impl Default for InMemoryTestResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
