use crate::error::{QueryKitError, Result};

/// Driver-agnostic raw result from a database call.
/// All values are converted to text by the connector; `None` is SQL NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQueryResult {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row is a vector of values in column order
    pub rows: Vec<Vec<Option<String>>>,
    /// Rows changed by a write statement
    pub rows_affected: u64,
}

impl RawQueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            columns,
            rows,
            rows_affected: 0,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Result of a statement that returns no rows.
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            ..Self::default()
        }
    }
}

/// A single row result from a query.
/// Values are kept in column order and accessed by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Option<String>>,
}

impl Row {
    /// Creates a new Row from column names and values.
    pub(crate) fn new(columns: &[String], values: Vec<Option<String>>) -> Self {
        Self {
            columns: columns.to_vec(),
            values,
        }
    }

    /// Gets a value by column name. `Ok(None)` means the column holds NULL.
    pub fn get(&self, column: &str) -> Result<Option<&str>> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values.get(i).and_then(|v| v.as_deref()))
            .ok_or_else(|| QueryKitError::ColumnNotFound(column.to_string()))
    }

    /// Gets a value by position.
    pub fn get_index(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    /// Returns all column names in this row.
    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(|s| s.as_str()).collect()
    }

    /// Iterates over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.columns
            .iter()
            .zip(self.values.iter())
            .map(|(c, v)| (c.as_str(), v.as_deref()))
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of a statement execution: zero or more rows for a SELECT, an
/// affected-row count for writes.
#[derive(Debug)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Row>,
    rows_affected: u64,
}

impl QueryResult {
    /// Creates a QueryResult from a RawQueryResult.
    pub fn from_raw(raw: RawQueryResult) -> Self {
        let rows = raw
            .rows
            .into_iter()
            .map(|values| Row::new(&raw.columns, values))
            .collect();
        Self {
            columns: raw.columns,
            rows,
            rows_affected: raw.rows_affected,
        }
    }

    /// Returns the first row, if any.
    pub fn first_row(self) -> Option<Row> {
        self.rows.into_iter().next()
    }

    /// Returns the first column of the first row.
    /// `None` when there are no rows or the value is NULL.
    pub fn first_value(&self) -> Option<String> {
        self.rows
            .first()
            .and_then(|row| row.get_index(0))
            .map(str::to_string)
    }

    /// Returns all rows from the result.
    pub fn rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns a reference to the rows without consuming the result.
    pub fn rows_ref(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the column names from this result.
    ///
    /// Backends differ when there are no rows: SQLite still reports the
    /// selected columns, while MySQL and PostgreSQL take the names from the
    /// first row and so return an empty list.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows changed by an INSERT, UPDATE or DELETE.
    pub fn rows_affected(&self) -> u64 {
        self.rows_affected
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
