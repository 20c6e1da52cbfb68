use tracing::warn;

use crate::clauses::{OrderTerm, WherePredicate};
use crate::error::{QueryKitError, Result};
use crate::types::{OrderDirection, QueryType, SqlValue, WhereType};

/// Wraps an identifier in backticks. The `*` wildcard is left bare.
pub(crate) fn quote_ident(name: &str) -> String {
    if name == "*" {
        name.to_string()
    } else {
        format!("`{}`", name)
    }
}

/// Collects `(column, value)` pairs and rejects an empty data set or table.
fn collect_data<I, K, V>(table: &str, data: I) -> Result<Vec<(String, SqlValue)>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<SqlValue>,
{
    let data: Vec<(String, SqlValue)> = data
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    if data.is_empty() {
        return Err(QueryKitError::RequiredFieldMissing(
            "data set cannot be empty".to_string(),
        ));
    }
    if table.is_empty() {
        return Err(QueryKitError::RequiredFieldMissing(
            "table name".to_string(),
        ));
    }
    Ok(data)
}

/// Mutable state of the statement being built.
///
/// `query_type` and `base_clause` are only ever set together by one of the
/// four entry points, each of which clears everything else first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub(crate) query_type: Option<QueryType>,
    pub(crate) base_clause: String,
    pub(crate) predicates: Vec<WherePredicate>,
    pub(crate) order_terms: Vec<OrderTerm>,
    pub(crate) limit: u64,
    pub(crate) prepared: Option<String>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every field back to its empty value.
    pub fn reset(&mut self) {
        self.query_type = None;
        self.base_clause.clear();
        self.predicates.clear();
        self.order_terms.clear();
        self.limit = 0;
        self.prepared = None;
    }

    pub fn query_type(&self) -> Option<QueryType> {
        self.query_type
    }

    pub fn base_clause(&self) -> &str {
        &self.base_clause
    }

    pub fn predicates(&self) -> &[WherePredicate] {
        &self.predicates
    }

    pub fn order_terms(&self) -> &[OrderTerm] {
        &self.order_terms
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Text of the last render, or the finished INSERT statement.
    pub fn prepared(&self) -> Option<&str> {
        self.prepared.as_deref()
    }

    /// Starts a SELECT: `SELECT `a`,`b` FROM `table` `.
    pub fn select<I, S>(&mut self, table: &str, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|c| quote_ident(c.as_ref()))
            .collect();
        if table.is_empty() {
            return Err(QueryKitError::RequiredFieldMissing(
                "table name".to_string(),
            ));
        }
        if columns.is_empty() {
            return Err(QueryKitError::RequiredFieldMissing(
                "column list cannot be empty".to_string(),
            ));
        }

        self.reset();
        self.query_type = Some(QueryType::Select);
        self.base_clause = format!(
            "SELECT {} FROM {} ",
            columns.join(","),
            quote_ident(table)
        );
        Ok(())
    }

    /// Builds a complete INSERT statement. Nothing can be chained after it.
    pub fn insert<I, K, V>(&mut self, table: &str, data: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        let data = collect_data(table, data)?;

        self.reset();
        self.query_type = Some(QueryType::Insert);

        let (columns, values): (Vec<String>, Vec<String>) = data
            .into_iter()
            .map(|(column, value)| (column, value.to_literal()))
            .unzip();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(table),
            columns.join(", "),
            values.join(", ")
        );
        self.base_clause = sql.clone();
        self.prepared = Some(sql);
        Ok(())
    }

    /// Starts an UPDATE. A WHERE predicate is required before rendering.
    pub fn update<I, K, V>(&mut self, table: &str, data: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        let data = collect_data(table, data)?;

        self.reset();
        self.query_type = Some(QueryType::Update);

        let set: Vec<String> = data
            .iter()
            .map(|(column, value)| format!("{} = {}", column, value.to_literal()))
            .collect();
        self.base_clause = format!("UPDATE {} SET {}", quote_ident(table), set.join(", "));
        Ok(())
    }

    /// Starts a DELETE. A WHERE predicate is required before rendering.
    pub fn delete(&mut self, table: &str) -> Result<()> {
        if table.is_empty() {
            return Err(QueryKitError::RequiredFieldMissing(
                "table name".to_string(),
            ));
        }

        self.reset();
        self.query_type = Some(QueryType::Delete);
        self.base_clause = format!("DELETE FROM {} ", quote_ident(table));
        Ok(())
    }

    /// Appends a WHERE predicate.
    ///
    /// The join of the first predicate is dropped. Later predicates default to
    /// `AND` when no join is given.
    pub fn add_where(
        &mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<SqlValue>,
        join: Option<WhereType>,
    ) -> Result<()> {
        let accepts_where = self.query_type.is_some_and(QueryType::accepts_where);
        if self.base_clause.is_empty() || !accepts_where {
            return Err(QueryKitError::SequenceBroken(
                "call select, update or delete before where".to_string(),
            ));
        }

        let join = if self.predicates.is_empty() {
            if let Some(dropped) = join {
                warn!(join = %dropped, "ignoring join type on first predicate");
            }
            None
        } else {
            Some(join.unwrap_or(WhereType::And))
        };

        self.predicates
            .push(WherePredicate::new(column, operator, value, join));
        self.prepared = None;
        Ok(())
    }

    /// Appends an ORDER BY term. Only valid for SELECT.
    pub fn add_order_by(
        &mut self,
        column: impl Into<String>,
        direction: OrderDirection,
    ) -> Result<()> {
        self.ensure_select("order_by")?;
        self.order_terms.push(OrderTerm::new(column, direction));
        self.prepared = None;
        Ok(())
    }

    /// Sets the LIMIT, replacing any previous value. Only valid for SELECT.
    pub fn set_limit(&mut self, limit: u64) -> Result<()> {
        self.ensure_select("limit")?;
        self.limit = limit;
        self.prepared = None;
        Ok(())
    }

    fn ensure_select(&self, call: &str) -> Result<()> {
        if self.base_clause.is_empty() || self.query_type != Some(QueryType::Select) {
            return Err(QueryKitError::SequenceBroken(format!(
                "call select before {}",
                call
            )));
        }
        Ok(())
    }
}
