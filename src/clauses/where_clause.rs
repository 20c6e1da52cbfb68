use crate::types::{SqlValue, WhereType};

/// A single WHERE condition: `column operator 'value'`.
///
/// `join` is `None` only for the first predicate of a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct WherePredicate {
    pub column: String,
    pub operator: String,
    pub value: SqlValue,
    pub join: Option<WhereType>,
}

impl WherePredicate {
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<SqlValue>,
        join: Option<WhereType>,
    ) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
            join,
        }
    }

    /// Renders the predicate with a trailing space, prefixed by its join keyword
    /// when it has one.
    pub fn build_sql(&self) -> String {
        let condition = format!(
            "{} {} {} ",
            self.column,
            self.operator,
            self.value.to_literal()
        );
        match self.join {
            Some(join) => format!("{} {}", join, condition),
            None => condition,
        }
    }
}

/// Renders the full `WHERE ...` segment, or an empty string when there are no
/// predicates.
pub fn build_where(predicates: &[WherePredicate]) -> String {
    if predicates.is_empty() {
        return String::new();
    }
    let mut sql = String::from("WHERE ");
    for predicate in predicates {
        sql.push_str(&predicate.build_sql());
    }
    sql
}
