use crate::builders::QueryState;
use crate::clauses::{build_order_by, build_where};
use crate::error::{QueryKitError, Result};
use crate::types::QueryType;

/// Builds the SQL text for the current statement.
///
/// Every segment ends with a single space, so they concatenate without
/// doubled or missing separators.
pub fn render(state: &QueryState) -> Result<String> {
    let query_type = match state.query_type {
        Some(query_type) if !state.base_clause.is_empty() => query_type,
        _ => {
            return Err(QueryKitError::SequenceBroken(
                "no statement has been started".to_string(),
            ))
        }
    };

    match query_type {
        QueryType::Insert => state.prepared.clone().ok_or_else(|| {
            QueryKitError::SequenceBroken("INSERT statement was not prepared".to_string())
        }),
        QueryType::Select => {
            let mut sql = String::with_capacity(256);
            sql.push_str(&state.base_clause);
            sql.push_str(&build_where(&state.predicates));
            sql.push_str(&build_order_by(&state.order_terms));
            if state.limit > 0 {
                sql.push_str(&format!("LIMIT {} ", state.limit));
            }
            Ok(sql)
        }
        QueryType::Update | QueryType::Delete => {
            if state.predicates.is_empty() {
                return Err(QueryKitError::SequenceBroken(
                    "WHERE is mandatory for UPDATE and DELETE".to_string(),
                ));
            }
            let mut sql = state.base_clause.clone();
            if !sql.ends_with(' ') {
                sql.push(' ');
            }
            sql.push_str(&build_where(&state.predicates));
            Ok(sql)
        }
    }
}
