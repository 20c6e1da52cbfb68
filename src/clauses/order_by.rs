use crate::types::OrderDirection;

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTerm {
    pub column: String,
    pub direction: OrderDirection,
}

impl OrderTerm {
    pub fn new(column: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn build_sql(&self) -> String {
        format!("{} {}", self.column, self.direction)
    }
}

/// Renders `ORDER BY a ASC, b DESC ` or nothing when `terms` is empty.
pub fn build_order_by(terms: &[OrderTerm]) -> String {
    if terms.is_empty() {
        return String::new();
    }
    let list: Vec<String> = terms.iter().map(OrderTerm::build_sql).collect();
    format!("ORDER BY {} ", list.join(", "))
}
