mod order_by;
mod where_clause;

pub use order_by::{build_order_by, OrderTerm};
pub use where_clause::{build_where, WherePredicate};
