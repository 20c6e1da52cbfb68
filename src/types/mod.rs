mod kinds;
mod row;
mod sql_value;

pub use kinds::{DatabaseType, OrderDirection, QueryType, WhereType};
pub use row::{QueryResult, RawQueryResult, Row};
pub use sql_value::SqlValue;
