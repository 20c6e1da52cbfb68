mod in_memory_test;
mod mysql;
mod postgres;
mod sqlite;

pub use self::in_memory_test::{
    CallKind, InMemoryTestConnector, InMemoryTestResponseBuilder, RecordedQuery,
};
pub use self::mysql::MySqlConnector;
pub use self::postgres::PostgresConnector;
pub use self::sqlite::SqliteConnector;
