//! querykit - A fluent SQL query builder with MySQL, PostgreSQL and SQLite backends
//!
//! Statements are assembled through chained calls on a [`Driver`], rendered
//! to SQL text and handed to a backend [`Connector`].
//!
//! Values are interpolated into the statement as quoted literals without
//! escaping or parameter binding. Never build statements from untrusted input.
//!
//! # Example
//! ```ignore
//! use querykit::{ConnectionParams, DatabaseType, Driver, OrderDirection, WhereType};
//!
//! let mut db = Driver::connect(
//!     DatabaseType::MySql,
//!     ConnectionParams::new()
//!         .host("localhost")
//!         .port(3306)
//!         .user("app")
//!         .password("secret")
//!         .database("shop"),
//! )?;
//!
//! db.insert("users", [("name", "Ada"), ("age", "36")])?.execute()?;
//!
//! let rows = db
//!     .select("users", ["id", "name"])?
//!     .where_("age", ">", 18, None)?
//!     .where_("name", "LIKE", "A%", Some(WhereType::Or))?
//!     .order_by("name", OrderDirection::Asc)?
//!     .limit(10)?
//!     .get_all()?;
//!
//! let name = rows[0].get("name")?;
//! ```

pub mod builders;
pub mod clauses;
pub mod config;
pub mod connectors;
pub mod error;
pub mod traits;
pub mod types;

mod driver;

// Re-export main types for convenient access
pub use builders::QueryState;
pub use config::ConnectionParams;
pub use driver::Driver;
pub use error::{QueryKitError, Result};
pub use traits::Connector;
pub use types::{
    DatabaseType, OrderDirection, QueryResult, QueryType, RawQueryResult, Row, SqlValue,
    WhereType,
};
