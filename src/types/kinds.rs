use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryKitError;

/// Kind of statement currently held by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
}

impl QueryType {
    /// Statement kinds that accept WHERE predicates.
    pub fn accepts_where(self) -> bool {
        matches!(self, QueryType::Select | QueryType::Update | QueryType::Delete)
    }
}

/// Logical operator placed before every WHERE predicate after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhereType {
    And,
    Or,
}

impl fmt::Display for WhereType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            WhereType::And => "AND",
            WhereType::Or => "OR",
        };
        write!(f, "{}", keyword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        };
        write!(f, "{}", keyword)
    }
}

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    #[serde(alias = "mariadb")]
    MySql,
    #[serde(alias = "postgres", alias = "pg")]
    PostgreSql,
    #[serde(alias = "sqlite3")]
    Sqlite,
}

impl DatabaseType {
    /// Connection fields that must be present for this backend.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            DatabaseType::MySql | DatabaseType::PostgreSql => {
                &["host", "port", "user", "password", "database"]
            }
            DatabaseType::Sqlite => &["path"],
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatabaseType::MySql => "mysql",
            DatabaseType::PostgreSql => "postgresql",
            DatabaseType::Sqlite => "sqlite",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for DatabaseType {
    type Err = QueryKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(DatabaseType::MySql),
            "postgresql" | "postgres" | "pg" => Ok(DatabaseType::PostgreSql),
            "sqlite" | "sqlite3" => Ok(DatabaseType::Sqlite),
            _ => Err(QueryKitError::InvalidParameter {
                field: "kind".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
