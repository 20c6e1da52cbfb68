use thiserror::Error;

/// Error type for querykit operations
#[derive(Debug, Error)]
pub enum QueryKitError {
    #[error("Required field missing: {0}")]
    RequiredFieldMissing(String),

    #[error("Invalid value for `{field}`: {value}")]
    InvalidParameter { field: String, value: String },

    #[error("Query sequence broken: {0}")]
    SequenceBroken(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// Result type alias for querykit operations
pub type Result<T> = std::result::Result<T, QueryKitError>;
