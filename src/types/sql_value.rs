use std::fmt;

/// Represents a SQL value in a driver-agnostic way.
///
/// Values are rendered straight into the statement text (see the `Display`
/// impl), so every backend receives the same literal.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Int32(i32),
    Int64(i64),
    Float(f64),
    Bool(bool),
}

impl SqlValue {
    /// Renders the value as a single-quoted literal.
    ///
    /// No escaping is performed: a quote inside a text value ends the literal.
    /// Never pass untrusted input through here.
    pub fn to_literal(&self) -> String {
        format!("'{}'", self)
    }
}

/// Raw text of the value, without quotes. `Null` renders as an empty string
/// and booleans as `1`/`0`.
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => Ok(()),
            SqlValue::Text(s) => f.write_str(s),
            SqlValue::Int32(i) => write!(f, "{}", i),
            SqlValue::Int64(i) => write!(f, "{}", i),
            SqlValue::Float(v) => write!(f, "{}", v),
            SqlValue::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&String> for SqlValue {
    fn from(value: &String) -> Self {
        SqlValue::Text(value.clone())
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int32(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int64(value)
    }
}

impl From<u32> for SqlValue {
    fn from(value: u32) -> Self {
        SqlValue::Int64(i64::from(value))
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_rendering() {
        assert_eq!(SqlValue::from("abc").to_literal(), "'abc'");
        assert_eq!(SqlValue::from(5).to_literal(), "'5'");
        assert_eq!(SqlValue::from(-7i64).to_literal(), "'-7'");
        assert_eq!(SqlValue::from(1.5).to_literal(), "'1.5'");
        assert_eq!(SqlValue::from(true).to_literal(), "'1'");
        assert_eq!(SqlValue::from(false).to_literal(), "'0'");
        assert_eq!(SqlValue::from(None::<i32>).to_literal(), "''");
    }

    #[test]
    fn test_literal_is_not_escaped() {
        let value = SqlValue::from("O'Brien");
        assert_eq!(value.to_literal(), "'O'Brien'");
    }
}
