use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::error::{QueryKitError, Result};
use crate::types::DatabaseType;

const DEFAULT_CHARSET: &str = "UTF8";

/// Connection settings for one backend.
///
/// Build it from key/value pairs, from the environment, or deserialize it
/// from a config file, then call [`ConnectionParams::validate`] (the driver
/// factory does this before connecting).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionParams {
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub charset: Option<String>,
    pub path: Option<PathBuf>,
}

impl ConnectionParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds params from named fields. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            params.set(key.as_ref(), value.into());
        }
        params
    }

    /// Reads `<PREFIX>_HOST`, `<PREFIX>_PORT`, `<PREFIX>_USER`,
    /// `<PREFIX>_PASSWORD`, `<PREFIX>_DATABASE`, `<PREFIX>_CHARSET` and
    /// `<PREFIX>_PATH`, loading a `.env` file first if one exists.
    pub fn from_env(prefix: &str) -> Self {
        dotenv::dotenv().ok();
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(prefix, &vars)
    }

    fn from_vars(prefix: &str, vars: &HashMap<String, String>) -> Self {
        let mut params = Self::default();
        for key in ["host", "port", "user", "password", "database", "charset", "path"] {
            let name = format!("{}_{}", prefix, key.to_ascii_uppercase());
            if let Some(value) = vars.get(&name) {
                params.set(key, value.clone());
            }
        }
        params
    }

    fn set(&mut self, key: &str, value: String) {
        match key {
            "host" => self.host = Some(value),
            "port" => self.port = Some(value),
            "user" => self.user = Some(value),
            "password" | "pass" => self.password = Some(value),
            "database" | "dbname" => self.database = Some(value),
            "charset" => self.charset = Some(value),
            "path" => self.path = Some(PathBuf::from(value)),
            other => debug!(key = other, "ignoring unknown connection parameter"),
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port.to_string());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "host" => self.host.clone(),
            "port" => self.port.clone(),
            "user" => self.user.clone(),
            "password" => self.password.clone(),
            "database" => self.database.clone(),
            "charset" => self.charset.clone(),
            "path" => self.path.as_ref().map(|p| p.to_string_lossy().into_owned()),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }

    /// Checks that every field `kind` needs is present and usable.
    pub fn validate(&self, kind: DatabaseType) -> Result<()> {
        let missing: Vec<&str> = kind
            .required_fields()
            .iter()
            .copied()
            .filter(|name| self.field(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(QueryKitError::RequiredFieldMissing(format!(
                "{} connection requires {}",
                kind,
                missing.join(", ")
            )));
        }
        if kind != DatabaseType::Sqlite {
            self.port_number()?;
        }
        Ok(())
    }

    /// Port as a number. Fails when it is absent or not a valid port.
    pub fn port_number(&self) -> Result<u16> {
        let port = self
            .field("port")
            .ok_or_else(|| QueryKitError::RequiredFieldMissing("port".to_string()))?;
        port.parse().map_err(|_| QueryKitError::InvalidParameter {
            field: "port".to_string(),
            value: port,
        })
    }

    /// Charset for MySQL connections, `UTF8` when unset.
    pub fn charset_or_default(&self) -> &str {
        self.charset
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CHARSET)
    }

    pub(crate) fn required(&self, name: &str) -> Result<String> {
        self.field(name)
            .ok_or_else(|| QueryKitError::RequiredFieldMissing(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_params() -> ConnectionParams {
        ConnectionParams::new()
            .host("localhost")
            .port(3306)
            .user("root")
            .password("secret")
            .database("app")
    }

    #[test]
    fn test_server_params_validate() {
        let params = server_params();
        assert!(params.validate(DatabaseType::MySql).is_ok());
        assert!(params.validate(DatabaseType::PostgreSql).is_ok());
        assert_eq!(params.port_number().unwrap(), 3306);
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let params = ConnectionParams::new().host("localhost").port(5432);
        let err = params.validate(DatabaseType::PostgreSql).unwrap_err();
        match err {
            QueryKitError::RequiredFieldMissing(msg) => {
                assert!(msg.contains("user"));
                assert!(msg.contains("password"));
                assert!(msg.contains("database"));
                assert!(!msg.contains("host"));
            }
            other => panic!("Expected RequiredFieldMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let params = server_params().password("");
        assert!(matches!(
            params.validate(DatabaseType::MySql),
            Err(QueryKitError::RequiredFieldMissing(_))
        ));
    }

    #[test]
    fn test_invalid_port() {
        let params = ConnectionParams::from_pairs([
            ("host", "localhost"),
            ("port", "not-a-port"),
            ("user", "root"),
            ("password", "secret"),
            ("database", "app"),
        ]);
        assert!(matches!(
            params.validate(DatabaseType::MySql),
            Err(QueryKitError::InvalidParameter { field, .. }) if field == "port"
        ));
    }

    #[test]
    fn test_sqlite_requires_path_only() {
        assert!(ConnectionParams::new()
            .path(":memory:")
            .validate(DatabaseType::Sqlite)
            .is_ok());
        assert!(matches!(
            server_params().validate(DatabaseType::Sqlite),
            Err(QueryKitError::RequiredFieldMissing(_))
        ));
    }

    #[test]
    fn test_from_pairs_aliases_and_charset() {
        let params = ConnectionParams::from_pairs([("pass", "pw"), ("dbname", "db"), ("x", "y")]);
        assert_eq!(params.password.as_deref(), Some("pw"));
        assert_eq!(params.database.as_deref(), Some("db"));
        assert_eq!(params.charset_or_default(), "UTF8");
        assert_eq!(params.charset("latin1").charset_or_default(), "latin1");
    }

    #[test]
    fn test_from_vars() {
        let vars: HashMap<String, String> = [
            ("QK_HOST", "db.internal"),
            ("QK_PORT", "5432"),
            ("QK_PATH", "/tmp/app.db"),
            ("OTHER_HOST", "ignored"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let params = ConnectionParams::from_vars("QK", &vars);
        assert_eq!(params.host.as_deref(), Some("db.internal"));
        assert_eq!(params.port_number().unwrap(), 5432);
        assert_eq!(params.path, Some(PathBuf::from("/tmp/app.db")));
        assert_eq!(params.user, None);
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("QKENVTEST_HOST", "env.internal");
        std::env::set_var("QKENVTEST_PORT", "3307");
        std::env::set_var("QKENVTEST_DATABASE", "app");

        let params = ConnectionParams::from_env("QKENVTEST");
        assert_eq!(params.host.as_deref(), Some("env.internal"));
        assert_eq!(params.port_number().unwrap(), 3307);
        assert_eq!(params.database.as_deref(), Some("app"));
        assert_eq!(params.path, None);
    }

    #[test]
    fn test_deserialize() {
        let params: ConnectionParams =
            serde_json::from_str(r#"{"host": "h", "port": "1", "path": "a.db"}"#).unwrap();
        assert_eq!(params.host.as_deref(), Some("h"));
        assert_eq!(params.path, Some(PathBuf::from("a.db")));
        assert_eq!(params.database, None);
    }
}
