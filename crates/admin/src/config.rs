//! Desk configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MATCHBOOK_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `MATCHBOOK_DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `MATCHBOOK_LOG_FORMAT` - `text` or `json` (default: text)
//!
//! A `.env` file in the working directory is honored.

use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Desk configuration.
///
/// `Debug` is derived; `SecretString` redacts the connection string.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Log output format
    pub log_format: LogFormat,
}

impl DeskConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("MATCHBOOK_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .filter(|url| !url.trim().is_empty())
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("MATCHBOOK_DATABASE_URL".to_string()))?;

        let max_connections = match lookup("MATCHBOOK_DB_MAX_CONNECTIONS") {
            Some(raw) => parse_max_connections(&raw)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let log_format = log_format_from(&lookup)?;

        Ok(Self {
            database_url,
            max_connections,
            log_format,
        })
    }
}

/// Read `MATCHBOOK_LOG_FORMAT` without requiring the rest of the config.
///
/// Logging is set up before the database settings are needed, so commands
/// that never touch the database still get the right format.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for an unknown format.
pub fn log_format_from(lookup: &impl Fn(&str) -> Option<String>) -> Result<LogFormat, ConfigError> {
    lookup("MATCHBOOK_LOG_FORMAT").map_or(Ok(LogFormat::default()), |raw| {
        raw.parse()
            .map_err(|e| ConfigError::InvalidEnvVar("MATCHBOOK_LOG_FORMAT".to_string(), e))
    })
}

fn parse_max_connections(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("MATCHBOOK_DB_MAX_CONNECTIONS".to_string(), reason)
    };
    let value = raw.trim().parse::<u32>().map_err(|e| invalid(e.to_string()))?;
    if value == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            DeskConfig::from_lookup(env(&[("MATCHBOOK_DATABASE_URL", "postgres://localhost/mb")]))
                .unwrap();
        assert_eq!(config.database_url.expose_secret(), "postgres://localhost/mb");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_database_url_fallback() {
        let config =
            DeskConfig::from_lookup(env(&[("DATABASE_URL", "postgres://fallback/mb")])).unwrap();
        assert_eq!(config.database_url.expose_secret(), "postgres://fallback/mb");
    }

    #[test]
    fn test_missing_database_url() {
        let err = DeskConfig::from_lookup(env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_invalid_values() {
        let err = DeskConfig::from_lookup(env(&[
            ("MATCHBOOK_DATABASE_URL", "postgres://localhost/mb"),
            ("MATCHBOOK_DB_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));

        let err = DeskConfig::from_lookup(env(&[
            ("MATCHBOOK_DATABASE_URL", "postgres://localhost/mb"),
            ("MATCHBOOK_LOG_FORMAT", "xml"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_json_format() {
        let config = DeskConfig::from_lookup(env(&[
            ("MATCHBOOK_DATABASE_URL", "postgres://localhost/mb"),
            ("MATCHBOOK_LOG_FORMAT", "JSON"),
            ("MATCHBOOK_DB_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn test_debug_redacts_url() {
        let config =
            DeskConfig::from_lookup(env(&[("MATCHBOOK_DATABASE_URL", "postgres://u:hunter2@db/mb")]))
                .unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
