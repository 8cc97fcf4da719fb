use std::{env, fmt, str::FromStr};

use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown store backend '{0}' (expected 'dynamodb' or 'memory')")]
    UnknownBackend(String),
}

/// Which record store the handlers talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Dynamodb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dynamodb" => Ok(StoreBackend::Dynamodb),
            "memory" | "inmemory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Dynamodb => f.write_str("dynamodb"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Table holding the posts (default: "posts")
    pub table_name: String,
    /// Custom DynamoDB endpoint, e.g. a local DynamoDB container
    pub endpoint_url: Option<String>,
    /// AWS region override (SDK default chain when unset)
    pub region: Option<String>,
    /// Store backend (default: dynamodb)
    pub backend: StoreBackend,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - Table name (default: "posts")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (optional)
    /// - `AWS_REGION` - AWS region (optional)
    /// - `STORE_BACKEND` - "dynamodb" or "memory" (default: "dynamodb")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => StoreBackend::default(),
        };

        Ok(Self {
            table_name: lookup("DYNAMODB_TABLE_NAME")
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "posts".to_string()),
            endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|url| !url.is_empty()),
            region: lookup("AWS_REGION").filter(|region| !region.is_empty()),
            backend,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.table_name, "posts");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.region, None);
        assert_eq!(config.backend, StoreBackend::Dynamodb);
    }

    #[test]
    fn test_values_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("DYNAMODB_TABLE_NAME", "posts-dev"),
            ("AWS_ENDPOINT_URL", "http://localhost:8000"),
            ("AWS_REGION", "eu-west-1"),
            ("STORE_BACKEND", "Memory"),
        ]))
        .unwrap();

        assert_eq!(config.table_name, "posts-dev");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DYNAMODB_TABLE_NAME", ""),
            ("AWS_ENDPOINT_URL", ""),
        ]))
        .unwrap();

        assert_eq!(config.table_name, "posts");
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn test_unknown_backend() {
        let error = Config::from_lookup(lookup_from(&[("STORE_BACKEND", "redis")])).unwrap_err();
        assert_eq!(error, ConfigError::UnknownBackend("redis".to_string()));
    }
}
