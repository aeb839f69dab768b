//! Process configuration read from the environment.

use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_MONGODB_DB: &str = "todoman";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_db: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            mongodb_db: DEFAULT_MONGODB_DB.to_string(),
        }
    }
}

impl Config {
    /// Read `PORT`, `MONGODB_URI` and `MONGODB_DB`, falling back to defaults
    /// for unset or empty variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        Ok(Self {
            port,
            mongodb_uri: var("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            mongodb_db: var("MONGODB_DB").unwrap_or(defaults.mongodb_db),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]).unwrap(), Config::default());
        assert_eq!(Config::default().port, 3000);
        assert_eq!(Config::default().mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(Config::default().mongodb_db, "todoman");
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        assert_eq!(config(&[("PORT", ""), ("MONGODB_DB", "")]).unwrap(), Config::default());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config(&[
            ("PORT", "8080"),
            ("MONGODB_URI", "mongodb://db:27017"),
            ("MONGODB_DB", "todoman-test"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.mongodb_uri, "mongodb://db:27017");
        assert_eq!(cfg.mongodb_db, "todoman-test");
    }

    #[test]
    fn rejects_bad_port() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref raw) if raw == "http"));
        assert!(config(&[("PORT", "70000")]).is_err());
    }
}
