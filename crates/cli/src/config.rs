//! CLI configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a config file, used when `--config` is absent
pub const CONFIG_ENV: &str = "TRAFFICLEDGER_CONFIG";

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Which `RecordStore` backs the ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    /// Process-local, gone when the command exits
    Memory,
}

/// Root configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Directory holding the database file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub backend: Backend,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_database_file() -> String {
    "ledger.db".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_file: default_database_file(),
            log_level: default_log_level(),
            backend: Backend::default(),
        }
    }
}

impl LedgerConfig {
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }
}

/// Reads and validates `LedgerConfig` from TOML
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<LedgerConfig, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from string
    pub fn load_str(content: &str) -> Result<LedgerConfig, ConfigError> {
        let config: LedgerConfig = toml::from_str(content)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Explicit path first, then `TRAFFICLEDGER_CONFIG`, then defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<LedgerConfig, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load_file(PathBuf::from(path)),
            _ => Ok(LedgerConfig::default()),
        }
    }

    fn validate(config: &LedgerConfig) -> Result<(), ConfigError> {
        if config.backend == Backend::Sqlite && config.database_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "database_file cannot be empty with the sqlite backend".to_string(),
            ));
        }
        if config.log_level.trim().is_empty() {
            return Err(ConfigError::Validation("log_level cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.database_path(), PathBuf::from("./data").join("ledger.db"));
    }

    #[test]
    fn test_load_string() {
        let config = ConfigLoader::load_str(
            r#"
data_dir = "/var/lib/trafficledger"
database_file = "records.db"
log_level = "debug"
backend = "memory"
"#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/trafficledger"));
        assert_eq!(config.database_file, "records.db");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.backend, Backend::Memory);
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        let result = ConfigLoader::load_str(r#"backend = "postgres""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_empty_database_file() {
        let result = ConfigLoader::load_str(r#"database_file = """#);
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let config = ConfigLoader::load_str("database_file = \"\"\nbackend = \"memory\"").unwrap();
        assert_eq!(config.backend, Backend::Memory);
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::load_file("/nonexistent/trafficledger.toml");
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ledger.toml");
        std::fs::write(&path, "log_level = \"trace\"").unwrap();

        let config = ConfigLoader::resolve(Some(path.as_path())).unwrap();
        assert_eq!(config.log_level, "trace");
    }
}
