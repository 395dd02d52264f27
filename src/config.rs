//! Configuration loading and management.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Registry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Registry identity.
    pub registry: RegistryConfig,
    /// Database configuration.
    pub database: Option<DatabaseConfig>,
}

/// Registry identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Registry name (e.g., "registry.example.org").
    pub name: String,
    /// Display label used for items whose record carries none.
    #[serde(default = "default_item_type")]
    pub default_item_type: String,
}

fn default_item_type() -> String {
    "bike".to_string()
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file, or ":memory:".
    pub path: String,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config: Config = toml::from_str(
            r#"
            [registry]
            name = "registry.test"

            [database]
            path = ":memory:"
            "#,
        )
        .unwrap();
        assert_eq!(config.registry.name, "registry.test");
        assert_eq!(config.registry.default_item_type, "bike");
        assert_eq!(config.database.unwrap().path, ":memory:");
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [registry]
            name = "registry.test"
            "#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.registry.name, "registry.test");

        assert!(matches!(
            Config::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn item_type_override() {
        let config: Config = toml::from_str(
            r#"
            [registry]
            name = "registry.test"
            default_item_type = "scooter"
            "#,
        )
        .unwrap();
        assert_eq!(config.registry.default_item_type, "scooter");
        assert!(config.database.is_none());
    }
}
