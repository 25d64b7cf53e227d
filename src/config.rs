use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::model::LEGAL_NOTE;

/// Runtime configuration for the import pipeline
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// User-Agent header sent with every fetch
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of redirects followed before the fetch fails
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Advisory text attached to every record
    #[serde(default = "default_legal_note")]
    pub legal_note: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            legal_note: default_legal_note(),
        }
    }
}

// Default value functions
fn default_user_agent() -> String {
    "CleanRecipeConsole/0.3 (personal-use; no-images; contact: console)".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_max_redirects() -> usize {
    10
}

fn default_legal_note() -> String {
    LEGAL_NOTE.to_string()
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// See [`load_config`].
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_IMPORT__ prefix
/// 2. config.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_IMPORT__TIMEOUT_SECS
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_IMPORT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        let config = ImportConfig::default();
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert!(config.user_agent.starts_with("CleanRecipeConsole/"));
        assert_eq!(config.legal_note, LEGAL_NOTE);
    }

    #[test]
    fn test_empty_source_matches_default() {
        let config: ImportConfig = Config::builder()
            .add_source(File::from_str("", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config, ImportConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config: ImportConfig = Config::builder()
            .add_source(File::from_str(
                "timeout_secs = 5\nuser_agent = \"TestAgent/1.0\"",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "TestAgent/1.0");
        assert_eq!(config.max_redirects, 10);
    }

    #[test]
    fn test_load_config_without_file() {
        // No config.toml at the crate root and no RECIPE_IMPORT__* variables
        let config = load_config().unwrap();
        assert_eq!(config, ImportConfig::default());
    }
}
