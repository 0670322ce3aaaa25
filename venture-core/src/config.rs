//! Configuration management.
//!
//! Provides configuration loading from TOML files with support for
//! multiple file locations and sensible defaults.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the configuration file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the configuration file as TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        /// Path to the configuration file that could not be parsed.
        path: PathBuf,
        /// The underlying TOML parse error.
        source: toml::de::Error,
    },
}

/// Application configuration loaded from a TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Database URL for the context store. When unset, the store
    /// falls back to its default location under the user's config
    /// directory.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Provider assigned to newly created teammates.
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Model version assigned to newly created teammates.
    #[serde(default = "default_model")]
    pub default_model: String,
}

fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_model() -> String {
    "claude-sonnet-4.5".to_string()
}

impl Config {
    /// Load configuration from the file system.
    ///
    /// Priority order:
    /// 1. `VENTURE_CONFIG` environment variable
    /// 2. `./config.toml` (local directory)
    /// 3. `~/.config/venture/config.toml` (user config)
    ///
    /// Returns the default config if no config file is found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if a found file cannot be read.
    /// Returns [`ConfigError::ParseError`] if a found file is not valid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("VENTURE_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                return Self::load_from(p);
            }
        }

        let local = PathBuf::from("config.toml");
        if local.exists() {
            return Self::load_from(local);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config/venture/config.toml");
            if user_config.exists() {
                return Self::load_from(user_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read.
    /// Returns [`ConfigError::ParseError`] if the file is not valid TOML.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            default_provider: default_provider(),
            default_model: default_model(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database_url, None);
        assert_eq!(config.default_provider, "anthropic");
        assert_eq!(config.default_model, "claude-sonnet-4.5");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml = r#"default_provider = "openai""#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.default_model, "claude-sonnet-4.5"); // default
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
database_url = "sqlite:/tmp/venture.db"
default_provider = "google"
default_model = "gemini-3.0"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.database_url,
            Some("sqlite:/tmp/venture.db".to_string())
        );
        assert_eq!(config.default_provider, "google");
        assert_eq!(config.default_model, "gemini-3.0");
    }

    #[test]
    fn test_parse_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_path() {
        use std::io::Write;
        let dir = std::env::temp_dir();
        let path = dir.join("venture_test_config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"default_provider = "chatgpt""#).unwrap();
        drop(file);

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_provider, "chatgpt");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_parse_invalid_toml() {
        use std::io::Write;
        let dir = std::env::temp_dir();
        let path = dir.join("venture_invalid_config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"invalid = ["#).unwrap();
        drop(file);

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let result = Config::load_from("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
