use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/a2ui-runtime/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("a2ui-runtime").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The origin base URL is http(s)
    /// - Every timeout is non-zero
    /// - The backoff base does not exceed the backoff cap
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.origin.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Origin base_url '{}' must start with http:// or https://",
                    self.origin.base_url
                ),
            });
        }

        let stream = &self.stream;
        let timeouts = [
            ("connect_timeout_seconds", stream.connect_timeout_seconds),
            ("request_timeout_seconds", stream.request_timeout_seconds),
            ("idle_timeout_seconds", stream.idle_timeout_seconds),
            ("report_timeout_seconds", stream.report_timeout_seconds),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ValidationError {
                message: format!("stream.{} must be greater than zero", name),
            });
        }

        if stream.retry_backoff_base_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "stream.retry_backoff_base_ms must be greater than zero".to_string(),
            });
        }
        if stream.retry_backoff_base_ms > stream.retry_backoff_max_ms {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "stream.retry_backoff_base_ms ({}) exceeds retry_backoff_max_ms ({})",
                    stream.retry_backoff_base_ms, stream.retry_backoff_max_ms
                ),
            });
        }

        Ok(())
    }
}
