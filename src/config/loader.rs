use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::PipelineConfig;

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

impl PipelineConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/userflow/pipeline.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("userflow").join("pipeline.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `PipelineConfig::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(PipelineConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: PipelineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Every buffer must hold at least one item.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let buffers = [
            ("intent_buffer", self.intent_buffer),
            ("event_buffer", self.event_buffer),
            ("change_buffer", self.change_buffer),
        ];

        for (name, size) in buffers {
            if size == 0 {
                return Err(ConfigError::ValidationError {
                    message: format!("'{}' must be greater than zero", name),
                });
            }
        }

        Ok(())
    }
}
