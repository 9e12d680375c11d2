//! Loading configuration files

use crate::Config;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or schema error
    #[cfg(feature = "toml")]
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax or schema error
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension names no supported format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Reads [`Config`] from strings or files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a config file, picking the format from its extension
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), ?format, "loading config");
        Self::parse_str(&contents, format)
    }

    /// Parse config text in the given format
    pub fn parse_str(contents: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        match format {
            ConfigFormat::Toml => Self::from_toml_str(contents),
            ConfigFormat::Json => Self::from_json_str(contents),
        }
    }

    /// Parse TOML config text
    #[cfg(feature = "toml")]
    pub fn from_toml_str(contents: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Parse TOML config text
    #[cfg(not(feature = "toml"))]
    pub fn from_toml_str(_contents: &str) -> Result<Config, ConfigError> {
        Err(ConfigError::UnsupportedFormat("toml".to_string()))
    }

    /// Parse JSON config text
    pub fn from_json_str(contents: &str) -> Result<Config, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }
}
