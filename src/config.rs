//! Configuration management for Stockroom
//!
//! This module handles loading, parsing, and validating configuration
//! from a YAML file with serde-provided defaults.

use crate::error::{Result, StockroomError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Stockroom
///
/// Holds everything the client needs to talk to the backend: the origin
/// it lives at and how long to wait for any single request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the backend (scheme, host, port). Request paths are
    /// joined onto this, so it should not carry a path of its own.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. Applies to every outbound call,
    /// including the token refresh exchange, so a hung refresh endpoint
    /// fails the request instead of wedging all concurrent callers.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    ///
    /// A missing file is not an error: the built-in defaults are returned
    /// so the CLI works out of the box against a local backend.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Io`] if the file exists but cannot be
    /// read, or [`StockroomError::Yaml`] if it is not valid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(StockroomError::Io)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(StockroomError::Yaml)?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::Config`] if the base URL does not parse
    /// or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.api.base_url)
            .map_err(|e| StockroomError::Config(format!("invalid api.base_url: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StockroomError::Config(format!(
                "api.base_url must be http or https, got '{}'",
                parsed.scheme()
            ))
            .into());
        }
        if self.api.timeout_seconds == 0 {
            return Err(
                StockroomError::Config("api.timeout_seconds must be greater than 0".into()).into(),
            );
        }
        Ok(())
    }
}
