//! Application configuration

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_with::serde_as;

use crate::errors::TrackerError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub database: Option<DatabaseConfig>,
}

/// Tracking service endpoint
#[serde_as]
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout; no timeout when unset
    #[serde_as(as = "Option<serde_with::DurationSeconds<u64>>")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config/default"))
    }

    /// Load from an optional file, overridden by `VESSELTRACKER__*` variables
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("VESSELTRACKER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), TrackerError> {
        self.validate_base_url()?;
        self.validate_timeout()?;
        Ok(())
    }

    fn validate_base_url(&self) -> Result<(), TrackerError> {
        if self.base_url.trim().is_empty() {
            return Err(TrackerError::ConfigurationError {
                message: "API base URL cannot be empty".to_string(),
            });
        }
        reqwest::Url::parse(&self.base_url).map_err(|e| TrackerError::ConfigurationError {
            message: format!("Invalid API base URL {}: {}", self.base_url, e),
        })?;
        Ok(())
    }

    fn validate_timeout(&self) -> Result<(), TrackerError> {
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(TrackerError::ConfigurationError {
                message: "Timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
