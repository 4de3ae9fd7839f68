//! Lattice - Configuration
//!
//! TOML-backed configuration for the back-office services.
//!
//! # Example
//!
//! ```toml
//! [auth]
//! jwt_secret = "your-secret-key-at-least-32-characters-long"
//! token_ttl = "24h"
//!
//! [log]
//! level = "info"
//! format = "console"
//! ```

mod auth;
mod error;
mod logging;

use std::path::Path;

use serde::Deserialize;

pub use auth::AuthConfig;
pub use error::ConfigError;
pub use logging::{LogConfig, LogFormat, LogLevel};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Authentication settings
    pub auth: AuthConfig,

    /// Logging settings
    pub log: LogConfig,
}

impl Config {
    /// Parse configuration from a TOML string and validate it
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(path.display().to_string(), e))?;
        Self::from_toml(&input)
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.validate().map_err(ConfigError::invalid)
    }
}
