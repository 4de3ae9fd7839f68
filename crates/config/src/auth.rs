//! Authentication configuration

use std::time::Duration;

use serde::Deserialize;

/// Authentication configuration
///
/// # Example
///
/// ```toml
/// [auth]
/// jwt_secret = "your-secret-key-at-least-32-characters-long"
/// token_ttl = "24h"
/// issuer = "lattice"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT secret for signing and verifying tokens
    /// Must be at least 32 characters
    pub jwt_secret: Option<String>,

    /// Access token lifetime
    /// Default: 24 hours
    #[serde(with = "humantime_serde")]
    pub token_ttl: Duration,

    /// Issuer claim to stamp and require on tokens
    /// Default: none (issuer not checked)
    pub issuer: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl: Duration::from_secs(24 * 60 * 60),
            issuer: None,
        }
    }
}

impl AuthConfig {
    /// The secret as bytes, if configured
    pub fn jwt_secret_bytes(&self) -> Option<&[u8]> {
        self.jwt_secret.as_ref().map(|s| s.as_bytes())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let Some(secret) = self.jwt_secret.as_ref() else {
            return Err("auth.jwt_secret is required".to_string());
        };
        if secret.len() < 32 {
            return Err("auth.jwt_secret must be at least 32 characters".to_string());
        }
        if self.token_ttl.is_zero() {
            return Err("auth.token_ttl must be non-zero".to_string());
        }
        Ok(())
    }
}
