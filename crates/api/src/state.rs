//! Application state for guarded routers

use std::sync::Arc;

use lattice_auth::{IdentityResolver, IdentityStore, JwtAuthority};
use lattice_config::{Config, ConfigError};

/// Trait for app state that can resolve bearer tokens
///
/// Implement this on your app state to enable the [`Guard`](crate::Guard)
/// extractor.
pub trait HasResolver: Send + Sync {
    /// Get the identity resolver
    fn resolver(&self) -> Arc<IdentityResolver>;
}

/// Minimal app state: just the resolver
///
/// Route handlers with richer state can implement [`HasResolver`] on their
/// own state type instead.
#[derive(Debug, Clone)]
pub struct AppState {
    resolver: Arc<IdentityResolver>,
}

impl AppState {
    /// Create state over an existing resolver
    pub fn new(resolver: Arc<IdentityResolver>) -> Self {
        Self { resolver }
    }

    /// Build state from validated configuration and an identity store
    pub fn from_config(
        config: &Config,
        store: Arc<dyn IdentityStore>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let Some(secret) = config.auth.jwt_secret_bytes() else {
            return Err(ConfigError::invalid("auth.jwt_secret is required"));
        };

        let ttl = chrono::Duration::from_std(config.auth.token_ttl)
            .map_err(|e| ConfigError::invalid(format!("auth.token_ttl out of range: {e}")))?;

        let mut authority = JwtAuthority::new(secret).with_ttl(ttl);
        if let Some(issuer) = config.auth.issuer.as_deref() {
            authority = authority.with_issuer(issuer);
        }

        Ok(Self::new(Arc::new(IdentityResolver::new(
            Arc::new(authority),
            store,
        ))))
    }

    /// The identity resolver
    pub fn resolver(&self) -> Arc<IdentityResolver> {
        self.resolver.clone()
    }
}

impl HasResolver for AppState {
    fn resolver(&self) -> Arc<IdentityResolver> {
        self.resolver.clone()
    }
}
