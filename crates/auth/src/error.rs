//! Authorization error types

use thiserror::Error;

/// Result type for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while resolving or evaluating a principal
///
/// Every variant is terminal for the request it occurred in; nothing at
/// this layer retries.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer token was presented
    #[error("missing token")]
    MissingToken,

    /// JWT signature verification failed
    #[error("invalid token signature")]
    InvalidSignature,

    /// Token has expired
    #[error("token expired")]
    TokenExpired,

    /// Token is not yet valid (nbf claim)
    #[error("token not yet valid")]
    TokenNotYetValid,

    /// Token claims are malformed or fail validation
    #[error("invalid token claims: {0}")]
    InvalidClaims(String),

    /// Token verified but the identity it names no longer exists
    #[error("principal not found: {0}")]
    PrincipalNotFound(String),

    /// Identity store lookup failed
    #[error("identity store error: {0}")]
    StoreError(String),
}

impl AuthError {
    /// Create a StoreError
    pub fn store_error(message: impl Into<String>) -> Self {
        Self::StoreError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_not_found_message() {
        let err = AuthError::PrincipalNotFound("users/42".to_string());
        assert!(err.to_string().contains("users/42"));
    }

    #[test]
    fn test_store_error_message() {
        let err = AuthError::store_error("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }
}
