//! Token signing and verification
//!
//! `JwtAuthority` owns the server secret and is the only component that
//! touches raw JWTs: the login route uses it to mint tokens, the resolver
//! uses it to verify them. HMAC-SHA256 throughout.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use tracing::debug;

use crate::claims::{OriginTable, TokenClaims};
use crate::error::{AuthError, Result};

/// Default token lifetime: 24 hours
const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

/// HS256 token authority
///
/// # Example
///
/// ```
/// use lattice_auth::JwtAuthority;
///
/// let authority = JwtAuthority::new(b"your-secret-key-at-least-32-bytes!");
/// ```
pub struct JwtAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
    ttl: Duration,
}

impl std::fmt::Debug for JwtAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthority")
            .field("algorithm", &"HS256")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtAuthority {
    /// Create an authority with an HMAC-SHA256 secret
    ///
    /// # Arguments
    ///
    /// * `secret` - Secret key for HMAC-SHA256 (should be at least 32 bytes)
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // Claims presence is checked by deserialization, not by the library
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: None,
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
        }
    }

    /// Require and stamp an `iss` claim
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();
        self.validation.set_issuer(&[&issuer]);
        self.issuer = Some(issuer);
        self
    }

    /// Override the token lifetime
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Mint a signed token for an identity
    ///
    /// The token pins the origin table and subject id; role and grants are
    /// deliberately absent so they are re-read from the store per request.
    pub fn issue(&self, origin: OriginTable, subject_id: &str) -> Result<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            subject: subject_id.to_string(),
            origin,
            expires_at: (now + self.ttl).timestamp(),
            issued_at: now.timestamp(),
            issuer: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidClaims(e.to_string()))
    }

    /// Verify signature and timing, returning the claims
    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("token verification failed: {:?}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        AuthError::TokenNotYetValid
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::InvalidSignature
                    }
                    _ => AuthError::InvalidClaims(e.to_string()),
                }
            })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TEST_SECRET, token_with_options};

    #[test]
    fn test_issue_and_verify() {
        let authority = JwtAuthority::new(TEST_SECRET);
        let token = authority.issue(OriginTable::Users, "U1").unwrap();

        let claims = authority.verify(&token).unwrap();
        assert_eq!(claims.subject, "U1");
        assert_eq!(claims.origin, OriginTable::Users);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_empty_token() {
        let authority = JwtAuthority::new(TEST_SECRET);
        assert!(matches!(authority.verify(""), Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_garbage_token() {
        let authority = JwtAuthority::new(TEST_SECRET);
        let result = authority.verify("not-a-jwt");
        assert!(matches!(result, Err(AuthError::InvalidClaims(_))));
    }

    #[test]
    fn test_wrong_secret() {
        let authority = JwtAuthority::new(TEST_SECRET);
        let other = b"a-completely-different-secret-key!!!";
        let token = token_with_options(
            OriginTable::Users,
            "U1",
            other,
            Duration::hours(1),
            None,
        );

        let result = authority.verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_expired_token() {
        let authority = JwtAuthority::new(TEST_SECRET);
        let token = token_with_options(
            OriginTable::Users,
            "U1",
            TEST_SECRET,
            Duration::hours(-1),
            None,
        );

        let result = authority.verify(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_issuer_pinning() {
        let authority = JwtAuthority::new(TEST_SECRET).with_issuer("lattice");
        let token = authority.issue(OriginTable::AdminUsers, "A1").unwrap();
        assert!(authority.verify(&token).is_ok());

        let stranger = token_with_options(
            OriginTable::AdminUsers,
            "A1",
            TEST_SECRET,
            Duration::hours(1),
            Some("someone-else"),
        );
        assert!(matches!(
            authority.verify(&stranger),
            Err(AuthError::InvalidClaims(_))
        ));
    }

    #[test]
    fn test_ttl_override() {
        let authority = JwtAuthority::new(TEST_SECRET).with_ttl(Duration::minutes(5));
        let token = authority.issue(OriginTable::Users, "U1").unwrap();
        let claims = authority.verify(&token).unwrap();
        assert!(claims.expires_at - claims.issued_at <= 5 * 60);
    }
}
