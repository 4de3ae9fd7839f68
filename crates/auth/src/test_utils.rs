//! Test utilities for minting signed tokens
//!
//! These helpers produce real signed JWTs so tests exercise the actual
//! verification path instead of mocking it.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::claims::{OriginTable, TokenClaims};

/// Test secret for JWT signing (32 bytes for HS256)
pub const TEST_SECRET: &[u8] = b"test-secret-key-32-bytes-long!!!";

/// Mint a token with full control over secret, lifetime and issuer
///
/// A negative `expires_in` produces an already-expired token.
pub fn token_with_options(
    origin: OriginTable,
    subject_id: &str,
    secret: &[u8],
    expires_in: Duration,
    issuer: Option<&str>,
) -> String {
    let now = Utc::now();
    let claims = TokenClaims {
        subject: subject_id.to_string(),
        origin,
        expires_at: (now + expires_in).timestamp(),
        issued_at: now.timestamp(),
        issuer: issuer.map(String::from),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .expect("failed to encode test JWT")
}

/// Token for an `admin_users`-origin identity, signed with [`TEST_SECRET`]
pub fn admin_token(subject_id: &str) -> String {
    token_with_options(
        OriginTable::AdminUsers,
        subject_id,
        TEST_SECRET,
        Duration::hours(1),
        None,
    )
}

/// Token for a `users`-origin identity, signed with [`TEST_SECRET`]
pub fn member_token(subject_id: &str) -> String {
    token_with_options(
        OriginTable::Users,
        subject_id,
        TEST_SECRET,
        Duration::hours(1),
        None,
    )
}

/// An already-expired `users`-origin token
pub fn expired_member_token(subject_id: &str) -> String {
    token_with_options(
        OriginTable::Users,
        subject_id,
        TEST_SECRET,
        Duration::hours(-1),
        None,
    )
}
