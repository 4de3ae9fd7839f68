//! JWT token claims
//!
//! Tokens name *which* identity table issued the principal and *who* it is;
//! the store remains the source of truth for current role and grants, so a
//! demoted or deleted identity loses access on its next request even while
//! the token is unexpired.

use serde::{Deserialize, Serialize};

/// Which identity table a principal originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginTable {
    /// The `admin_users` table; principals from here are unconditionally
    /// authorized
    AdminUsers,
    /// The `users` table; principals from here carry role + grants
    Users,
}

impl OriginTable {
    /// Table name as stored in claims
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdminUsers => "admin_users",
            Self::Users => "users",
        }
    }
}

impl std::fmt::Display for OriginTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims carried by a back-office access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: primary key in the origin table
    #[serde(rename = "sub")]
    pub subject: String,

    /// Identity table that issued this principal
    pub origin: OriginTable,

    /// Expiration time (Unix timestamp)
    #[serde(rename = "exp")]
    pub expires_at: i64,

    /// Issued at (Unix timestamp)
    #[serde(rename = "iat")]
    pub issued_at: i64,

    /// Issuer
    #[serde(rename = "iss", skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl TokenClaims {
    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at < chrono::Utc::now().timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_serde_form() {
        let json = serde_json::to_string(&OriginTable::AdminUsers).unwrap();
        assert_eq!(json, "\"admin_users\"");
        let json = serde_json::to_string(&OriginTable::Users).unwrap();
        assert_eq!(json, "\"users\"");
    }

    #[test]
    fn test_claims_round_trip() {
        let claims = TokenClaims {
            subject: "U1".to_string(),
            origin: OriginTable::Users,
            expires_at: 2_000_000_000,
            issued_at: 1_000_000_000,
            issuer: None,
        };
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"sub\":\"U1\""));
        assert!(json.contains("\"origin\":\"users\""));
        assert!(!json.contains("iss"));

        let back: TokenClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.subject, "U1");
        assert_eq!(back.origin, OriginTable::Users);
    }

    #[test]
    fn test_expired() {
        let claims = TokenClaims {
            subject: "A1".to_string(),
            origin: OriginTable::AdminUsers,
            expires_at: 0,
            issued_at: 0,
            issuer: None,
        };
        assert!(claims.is_expired());
    }
}
