//! Identity resolution
//!
//! Turns a presented bearer token into a `Principal`: verify the token,
//! perform exactly one identity-store lookup keyed by the origin claim,
//! and build the matching variant. Read-only; no retries; failures are
//! terminal for the request.

use std::sync::Arc;

use tracing::debug;

use crate::authority::JwtAuthority;
use crate::claims::OriginTable;
use crate::error::{AuthError, Result};
use crate::permission::PermissionSet;
use crate::principal::Principal;
use crate::roles::Role;
use crate::store::IdentityStore;

/// Resolves bearer tokens to principals
///
/// Dependencies are injected at construction so resolution never reads
/// ambient state; the resolver itself is cheap to share across requests.
#[derive(Clone)]
pub struct IdentityResolver {
    authority: Arc<JwtAuthority>,
    store: Arc<dyn IdentityStore>,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("authority", &self.authority)
            .finish()
    }
}

impl IdentityResolver {
    /// Create a resolver over an authority and an identity store
    pub fn new(authority: Arc<JwtAuthority>, store: Arc<dyn IdentityStore>) -> Self {
        Self { authority, store }
    }

    /// The token authority this resolver verifies against
    pub fn authority(&self) -> &JwtAuthority {
        &self.authority
    }

    /// Resolve a raw token (already stripped of `Bearer `) to a principal
    ///
    /// The token decides which table to query; the store decides current
    /// role and grants, so revocation or demotion applies on the next
    /// request even for unexpired tokens.
    pub async fn resolve(&self, token: &str) -> Result<Principal> {
        let claims = self.authority.verify(token)?;

        match claims.origin {
            OriginTable::AdminUsers => {
                let record = self
                    .store
                    .find_admin_user_by_id(&claims.subject)
                    .await?
                    .ok_or_else(|| {
                        debug!(subject = %claims.subject, "admin user vanished after issuance");
                        AuthError::PrincipalNotFound(format!("admin_users/{}", claims.subject))
                    })?;

                Ok(Principal::Admin {
                    id: record.id,
                    username: record.username,
                })
            }
            OriginTable::Users => {
                let record = self
                    .store
                    .find_user_by_id(&claims.subject)
                    .await?
                    .ok_or_else(|| {
                        debug!(subject = %claims.subject, "user vanished after issuance");
                        AuthError::PrincipalNotFound(format!("users/{}", claims.subject))
                    })?;

                Ok(Principal::Member {
                    id: record.id,
                    email: record.email,
                    role: Role::parse_or_viewer(&record.role),
                    permissions: PermissionSet::from_strings(record.permissions),
                })
            }
        }
    }
}
