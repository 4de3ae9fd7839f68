//! Lattice - Authorization
//!
//! Identity resolution and permission evaluation for the back-office API.
//!
//! # Overview
//!
//! Every admin route sits behind the same gate: a bearer token is resolved
//! to a [`Principal`], then evaluated against the route's required
//! permission. Two identity tables feed the model:
//!
//! | Origin | Principal | Authorization |
//! |--------|-----------|---------------|
//! | `admin_users` | [`Principal::Admin`] | unconditional |
//! | `users` | [`Principal::Member`] | role shortcut, then grant matching |
//!
//! # Decision order
//!
//! First match wins:
//!
//! 1. `admin_users` origin - allow
//! 2. role `super_admin` or `admin` - allow
//! 3. grant `*` - allow
//! 4. exact grant - allow
//! 5. trailing-wildcard grant (`content.*` covers `content.edit` and
//!    `content.edit.draft`), most-specific prefix first - allow
//! 6. deny
//!
//! The token pins origin and subject only; role and grants are re-read from
//! the identity store on every request, so a demoted or deleted identity
//! loses access immediately.

mod authority;
mod claims;
mod error;
mod permission;
mod principal;
mod resolver;
mod roles;
mod store;

/// Test utilities for minting signed tokens
pub mod test_utils;

pub use authority::JwtAuthority;
pub use claims::{OriginTable, TokenClaims};
pub use error::{AuthError, Result};
pub use permission::{Permission, PermissionSet, WILDCARD};
pub use principal::Principal;
pub use resolver::IdentityResolver;
pub use roles::Role;
pub use store::{AdminUserRecord, IdentityStore, MemoryIdentityStore, UserRecord};
