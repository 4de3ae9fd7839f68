//! Resolved request principals
//!
//! A `Principal` is built fresh on every authenticated request from verified
//! token claims plus one identity-store lookup. It is never cached or
//! mutated and is dropped with the request.

use crate::claims::OriginTable;
use crate::permission::{Permission, PermissionSet};
use crate::roles::Role;

/// The identity acting on a request
///
/// Modeled as a tagged union over the two identity tables. The `Admin`
/// variant carries no grant set: admin-table identities are unconditionally
/// authorized, and the absent field makes an empty-grants/deny mixup
/// unrepresentable.
#[derive(Debug, Clone)]
pub enum Principal {
    /// `admin_users`-origin identity; passes every permission check
    Admin {
        /// Primary key in `admin_users`
        id: String,
        /// Login name, for audit stamping
        username: String,
    },
    /// `users`-origin identity; subject to role and grant evaluation
    Member {
        /// Primary key in `users`
        id: String,
        /// Email address, for audit stamping
        email: String,
        /// Current role, read from the store at resolution time
        role: Role,
        /// Current grants, read from the store at resolution time
        permissions: PermissionSet,
    },
}

impl Principal {
    /// Primary key in the origin table
    pub fn subject_id(&self) -> &str {
        match self {
            Self::Admin { id, .. } | Self::Member { id, .. } => id,
        }
    }

    /// Which identity table this principal came from
    pub fn origin(&self) -> OriginTable {
        match self {
            Self::Admin { .. } => OriginTable::AdminUsers,
            Self::Member { .. } => OriginTable::Users,
        }
    }

    /// Display name for audit logs (username or email)
    pub fn display_name(&self) -> &str {
        match self {
            Self::Admin { username, .. } => username,
            Self::Member { email, .. } => email,
        }
    }

    /// Role, where one applies (`Admin`-origin principals have none)
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Admin { .. } => None,
            Self::Member { role, .. } => Some(*role),
        }
    }

    /// Decide whether this principal may perform `required`
    ///
    /// Rules, first match wins:
    ///
    /// 1. `admin_users`-origin: allow.
    /// 2. role is `super_admin` or `admin`: allow.
    /// 3. grants contain the bare `*`: allow.
    /// 4. grants contain `required` exactly: allow.
    /// 5. a trailing-wildcard grant covers `required`, tested from the
    ///    most-specific prefix down.
    /// 6. deny.
    ///
    /// Pure: no I/O, deterministic for identical inputs.
    pub fn can(&self, required: &Permission) -> bool {
        match self {
            Self::Admin { .. } => true,
            Self::Member {
                role, permissions, ..
            } => role.is_administrative() || permissions.allows(required),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Principal {
        Principal::Admin {
            id: "A1".to_string(),
            username: "root".to_string(),
        }
    }

    fn member(role: Role, grants: &[&str]) -> Principal {
        Principal::Member {
            id: "U1".to_string(),
            email: "user@example.com".to_string(),
            role,
            permissions: PermissionSet::from_strings(grants.iter().copied()),
        }
    }

    #[test]
    fn test_admin_origin_allows_everything() {
        let p = admin();
        for required in ["user.create", "content.publish", "made.up.permission", "x"] {
            assert!(p.can(&required.into()), "denied {required}");
        }
        assert_eq!(p.origin(), OriginTable::AdminUsers);
        assert_eq!(p.role(), None);
    }

    #[test]
    fn test_administrative_role_ignores_grants() {
        // Empty grant set, but the role alone is enough.
        assert!(member(Role::Admin, &[]).can(&"user.delete".into()));
        assert!(member(Role::SuperAdmin, &[]).can(&"config.write".into()));
    }

    #[test]
    fn test_member_wildcard_grant() {
        let p = member(Role::Editor, &["content.*"]);
        assert!(p.can(&"content.edit".into()));
        assert!(p.can(&"content.edit.draft".into()));
        assert!(!p.can(&"user.edit".into()));
    }

    #[test]
    fn test_member_match_all_grant() {
        let p = member(Role::Viewer, &["*"]);
        assert!(p.can(&"anything".into()));
        assert!(p.can(&"deeply.nested.thing".into()));
    }

    #[test]
    fn test_viewer_with_no_grants_denied() {
        let p = member(Role::Viewer, &[]);
        assert!(!p.can(&"content.view".into()));
        assert!(!p.can(&"view".into()));
    }

    #[test]
    fn test_no_substring_match() {
        let p = member(Role::Editor, &["user.view"]);
        assert!(p.can(&"user.view".into()));
        assert!(!p.can(&"user.viewer".into()));
    }

    #[test]
    fn test_pure_and_idempotent() {
        let p = member(Role::Editor, &["content.*", "user.view"]);
        let required: Permission = "content.publish".into();
        assert_eq!(p.can(&required), p.can(&required));
    }

    #[test]
    fn test_accessors() {
        let p = member(Role::Editor, &["content.*"]);
        assert_eq!(p.subject_id(), "U1");
        assert_eq!(p.origin(), OriginTable::Users);
        assert_eq!(p.role(), Some(Role::Editor));
        assert_eq!(p.display_name(), "user@example.com");
    }
}
