//! Back-office roles
//!
//! Roles are stored as free-form strings in the identity tables; this module
//! gives them a closed representation.
//!
//! # Roles (hierarchy)
//!
//! - `Viewer` - read-only access to admin screens
//! - `Editor` - create/edit content (articles, cases)
//! - `Admin` - full management, bypasses permission grants
//! - `SuperAdmin` - same bypass; reserved for the bootstrap account

use std::fmt;

/// User role in the back-office (ordered hierarchy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Read-only access
    Viewer = 0,
    /// Create/edit content, subject to permission grants
    Editor = 1,
    /// Full management; passes every permission check
    Admin = 2,
    /// Bootstrap administrator; passes every permission check
    SuperAdmin = 3,
}

impl Role {
    /// Parse role from its stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "viewer" => Some(Self::Viewer),
            "editor" => Some(Self::Editor),
            "admin" => Some(Self::Admin),
            "super_admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    /// Parse role, falling back to Viewer for unknown strings
    ///
    /// Unknown roles degrade to the least-privileged role rather than
    /// failing the request.
    pub fn parse_or_viewer(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Viewer)
    }

    /// Convert to the stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Whether this role passes every permission check outright
    pub fn is_administrative(&self) -> bool {
        *self >= Self::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::parse("viewer"), Some(Role::Viewer));
        assert_eq!(Role::parse("editor"), Some(Role::Editor));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("super_admin"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("superadmin"), None);
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn test_parse_fallback() {
        assert_eq!(Role::parse_or_viewer("no_such_role"), Role::Viewer);
        assert_eq!(Role::parse_or_viewer("editor"), Role::Editor);
    }

    #[test]
    fn test_role_hierarchy() {
        assert!(Role::SuperAdmin > Role::Admin);
        assert!(Role::Admin > Role::Editor);
        assert!(Role::Editor > Role::Viewer);
    }

    #[test]
    fn test_administrative() {
        assert!(Role::SuperAdmin.is_administrative());
        assert!(Role::Admin.is_administrative());
        assert!(!Role::Editor.is_administrative());
        assert!(!Role::Viewer.is_administrative());
    }

    #[test]
    fn test_round_trip() {
        for role in [Role::Viewer, Role::Editor, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }
}
