//! Permission strings and wildcard matching
//!
//! Permissions are dot-separated capability names (`user.create`,
//! `content.*`, `*`). A trailing `*` segment matches that position and
//! everything nested beneath it; the bare `*` matches every permission.
//!
//! Strings are parsed into segment lists once, at construction, so the
//! matcher never re-splits on the hot path and matching stays exact per
//! segment (grant `user.view` does not cover `user.viewer`).

use std::fmt;

/// The match-all permission
pub const WILDCARD: &str = "*";

/// A parsed permission name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permission {
    raw: String,
    segments: Vec<String>,
}

impl Permission {
    /// Parse a permission string into its dot segments
    pub fn new(name: impl Into<String>) -> Self {
        let raw = name.into();
        let segments = raw.split('.').map(str::to_string).collect();
        Self { raw, segments }
    }

    /// The original string form
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The dot segments, in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this is the bare `*` that matches everything
    pub fn is_match_all(&self) -> bool {
        self.raw == WILDCARD
    }

    /// Whether this grant covers `required` at segment granularity
    ///
    /// True when the grant is `required` verbatim, or when the grant ends in
    /// `*` and every segment before the `*` equals the corresponding segment
    /// of `required`. The `*` must be the grant's final segment; it covers
    /// that position and any deeper nesting (`content.*` covers
    /// `content.edit` and `content.edit.draft`).
    pub fn covers(&self, required: &Permission) -> bool {
        if self.is_match_all() {
            return true;
        }
        if self.raw == required.raw {
            return true;
        }
        let Some((last, prefix)) = self.segments.split_last() else {
            return false;
        };
        if last != WILDCARD {
            return false;
        }
        // `user.profile.*` needs `required` to have at least the prefix
        // depth plus the wildcard position itself.
        required.segments.len() > prefix.len()
            && required.segments[..prefix.len()] == *prefix
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// An ordered set of permission grants held by a principal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    grants: Vec<Permission>,
}

impl PermissionSet {
    /// The empty grant set (denies everything at this level)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a list of grant strings, preserving order
    pub fn from_strings<I, S>(grants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            grants: grants.into_iter().map(|s| Permission::new(s)).collect(),
        }
    }

    /// Number of grants
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Whether the set holds no grants
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// The grants, in the order they were stored
    pub fn grants(&self) -> &[Permission] {
        &self.grants
    }

    /// Decide whether these grants allow `required`
    ///
    /// Checked in order: the bare `*` grant, then an exact grant, then the
    /// wildcard prefixes of `required` from most- to least-specific
    /// (`user.profile.edit` tests `user.profile.*`, then `user.*`). A
    /// dotless permission has no prefixes to test, so only `*` or an exact
    /// grant can allow it. Pure and deterministic.
    pub fn allows(&self, required: &Permission) -> bool {
        if self.grants.iter().any(Permission::is_match_all) {
            return true;
        }
        if self.grants.iter().any(|g| g.as_str() == required.as_str()) {
            return true;
        }
        let segments = required.segments();
        // Most-specific wildcard first: for a.b.c, test a.b.* then a.*.
        for cut in (1..segments.len()).rev() {
            let hit = self.grants.iter().any(|g| {
                let gs = g.segments();
                gs.len() == cut + 1
                    && gs[cut] == WILDCARD
                    && gs[..cut] == segments[..cut]
            });
            if hit {
                return true;
            }
        }
        false
    }
}
