//! Identity store abstraction
//!
//! The back-office keeps two identity tables: `admin_users` (bootstrap
//! administrators) and `users` (managed accounts with roles and grants).
//! This layer only ever reads them, one lookup per request, keyed by the
//! token's origin claim.
//!
//! `MemoryIdentityStore` is the bundled implementation; a database-backed
//! store plugs in behind the same trait.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{AuthError, Result};

/// Row from the `admin_users` table
#[derive(Debug, Clone)]
pub struct AdminUserRecord {
    /// Primary key
    pub id: String,
    /// Login name
    pub username: String,
}

/// Row from the `users` table
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Primary key
    pub id: String,
    /// Email address
    pub email: String,
    /// Role string (`super_admin`, `admin`, `editor`, `viewer`)
    pub role: String,
    /// Granted permission strings, in stored order
    pub permissions: Vec<String>,
}

/// Read-only identity lookups
///
/// Implementations must return `Ok(None)` for a missing row and reserve
/// `Err` for lookup failures (connection loss, malformed rows).
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Fetch an `admin_users` row by primary key
    async fn find_admin_user_by_id(&self, id: &str) -> Result<Option<AdminUserRecord>>;

    /// Fetch a `users` row by primary key
    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>>;
}

/// In-memory dual-table identity store
///
/// Thread-safe; lookups clone the row out so no lock is held across awaits.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    admin_users: RwLock<HashMap<String, AdminUserRecord>>,
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryIdentityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an `admin_users` row
    pub fn insert_admin_user(&self, record: AdminUserRecord) {
        self.admin_users
            .write()
            .expect("admin_users lock poisoned")
            .insert(record.id.clone(), record);
    }

    /// Insert or replace a `users` row
    pub fn insert_user(&self, record: UserRecord) {
        self.users
            .write()
            .expect("users lock poisoned")
            .insert(record.id.clone(), record);
    }

    /// Remove a `users` row, returning whether it existed
    pub fn remove_user(&self, id: &str) -> bool {
        self.users
            .write()
            .expect("users lock poisoned")
            .remove(id)
            .is_some()
    }

    /// Remove an `admin_users` row, returning whether it existed
    pub fn remove_admin_user(&self, id: &str) -> bool {
        self.admin_users
            .write()
            .expect("admin_users lock poisoned")
            .remove(id)
            .is_some()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_admin_user_by_id(&self, id: &str) -> Result<Option<AdminUserRecord>> {
        let table = self
            .admin_users
            .read()
            .map_err(|_| AuthError::store_error("admin_users lock poisoned"))?;
        Ok(table.get(id).cloned())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        let table = self
            .users
            .read()
            .map_err(|_| AuthError::store_error("users lock poisoned"))?;
        Ok(table.get(id).cloned())
    }
}
