//! Credential store abstraction.
//!
//! Verification logic only needs lookup-by-identifier, so the store is a
//! trait; the in-memory implementation stands in until a real database
//! lands.

use std::collections::HashMap;

use crate::auth::password;
use crate::domain::user::UserRecord;
use crate::AppError;

/// Lookup-by-identifier capability. Lookups are exact-string and
/// case-sensitive; implementations must not normalize identifiers.
pub trait UserStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> Option<UserRecord>;
}

/// In-memory user store. Read-only after construction, so it needs no
/// locking behind the `Arc` in `AppState`.
#[derive(Debug, Default)]
pub struct InMemoryUsers {
    users: HashMap<String, UserRecord>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, keyed by its exact email string.
    pub fn insert(&mut self, record: UserRecord) {
        self.users.insert(record.email.clone(), record);
    }

    /// Development store seeded with the standard test accounts, all using
    /// the password "password".
    pub fn seeded() -> Result<Self, AppError> {
        let password_hash = password::hash_password("password")?;

        let mut store = Self::new();
        store.insert(UserRecord {
            email: "admin@cycloveda.com".to_string(),
            username: "admin".to_string(),
            password_hash: password_hash.clone(),
            is_active: true,
            roles: vec!["admin".to_string()],
        });
        store.insert(UserRecord {
            email: "user@example.com".to_string(),
            username: "testuser".to_string(),
            password_hash,
            is_active: true,
            roles: vec!["user".to_string()],
        });
        Ok(store)
    }
}

impl UserStore for InMemoryUsers {
    fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users.get(email).cloned()
    }
}
