//! User domain types.
//!
//! `UserRecord` is the stored shape and carries the password hash; it is
//! never serialized. `User` is the safe API-facing shape.

use serde::{Deserialize, Serialize};

/// User representation for API responses. Excludes all sensitive data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub roles: Vec<String>,
}

/// Complete user record as held by the credential store.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique identifier. Matched by exact string comparison, no
    /// normalization: `User@x.com` and `user@x.com` are distinct accounts.
    pub email: String,
    pub username: String,
    /// Argon2id PHC string. Plaintext is never stored.
    pub password_hash: String,
    pub is_active: bool,
    pub roles: Vec<String>,
}

impl UserRecord {
    /// Project into the API-safe shape, dropping the password hash.
    pub fn to_user(&self) -> User {
        User {
            email: self.email.clone(),
            username: self.username.clone(),
            is_active: self.is_active,
            roles: self.roles.clone(),
        }
    }
}
