//! Argon2id password hashing and verification.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use once_cell::sync::Lazy;

use crate::AppError;

// Verified against when an identifier lookup misses, so unknown-user and
// wrong-password paths cost roughly the same.
static DUMMY_HASH: Lazy<String> =
    Lazy::new(|| hash_password("placeholder-password").unwrap_or_default());

/// Hash a password into a PHC-format string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Verify a plaintext password against a stored PHC-format hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Burn one verification's worth of work without authenticating anything.
pub fn equalize(password: &str) {
    let _ = verify_password(password, &DUMMY_HASH);
}
