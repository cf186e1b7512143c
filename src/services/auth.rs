//! Credential verification.

use crate::auth::password;
use crate::domain::user::User;
use crate::repos::users::UserStore;
use crate::AppError;

/// Verify a credential pair against the store.
///
/// Unknown identifier and wrong secret return the identical error so callers
/// cannot enumerate accounts; the miss path still runs an Argon2
/// verification to keep the two paths at comparable cost.
pub fn authenticate(store: &dyn UserStore, email: &str, password_input: &str) -> Result<User, AppError> {
    match store.find_by_email(email) {
        Some(record) => {
            if password::verify_password(password_input, &record.password_hash) {
                Ok(record.to_user())
            } else {
                Err(AppError::invalid_credentials())
            }
        }
        None => {
            password::equalize(password_input);
            Err(AppError::invalid_credentials())
        }
    }
}
