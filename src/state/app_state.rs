use std::sync::Arc;

use crate::repos::users::UserStore;

use super::security_config::SecurityConfig;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Credential store, injected so the backend is swappable
    pub users: Arc<dyn UserStore>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
}

impl AppState {
    /// Create a new AppState with the given user store and security config
    pub fn new(users: Arc<dyn UserStore>, security: SecurityConfig) -> Self {
        Self { users, security }
    }
}
