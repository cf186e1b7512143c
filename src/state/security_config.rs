use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::AppError;

/// Access tokens live for 30 minutes unless configured otherwise.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Configuration for JWT security settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Lifetime of issued access tokens
    pub token_ttl: Duration,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Override the token TTL (deployments and expiry tests).
    pub fn with_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Build from the runtime environment: `BACKEND_JWT_SECRET` (required)
    /// and `TOKEN_TTL_SECS` (optional).
    pub fn from_env() -> Result<Self, AppError> {
        let jwt = std::env::var("BACKEND_JWT_SECRET")
            .map_err(|_| AppError::config("BACKEND_JWT_SECRET must be set".to_string()))?;

        let mut config = Self::new(jwt.as_bytes());

        if let Ok(ttl) = std::env::var("TOKEN_TTL_SECS") {
            let secs = ttl.parse::<u64>().map_err(|_| {
                AppError::config("TOKEN_TTL_SECS must be a number of seconds".to_string())
            })?;
            config = config.with_ttl(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
