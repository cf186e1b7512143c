use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::auth::claims::Claims;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Mint an HS256 JWT access token expiring after the configured TTL.
pub fn mint_access_token(
    sub: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let exp = iat + security.token_ttl.as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a JWT and return its claims.
///
/// Every failure — expired, tampered signature, malformed token — collapses
/// into the same `AppError::Unauthorized`. The caller cannot tell the cases
/// apart; the specific reason is only logged at debug level.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    // Pin algorithm to the configured one and validate exp with no grace
    // window: a token is invalid from the moment its expiry passes.
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let reason = match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => "token_expired",
            jsonwebtoken::errors::ErrorKind::InvalidSignature => "invalid_signature",
            _ => "invalid_token",
        };
        debug!(reason, "access token rejected");
        AppError::unauthorized()
    })
}

/// Read the `exp` claim from a token's payload segment without verifying the
/// signature. Used by the client session guard to skip a server round-trip;
/// the server re-validates on every protected call regardless.
pub fn peek_expiry(token: &str) -> Option<i64> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let _signature = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    value.get("exp")?.as_i64()
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{mint_access_token, peek_expiry, verify_access_token};
    use crate::state::security_config::SecurityConfig;
    use crate::AppError;

    fn test_security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn mint_and_verify_roundtrip() {
        let security = test_security();
        let now = SystemTime::now();

        let token = mint_access_token("user@example.com", now, &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(
            claims.exp,
            claims.iat + security.token_ttl.as_secs() as i64
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let security = test_security();
        // Expiry passed two seconds ago; rejection must be immediate, with
        // no grace window.
        let past = SystemTime::now() - security.token_ttl - Duration::from_secs(2);

        let token = mint_access_token("user@example.com", past, &security).unwrap();
        let result = verify_access_token(&token, &security);

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn no_grace_window_after_expiry() {
        let security = test_security();
        // A token 30 seconds past its exp claim must not verify; the
        // default validator leeway would otherwise accept it for a minute.
        let past = SystemTime::now() - security.token_ttl - Duration::from_secs(30);

        let token = mint_access_token("user@example.com", past, &security).unwrap();
        assert!(verify_access_token(&token, &security).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());

        let token = mint_access_token("user@example.com", SystemTime::now(), &security_a).unwrap();
        let result = verify_access_token(&token, &security_b);

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn tampered_signature_is_rejected_identically_to_expiry() {
        let security = test_security();
        let token = mint_access_token("user@example.com", SystemTime::now(), &security).unwrap();

        // Flip one character in the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_ne!(token, tampered);

        let tampered_err = verify_access_token(&tampered, &security).unwrap_err();

        let past = SystemTime::now() - security.token_ttl - Duration::from_secs(30);
        let expired = mint_access_token("user@example.com", past, &security).unwrap();
        let expired_err = verify_access_token(&expired, &security).unwrap_err();

        // One uniform client-facing error for both failure modes.
        assert_eq!(tampered_err.code(), expired_err.code());
        assert_eq!(tampered_err.detail(), expired_err.detail());
        assert_eq!(tampered_err.status(), expired_err.status());
    }

    #[test]
    fn peek_expiry_reads_exp_without_the_secret() {
        let security = test_security();
        let now = SystemTime::now();
        let token = mint_access_token("user@example.com", now, &security).unwrap();

        let exp = peek_expiry(&token).unwrap();
        let iat = now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64;
        assert_eq!(exp, iat + security.token_ttl.as_secs() as i64);
    }

    #[test]
    fn peek_expiry_rejects_garbage() {
        assert_eq!(peek_expiry(""), None);
        assert_eq!(peek_expiry("not-a-token"), None);
        assert_eq!(peek_expiry("a.b"), None);
        assert_eq!(peek_expiry("a.!!!.c"), None);
        assert_eq!(peek_expiry("a.b.c.d"), None);
    }
}
