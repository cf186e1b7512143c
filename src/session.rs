//! Client-side session model.
//!
//! Mirrors what the browser does with a token: hold it, attach it to
//! requests, and route between login and dashboard based on a local expiry
//! check. The expiry check decodes the token's `exp` claim without a server
//! round-trip; it is an optimization only — the server independently
//! re-validates signature and expiry on every protected call.

use crate::auth::jwt::peek_expiry;

/// A held token. Created on successful login, destroyed on logout or
/// detected expiry, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Authorization header value for protected requests.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Owner of the current session. Single-consumer, no cross-tab coordination.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: Option<Session>,
}

/// What a route guard decided to do with the current navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session state permits this route; render it.
    Render,
    /// No usable session; go authenticate.
    RedirectToLogin,
    /// Already authenticated; keep out of the login view.
    RedirectToDashboard,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any existing session with one holding the freshly issued token.
    pub fn establish(&mut self, token: impl Into<String>) {
        self.current = Some(Session {
            token: token.into(),
        });
    }

    /// Logout: destroy the session.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// True if a token is held and its `exp` claim is still in the future.
    /// Tokens whose payload cannot be decoded never count as valid.
    pub fn has_valid_token(&self, now: i64) -> bool {
        self.current
            .as_ref()
            .and_then(|session| peek_expiry(&session.token))
            .map(|exp| now < exp)
            .unwrap_or(false)
    }
}

/// Guard for protected views: render only with a live session, otherwise
/// drop whatever is held and send the user to login.
pub fn guard_protected(store: &mut SessionStore, now: i64) -> GuardOutcome {
    if store.has_valid_token(now) {
        GuardOutcome::Render
    } else {
        store.clear();
        GuardOutcome::RedirectToLogin
    }
}

/// Guard for public views (login): render only without a live session, so
/// authenticated users cannot re-enter the login view. Like the protected
/// guard, a session whose expiry has passed is destroyed on detection.
pub fn guard_public(store: &mut SessionStore, now: i64) -> GuardOutcome {
    if store.has_valid_token(now) {
        GuardOutcome::RedirectToDashboard
    } else {
        store.clear();
        GuardOutcome::Render
    }
}
