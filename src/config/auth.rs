//! Authentication and admin key configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default session lifetime: 30 days.
pub const DEFAULT_SESSION_MAX_AGE_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Single-admin credential and session signing settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    /// HMAC secret for session tokens. Generated at startup when absent.
    pub secret: Option<String>,
    pub session_max_age_seconds: u64,
    /// Add `Secure` to the session cookie (enable behind HTTPS)
    pub secure_cookie: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            secret: None,
            session_max_age_seconds: DEFAULT_SESSION_MAX_AGE_SECONDS,
            secure_cookie: false,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("session_max_age_seconds", &self.session_max_age_seconds)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

/// Server-side gateway admin key, handed to authenticated dashboard users.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminKeyConfig {
    pub api_key: Option<String>,
}

impl fmt::Debug for AdminKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminKeyConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
