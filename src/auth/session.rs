//! Signed session tokens.
//!
//! Sessions are HS256 JWTs. The only identity they carry is the fixed admin
//! subject and display name; expiry is enforced by `jsonwebtoken` on decode.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "ario-admin.session-token";

/// Subject claim of every valid session.
pub const ADMIN_SUBJECT: &str = "admin";

/// Display name shown in the dashboard header.
pub const ADMIN_DISPLAY_NAME: &str = "Admin";

/// Claims stored in the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub name: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("system time error: {0}")]
    Clock(String),

    #[error("failed to sign session token: {0}")]
    Signing(String),
}

/// Issues and verifies session tokens with one shared secret.
#[derive(Clone)]
pub struct SessionManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    max_age_seconds: u64,
}

impl SessionManager {
    pub fn new(secret: &str, max_age_seconds: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            max_age_seconds,
        }
    }

    pub fn max_age_seconds(&self) -> u64 {
        self.max_age_seconds
    }

    /// Issue a token for the admin, valid from now.
    pub fn issue(&self) -> Result<(String, SessionClaims), SessionError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| SessionError::Clock(e.to_string()))?
            .as_secs();
        self.issue_at(now)
    }

    /// Issue a token as if signed at `issued_at`.
    pub fn issue_at(&self, issued_at: u64) -> Result<(String, SessionClaims), SessionError> {
        let claims = SessionClaims {
            sub: ADMIN_SUBJECT.to_string(),
            name: ADMIN_DISPLAY_NAME.to_string(),
            iat: issued_at,
            exp: issued_at + self.max_age_seconds,
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| SessionError::Signing(e.to_string()))?;

        Ok((token, claims))
    }

    /// Decode a token. Any failure (bad signature, expiry, malformed input,
    /// wrong subject) yields `None`.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        match decode::<SessionClaims>(token, &self.decoding, &Validation::default()) {
            Ok(data) if data.claims.sub == ADMIN_SUBJECT => Some(data.claims),
            Ok(_) => {
                tracing::debug!("Session token has unexpected subject");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                None
            }
        }
    }
}

/// Random signing secret for deployments that do not configure one.
pub fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
