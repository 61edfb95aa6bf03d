//! Session guard extractor.
//!
//! Put `AdminSession` first in a handler's argument list: it rejects the
//! request with 401 before the body is read or the handler runs.

use super::session::{SessionClaims, SessionManager, SESSION_COOKIE};
use crate::api::{ApiError, AppState};
use crate::config::AdminConfig;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Proof that the caller holds a valid admin session.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub claims: SessionClaims,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(&parts.headers, &state.sessions)
            .map(|claims| AdminSession { claims })
            .ok_or(ApiError::Unauthorized)
    }
}

/// Resolve the session from request headers, failing open to `None`.
pub fn resolve_session(headers: &HeaderMap, sessions: &SessionManager) -> Option<SessionClaims> {
    let token = session_token(headers)?;
    sessions.verify(&token)
}

/// Extract the session cookie value, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a freshly issued token.
pub fn session_cookie(token: &str, config: &AdminConfig) -> String {
    let mut cookie = format!(
        "{}={}; Path={}; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        config.server.cookie_path(),
        config.auth.session_max_age_seconds
    );
    if config.auth.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(config: &AdminConfig) -> String {
    format!(
        "{}=; Path={}; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE,
        config.server.cookie_path()
    )
}
