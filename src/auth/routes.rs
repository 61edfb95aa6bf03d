//! Sign-in, session and sign-out endpoints.

use super::guard::{clear_session_cookie, resolve_session, session_cookie};
use crate::api::{ApiError, AppState};
use crate::config::AuthConfig;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub callback_url: Option<String>,
}

/// True only when both credentials are configured and both match.
pub fn credentials_match(config: &AuthConfig, username: &str, password: &str) -> bool {
    match (config.username.as_deref(), config.password.as_deref()) {
        (Some(expected_user), Some(expected_pass))
            if !expected_user.is_empty() && !expected_pass.is_empty() =>
        {
            let user_ok = constant_time_eq(expected_user, username);
            let pass_ok = constant_time_eq(expected_pass, password);
            user_ok & pass_ok
        }
        _ => false,
    }
}

/// Compare without an early exit on the first differing byte.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Keep callbacks on this site: only absolute paths, never `//host`.
fn safe_callback(callback: Option<&str>, default: &str) -> String {
    match callback {
        Some(url) if url.starts_with('/') && !url.starts_with("//") => url.to_string(),
        _ => default.to_string(),
    }
}

/// POST /api/auth/signin
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    if !credentials_match(&state.config.auth, &username, &password) {
        tracing::warn!(username_len = username.len(), "Rejected dashboard sign-in");
        return Err(ApiError::InvalidCredentials);
    }

    let (token, claims) = state
        .sessions
        .issue()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(user = %claims.name, "Dashboard sign-in");

    let server = &state.config.server;
    let url = safe_callback(request.callback_url.as_deref(), server.root_url());
    let cookie = session_cookie(&token, &state.config);

    Ok((
        [(SET_COOKIE, cookie)],
        Json(json!({
            "ok": true,
            "user": { "name": claims.name },
            "url": url,
        })),
    )
        .into_response())
}

/// GET /api/auth/session
pub async fn session(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<Value> {
    match resolve_session(&headers, &state.sessions) {
        Some(claims) => {
            let expires = Utc
                .timestamp_opt(claims.exp as i64, 0)
                .single()
                .map(|t| t.to_rfc3339());
            Json(json!({
                "user": { "name": claims.name },
                "expires": expires,
            }))
        }
        None => Json(json!({})),
    }
}

/// POST /api/auth/signout
pub async fn sign_out(State(state): State<Arc<AppState>>) -> Response {
    let cookie = clear_session_cookie(&state.config);
    let url = state.config.server.url_for("/login");
    ([(SET_COOKIE, cookie)], Json(json!({ "ok": true, "url": url }))).into_response()
}
