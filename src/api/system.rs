//! Host stats and admin key routes.

use super::{ApiError, AppState};
use crate::auth::AdminSession;
use crate::system::{sample_or_fallback, ResourceStats};
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /api/system/stats
pub async fn stats(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
) -> Json<ResourceStats> {
    Json(sample_or_fallback(state.resources.as_ref()).await)
}

/// GET /api/admin-key
pub async fn admin_key(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    match state.config.admin.api_key.as_deref() {
        Some(key) if !key.is_empty() => Ok(Json(json!({ "adminKey": key }))),
        _ => Err(ApiError::NotFound(
            "Admin API key not configured".to_string(),
        )),
    }
}
