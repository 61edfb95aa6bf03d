//! Service discovery routes.

use super::{ApiError, AppState};
use crate::auth::AdminSession;
use axum::extract::State;
use axum::Json;
use reqwest::Url;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Observer report fields relayed to the UI, in order.
pub const OBSERVER_REPORT_FIELDS: [&str; 7] = [
    "formatVersion",
    "observerAddress",
    "epochIndex",
    "epochStartHeight",
    "epochEndHeight",
    "generatedAt",
    "gatewayAssessments",
];

/// GET /api/gateway-info
pub async fn gateway_info(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let located = state.locators.gateway.locate().await?;
    let port = Url::parse(&located.endpoint)
        .ok()
        .and_then(|url| url.port_or_known_default());

    Ok(Json(json!({
        "port": port,
        "url": located.endpoint,
        "info": located.body,
    })))
}

/// GET /api/ao-cu
pub async fn ao_cu_info(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let located = state.locators.ao_cu.locate().await?;
    Ok(Json(json!({
        "endpoint": located.endpoint,
        "data": located.body,
    })))
}

/// GET /api/bundler/info
pub async fn bundler_info(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let located = state.locators.bundler.locate().await?;
    Ok(Json(json!({
        "endpoint": located.endpoint,
        "data": located.body,
    })))
}

/// GET /api/observer/current-report
pub async fn observer_report(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let located = state.locators.observer.locate().await?;
    Ok(Json(json!({
        "endpoint": located.endpoint,
        "report": narrow_observer_report(&located.body),
    })))
}

/// Keep only the fields the dashboard renders. Missing fields become `null`.
pub fn narrow_observer_report(report: &Value) -> Value {
    let narrowed: Map<String, Value> = OBSERVER_REPORT_FIELDS
        .iter()
        .map(|field| {
            let value = report.get(*field).cloned().unwrap_or(Value::Null);
            (field.to_string(), value)
        })
        .collect();
    Value::Object(narrowed)
}
