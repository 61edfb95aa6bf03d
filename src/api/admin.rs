//! Gateway admin proxy routes.
//!
//! Each route validates its body, then forwards exactly one call to the
//! caller-supplied gateway with the caller-supplied admin key. The key is
//! sent both as a bearer token and as `X-Admin-Key`.

use super::{ApiError, AppState};
use crate::auth::AdminSession;
use crate::logging::{RequestId, REQUEST_ID_HEADER};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};
use reqwest::{Method, Url};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Custom header carrying the admin key alongside `Authorization`.
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Target gateway and credential, common to every admin request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayTarget {
    pub gateway_url: Option<String>,
    pub admin_key: Option<String>,
}

impl GatewayTarget {
    fn resolve(&self) -> Result<(Url, &str), ApiError> {
        let raw_url = required(&self.gateway_url, "gatewayUrl")?;
        let admin_key = required(&self.admin_key, "adminKey")?;

        let url = Url::parse(raw_url)
            .map_err(|e| ApiError::Validation(format!("Invalid gatewayUrl '{}': {}", raw_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Validation(format!(
                "Invalid gatewayUrl '{}': scheme must be http or https",
                raw_url
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::Validation(format!(
                "Invalid gatewayUrl '{}': query and fragment are not allowed",
                raw_url
            )));
        }

        Ok((url, admin_key))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDataRequest {
    #[serde(flatten)]
    pub target: GatewayTarget,
    pub id: Option<String>,
    pub notes: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNameRequest {
    #[serde(flatten)]
    pub target: GatewayTarget,
    pub name: Option<String>,
    pub notes: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnblockNameRequest {
    #[serde(flatten)]
    pub target: GatewayTarget,
    pub name: Option<String>,
}

/// Body for routes that take a single transaction/bundle id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdRequest {
    #[serde(flatten)]
    pub target: GatewayTarget,
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParquetRequest {
    #[serde(flatten)]
    pub target: GatewayTarget,
    pub output_dir: Option<String>,
    pub start_height: Option<u64>,
    pub end_height: Option<u64>,
    pub max_file_rows: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PruneRequest {
    #[serde(flatten)]
    pub target: GatewayTarget,
    pub indexed_at_threshold: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetOnlyRequest {
    #[serde(flatten)]
    pub target: GatewayTarget,
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Validation(format!(
            "Missing required field: {}",
            field
        ))),
    }
}

fn required_number(value: Option<u64>, field: &str) -> Result<u64, ApiError> {
    value.ok_or_else(|| ApiError::Validation(format!("Missing required field: {}", field)))
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::Validation(e.body_text()))
}

/// Insert optional string fields that the caller actually provided.
fn with_optional(mut body: Map<String, Value>, fields: &[(&str, &Option<String>)]) -> Value {
    for (key, value) in fields {
        if let Some(v) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            body.insert(key.to_string(), Value::String(v.to_string()));
        }
    }
    Value::Object(body)
}

/// Append `segments` to the gateway's path, percent-encoding each one.
fn admin_url(mut gateway: Url, segments: &[&str]) -> Result<Url, ApiError> {
    gateway
        .path_segments_mut()
        .map_err(|_| ApiError::Validation("Invalid gatewayUrl: cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(gateway)
}

/// Send one request to the gateway and relay its JSON reply.
async fn forward(
    state: &AppState,
    request_id: &str,
    operation: &'static str,
    method: Method,
    url: Url,
    admin_key: &str,
    body: Option<Value>,
) -> Result<Json<Value>, ApiError> {
    let mut request = state
        .http_client
        .request(method.clone(), url.clone())
        .bearer_auth(admin_key)
        .header(ADMIN_KEY_HEADER, admin_key)
        .header(REQUEST_ID_HEADER, request_id);
    if let Some(body) = &body {
        request = request.json(body);
    }

    let response = request.send().await.map_err(|e| {
        tracing::warn!(
            request_id = %request_id,
            operation,
            url = %url,
            error = %e,
            "Admin request failed"
        );
        ApiError::Internal(format!("Failed to reach gateway: {}", e))
    })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read gateway response: {}", e)))?;

    tracing::info!(
        request_id = %request_id,
        operation,
        method = %method,
        url = %url,
        status = status.as_u16(),
        "Forwarded admin request"
    );

    if !status.is_success() {
        return Err(ApiError::Downstream {
            status: status.as_u16(),
            body: text,
        });
    }

    if text.trim().is_empty() {
        return Ok(Json(json!({ "success": true })));
    }

    serde_json::from_str(&text)
        .map(Json)
        .map_err(|e| ApiError::Internal(format!("Gateway returned invalid JSON: {}", e)))
}

/// POST /api/admin/block-data
pub async fn block_data(
    _session: AdminSession,
    Extension(RequestId(request_id)): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BlockDataRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(payload)?;
    let (gateway, admin_key) = request.target.resolve()?;
    let id = required(&request.id, "id")?;

    let mut body = Map::new();
    body.insert("id".to_string(), json!(id));
    let body = with_optional(
        body,
        &[("notes", &request.notes), ("source", &request.source)],
    );

    let url = admin_url(gateway, &["ar-io", "admin", "block-data"])?;
    forward(&state, &request_id, "block_data", Method::PUT, url, admin_key, Some(body)).await
}

/// POST /api/admin/block-name
pub async fn block_name(
    _session: AdminSession,
    Extension(RequestId(request_id)): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BlockNameRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(payload)?;
    let (gateway, admin_key) = request.target.resolve()?;
    let name = required(&request.name, "name")?;

    let mut body = Map::new();
    body.insert("name".to_string(), json!(name));
    let body = with_optional(
        body,
        &[("notes", &request.notes), ("source", &request.source)],
    );

    let url = admin_url(gateway, &["ar-io", "admin", "block-name"])?;
    forward(&state, &request_id, "block_name", Method::PUT, url, admin_key, Some(body)).await
}

/// POST /api/admin/unblock-name
pub async fn unblock_name(
    _session: AdminSession,
    Extension(RequestId(request_id)): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UnblockNameRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(payload)?;
    let (gateway, admin_key) = request.target.resolve()?;
    let name = required(&request.name, "name")?;

    let url = admin_url(gateway, &["ar-io", "admin", "unblock-name"])?;
    let body = json!({ "name": name });
    forward(&state, &request_id, "unblock_name", Method::PUT, url, admin_key, Some(body)).await
}

/// POST /api/admin/queue-tx
pub async fn queue_tx(
    _session: AdminSession,
    Extension(RequestId(request_id)): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IdRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(payload)?;
    let (gateway, admin_key) = request.target.resolve()?;
    let id = required(&request.id, "id")?;

    let url = admin_url(gateway, &["ar-io", "admin", "queue-tx"])?;
    let body = json!({ "id": id });
    forward(&state, &request_id, "queue_tx", Method::POST, url, admin_key, Some(body)).await
}

/// POST /api/admin/export-parquet
pub async fn export_parquet(
    _session: AdminSession,
    Extension(RequestId(request_id)): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExportParquetRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(payload)?;
    let (gateway, admin_key) = request.target.resolve()?;
    let output_dir = required(&request.output_dir, "outputDir")?;
    let start_height = required_number(request.start_height, "startHeight")?;
    let end_height = required_number(request.end_height, "endHeight")?;

    if start_height > end_height {
        return Err(ApiError::Validation(format!(
            "startHeight ({}) must not exceed endHeight ({})",
            start_height, end_height
        )));
    }

    let mut body = json!({
        "outputDir": output_dir,
        "startHeight": start_height,
        "endHeight": end_height,
    });
    if let Some(rows) = request.max_file_rows {
        body["maxFileRows"] = json!(rows);
    }

    let url = admin_url(gateway, &["ar-io", "admin", "export-parquet"])?;
    forward(&state, &request_id, "export_parquet", Method::POST, url, admin_key, Some(body)).await
}

/// POST /api/admin/export-parquet/status
pub async fn export_parquet_status(
    _session: AdminSession,
    Extension(RequestId(request_id)): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TargetOnlyRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(payload)?;
    let (gateway, admin_key) = request.target.resolve()?;

    let url = admin_url(gateway, &["ar-io", "admin", "export-parquet", "status"])?;
    forward(&state, &request_id, "export_parquet_status", Method::GET, url, admin_key, None).await
}

/// POST /api/admin/prune
pub async fn prune(
    _session: AdminSession,
    Extension(RequestId(request_id)): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PruneRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(payload)?;
    let (gateway, admin_key) = request.target.resolve()?;
    let threshold = required_number(request.indexed_at_threshold, "indexedAtThreshold")?;

    let url = admin_url(gateway, &["ar-io", "admin", "prune-stable-data-items"])?;
    let body = json!({ "indexedAtThreshold": threshold });
    forward(&state, &request_id, "prune", Method::POST, url, admin_key, Some(body)).await
}

/// POST /api/admin/bundle-status
pub async fn bundle_status(
    _session: AdminSession,
    Extension(RequestId(request_id)): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IdRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(payload)?;
    let (gateway, admin_key) = request.target.resolve()?;
    let id = required(&request.id, "id")?;

    let url = admin_url(gateway, &["ar-io", "admin", "bundle-status", id])?;
    forward(&state, &request_id, "bundle_status", Method::GET, url, admin_key, None).await
}
