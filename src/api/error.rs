//! Error responses for the dashboard API.
//!
//! Every handler returns `Result<_, ApiError>`; the variant decides the status
//! code and the `{ "error": ... }` body the UI renders.

use crate::locator::LocatorError;
use crate::notifications::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid session
    #[error("Unauthorized")]
    Unauthorized,

    /// Sign-in attempt with the wrong username or password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or malformed request parameters
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Backend answered with a non-success status
    #[error("Gateway request failed with status {status}")]
    Downstream { status: u16, body: String },

    /// No candidate endpoint answered
    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Downstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::Locator(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Downstream { body, .. } => json!({
                "error": self.to_string(),
                "details": body,
            }),
            ApiError::Locator(LocatorError::AllFailed {
                service,
                last_error,
                candidates,
            }) => json!({
                "error": format!("All {} endpoints failed", service),
                "lastError": last_error.to_string(),
                "candidates": candidates,
            }),
            ApiError::Locator(LocatorError::NoCandidates { .. }) => json!({
                "error": self.to_string(),
                "candidates": [],
            }),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Request failed");
                json!({ "error": message })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
