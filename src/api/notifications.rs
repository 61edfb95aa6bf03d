//! Notification routes.

use super::{ApiError, AppState};
use crate::auth::AdminSession;
use crate::notifications::{Notification, NotificationType};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub notifications: Vec<Notification>,
}

/// Body of `POST /api/notifications`.
#[derive(Debug, Deserialize)]
pub struct MutationRequest {
    pub action: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub timestamp: Option<String>,
    pub id: Option<u64>,
}

/// A validated mutation, ready to apply to the store.
#[derive(Debug, PartialEq)]
enum Mutation {
    Add {
        message: String,
        category: NotificationType,
        timestamp: Option<String>,
    },
    MarkRead(u64),
    MarkAllRead,
}

impl TryFrom<MutationRequest> for Mutation {
    type Error = ApiError;

    fn try_from(request: MutationRequest) -> Result<Self, Self::Error> {
        match request.action.as_deref() {
            Some("add") => {
                let message = request
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .ok_or_else(|| {
                        ApiError::Validation("Missing required field: message".to_string())
                    })?;
                let category = match request.category.as_deref() {
                    Some(raw) => raw.parse().map_err(ApiError::Validation)?,
                    None => NotificationType::default(),
                };
                Ok(Mutation::Add {
                    message,
                    category,
                    timestamp: request.timestamp,
                })
            }
            Some("markRead") => request
                .id
                .map(Mutation::MarkRead)
                .ok_or_else(|| ApiError::Validation("Missing required field: id".to_string())),
            Some("markAllRead") => Ok(Mutation::MarkAllRead),
            Some(other) => Err(ApiError::Validation(format!("Unknown action: {}", other))),
            None => Err(ApiError::Validation(
                "Missing required field: action".to_string(),
            )),
        }
    }
}

/// GET /api/notifications
pub async fn list(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
) -> Result<Json<NotificationsResponse>, ApiError> {
    let notifications = state.notifications.list().await?;
    Ok(Json(NotificationsResponse { notifications }))
}

/// POST /api/notifications
pub async fn mutate(
    _session: AdminSession,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MutationRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let mutation = Mutation::try_from(request)?;

    let store = &state.notifications;
    let notifications = match mutation {
        Mutation::Add {
            message,
            category,
            timestamp,
        } => store.add(message, category, timestamp).await?,
        Mutation::MarkRead(id) => store.mark_read(id).await?,
        Mutation::MarkAllRead => store.mark_all_read().await?,
    };

    Ok(Json(MutationResponse {
        success: true,
        notifications,
    }))
}
