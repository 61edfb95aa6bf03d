//! # Dashboard API
//!
//! HTTP endpoints behind the admin dashboard. Apart from `/api/auth/*` and
//! the sign-in page, every route requires a valid admin session.
//!
//! ## Endpoints
//!
//! - `POST /api/auth/signin`, `GET /api/auth/session`, `POST /api/auth/signout`
//! - `POST /api/admin/{block-data,block-name,unblock-name,queue-tx,prune,bundle-status}`
//! - `POST /api/admin/export-parquet`, `POST /api/admin/export-parquet/status`
//! - `GET /api/gateway-info`, `GET /api/ao-cu`, `GET /api/bundler/info`,
//!   `GET /api/observer/current-report`
//! - `GET /api/system/stats`, `GET /api/admin-key`
//! - `GET|POST /api/notifications`
//! - `GET /`, `GET /login`, `GET /assets/*` (embedded UI)
//!
//! When `server.base_path` is set, everything is nested under it.
//!
//! ## Example
//!
//! ```no_run
//! use ario_admin::api::{create_router, AppState};
//! use ario_admin::config::AdminConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(AdminConfig::default());
//! let state = Arc::new(AppState::new(config)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3100").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

mod admin;
mod error;
mod notifications;
mod services;
mod system;

pub use error::ApiError;
pub use services::{narrow_observer_report, OBSERVER_REPORT_FIELDS};

use crate::auth::{self, SessionManager};
use crate::config::AdminConfig;
use crate::dashboard;
use crate::locator::ServiceLocators;
use crate::logging;
use crate::notifications::NotificationStore;
use crate::system::{ResourceProbe, ShellProbe};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1 MB).
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<AdminConfig>,
    pub sessions: SessionManager,
    /// Client for forwarded admin calls, bounded by `request_timeout_seconds`
    pub http_client: reqwest::Client,
    pub locators: ServiceLocators,
    pub notifications: NotificationStore,
    pub resources: Arc<dyn ResourceProbe>,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// Without `auth.secret` a random secret is used, so sessions do not
    /// survive a restart.
    pub fn new(config: Arc<AdminConfig>) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout_seconds))
            .build()?;

        // Probes carry their own per-attempt timeouts
        let probe_client = reqwest::Client::builder().build()?;

        let secret = config
            .auth
            .secret
            .clone()
            .unwrap_or_else(auth::generate_secret);
        let sessions = SessionManager::new(&secret, config.auth.session_max_age_seconds);

        Ok(Self {
            sessions,
            http_client,
            locators: ServiceLocators::from_config(&config.services, probe_client),
            notifications: NotificationStore::new(config.notifications.path.clone()),
            resources: Arc::new(ShellProbe::default()),
            config,
        })
    }

    /// Replace the resource probe (used by tests).
    pub fn with_resource_probe(mut self, probe: Arc<dyn ResourceProbe>) -> Self {
        self.resources = probe;
        self
    }
}

/// Create the main router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        // Authentication
        .route("/api/auth/signin", post(auth::routes::sign_in))
        .route("/api/auth/session", get(auth::routes::session))
        .route("/api/auth/signout", post(auth::routes::sign_out))
        // Gateway admin proxy
        .route("/api/admin/block-data", post(admin::block_data))
        .route("/api/admin/block-name", post(admin::block_name))
        .route("/api/admin/unblock-name", post(admin::unblock_name))
        .route("/api/admin/queue-tx", post(admin::queue_tx))
        .route("/api/admin/export-parquet", post(admin::export_parquet))
        .route(
            "/api/admin/export-parquet/status",
            post(admin::export_parquet_status),
        )
        .route("/api/admin/prune", post(admin::prune))
        .route("/api/admin/bundle-status", post(admin::bundle_status))
        // Service discovery
        .route("/api/gateway-info", get(services::gateway_info))
        .route("/api/ao-cu", get(services::ao_cu_info))
        .route("/api/bundler/info", get(services::bundler_info))
        .route(
            "/api/observer/current-report",
            get(services::observer_report),
        )
        // Host and dashboard state
        .route("/api/system/stats", get(system::stats))
        .route("/api/admin-key", get(system::admin_key))
        .route(
            "/api/notifications",
            get(notifications::list).post(notifications::mutate),
        )
        // Embedded UI
        .route("/", get(dashboard::dashboard_handler))
        .route("/login", get(dashboard::login_handler))
        .route("/assets/*path", get(dashboard::assets_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(middleware::from_fn(logging::propagate_request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&state));

    let base_path = &state.config.server.base_path;
    if base_path.is_empty() {
        routes
    } else {
        Router::new().nest(base_path, routes)
    }
}
