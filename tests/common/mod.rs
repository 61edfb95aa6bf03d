//! Shared test utilities for the dashboard integration tests.
//!
//! Builds an in-process router over a temp notification store, fixed
//! resource stats and unreachable default candidates, plus helpers for
//! driving it with `tower::Service::call`.

#![allow(dead_code)]

use ario_admin::api::{create_router, AppState};
use ario_admin::auth::SESSION_COOKIE;
use ario_admin::config::{AdminConfig, ServiceEndpoints};
use ario_admin::system::{ResourceProbe, ResourceStats, StatsError};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::Service;

// =============================================================================
// Well-Known Test Constants
// =============================================================================

pub const TEST_USERNAME: &str = "operator";
pub const TEST_PASSWORD: &str = "correct horse battery staple";
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const TEST_ADMIN_KEY: &str = "server-side-admin-key";

/// Address that refuses connections immediately.
pub const REFUSED_URL: &str = "http://127.0.0.1:1";

pub const FIXED_STATS: ResourceStats = ResourceStats {
    cpu: 12.5,
    memory: 40.0,
    disk: 55.1,
    simulated: false,
};

/// Probe returning `FIXED_STATS`.
pub struct FixedProbe;

#[async_trait]
impl ResourceProbe for FixedProbe {
    async fn sample(&self) -> Result<ResourceStats, StatsError> {
        Ok(FIXED_STATS)
    }
}

// =============================================================================
// App Builders
// =============================================================================

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    /// Keeps the notification directory alive
    pub dir: TempDir,
}

impl TestApp {
    pub fn notifications_path(&self) -> PathBuf {
        self.state.config.notifications.path.clone()
    }

    /// Cookie header value carrying a freshly issued session.
    pub fn session_cookie(&self) -> String {
        let (token, _) = self.state.sessions.issue().unwrap();
        format!("{}={}", SESSION_COOKIE, token)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().call(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: bytes.to_vec(),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response body is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

fn unreachable_endpoints(path: &str) -> ServiceEndpoints {
    let mut endpoints = ServiceEndpoints::new(&[REFUSED_URL], path);
    endpoints.timeout_seconds = 1;
    endpoints
}

/// Config with test credentials, a temp store path and unreachable services.
pub fn test_config(dir: &TempDir) -> AdminConfig {
    let mut config = AdminConfig::default();
    config.auth.username = Some(TEST_USERNAME.to_string());
    config.auth.password = Some(TEST_PASSWORD.to_string());
    config.auth.secret = Some(TEST_SECRET.to_string());
    config.admin.api_key = Some(TEST_ADMIN_KEY.to_string());
    config.notifications.path = dir.path().join("data").join("notifications.json");
    config.server.request_timeout_seconds = 5;
    config.services.gateway = unreachable_endpoints("/ar-io/info");
    config.services.bundler = unreachable_endpoints("/bundler/info");
    config.services.ao_cu = unreachable_endpoints("/");
    config.services.observer = unreachable_endpoints("/ar-io/observer/reports/current");
    config
}

/// Build an app from a config customized by `customize`.
pub fn make_app_with(customize: impl FnOnce(&mut AdminConfig)) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    customize(&mut config);
    config.validate().unwrap();

    let state = Arc::new(
        AppState::new(Arc::new(config))
            .unwrap()
            .with_resource_probe(Arc::new(FixedProbe)),
    );
    let router = create_router(Arc::clone(&state));
    TestApp { router, state, dir }
}

pub fn make_app() -> TestApp {
    make_app_with(|_| {})
}

// =============================================================================
// Request Builders
// =============================================================================

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
