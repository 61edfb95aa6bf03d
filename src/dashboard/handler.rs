//! HTTP handlers for dashboard routes

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use rust_embed::RustEmbed;
use serde_json::json;
use std::sync::Arc;

use crate::api::AppState;
use crate::auth::AdminSession;

/// Placeholder for the base path in asset URLs.
const BASE_PATH_PLACEHOLDER: &str = "{{basePath}}";

/// Placeholder replaced with the page's initial data.
const INITIAL_DATA_PLACEHOLDER: &str =
    r#"<script id="initial-data" type="application/json">{}</script>"#;

/// Embedded dashboard assets from dashboard/ directory
#[derive(RustEmbed)]
#[folder = "dashboard/"]
struct DashboardAssets;

/// Serves the dashboard, or redirects to the sign-in page without a session
pub async fn dashboard_handler(
    session: Option<AdminSession>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let server = &state.config.server;
    let Some(session) = session else {
        return Redirect::to(&server.url_for("/login")).into_response();
    };

    let initial_data = json!({
        "basePath": server.base_path,
        "user": { "name": session.claims.name },
    });
    render_page("index.html", &server.base_path, &initial_data)
}

/// Serves the sign-in page; signed-in users go straight to the dashboard
pub async fn login_handler(
    session: Option<AdminSession>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let server = &state.config.server;
    if session.is_some() {
        return Redirect::to(server.root_url()).into_response();
    }

    let initial_data = json!({
        "basePath": server.base_path,
        "user": null,
    });
    render_page("login.html", &server.base_path, &initial_data)
}

/// Serves static assets (CSS, JS, etc.)
pub async fn assets_handler(Path(path): Path<String>) -> Response {
    match DashboardAssets::get(&path) {
        Some(content) => {
            let body = content.data;
            let mime_type = mime_guess::from_path(&path).first_or_octet_stream();

            ([(header::CONTENT_TYPE, mime_type.as_ref())], body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}

fn render_page(name: &str, base_path: &str, initial_data: &serde_json::Value) -> Response {
    let Some(content) = DashboardAssets::get(name) else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Dashboard HTML not found").into_response();
    };

    let html = match std::str::from_utf8(&content.data) {
        Ok(html) => html,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid HTML encoding").into_response()
        }
    };

    let html = html.replace(BASE_PATH_PLACEHOLDER, base_path);
    Html(inject_initial_data(&html, initial_data)).into_response()
}

/// Fill the `initial-data` script tag. `</` is escaped so the JSON cannot
/// close the tag early.
pub fn inject_initial_data(html: &str, initial_data: &serde_json::Value) -> String {
    let data = initial_data.to_string().replace("</", "<\\/");
    html.replace(
        INITIAL_DATA_PLACEHOLDER,
        &format!(
            r#"<script id="initial-data" type="application/json">{}</script>"#,
            data
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_initial_data() {
        let html = format!("<body>{}</body>", INITIAL_DATA_PLACEHOLDER);
        let out = inject_initial_data(&html, &json!({ "basePath": "/admin" }));
        assert!(out.contains(r#"{"basePath":"/admin"}"#));
        assert!(!out.contains("json\">{}<"));
    }

    #[test]
    fn test_inject_escapes_closing_tags() {
        let out = inject_initial_data(
            INITIAL_DATA_PLACEHOLDER,
            &json!({ "user": { "name": "</script><b>" } }),
        );
        assert!(out.contains(r#"<\/script><b>"#));
        assert_eq!(out.matches("</script>").count(), 1);
    }

    #[test]
    fn test_embedded_pages_carry_placeholder() {
        for page in ["index.html", "login.html"] {
            let content = DashboardAssets::get(page).unwrap();
            let html = std::str::from_utf8(&content.data).unwrap();
            assert!(
                html.contains(INITIAL_DATA_PLACEHOLDER),
                "{} is missing the initial-data tag",
                page
            );
        }
    }

    #[tokio::test]
    async fn test_assets_handler_not_found() {
        let response = assets_handler(Path("totally_nonexistent_file_xyz.wasm".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_assets_handler_serves_css() {
        let response = assets_handler(Path("styles.css".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let ct = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(ct.contains("css"), "Expected CSS content type, got: {}", ct);
    }

    #[tokio::test]
    async fn test_assets_handler_serves_js() {
        let response = assets_handler(Path("app.js".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let ct = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(
            ct.contains("javascript"),
            "Expected JS content type, got: {}",
            ct
        );
    }
}
