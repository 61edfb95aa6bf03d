//! Unit tests for the service locator.

use super::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens on port 1; connections are refused immediately.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:1";

fn endpoints(candidates: Vec<String>, probe_path: &str) -> ServiceEndpoints {
    ServiceEndpoints {
        candidates,
        probe_path: probe_path.to_string(),
        timeout_seconds: 1,
    }
}

fn locator(candidates: Vec<String>, probe_path: &str) -> ServiceLocator {
    ServiceLocator::new("gateway", endpoints(candidates, probe_path), reqwest::Client::new())
}

// ============================================================================
// URL joining
// ============================================================================

#[test]
fn test_join_url_variants() {
    assert_eq!(join_url("http://a:1", "/info"), "http://a:1/info");
    assert_eq!(join_url("http://a:1/", "/info"), "http://a:1/info");
    assert_eq!(join_url("http://a:1", "info"), "http://a:1/info");
    assert_eq!(join_url("http://a:1/", ""), "http://a:1");
    assert_eq!(join_url("http://a:1", "/"), "http://a:1/");
}

// ============================================================================
// Sequential fallback
// ============================================================================

#[tokio::test]
async fn test_first_candidate_success_stops_immediately() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ar-io/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"release": "r42"})))
        .expect(1)
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&second)
        .await;

    let located = locator(vec![first.uri(), second.uri()], "/ar-io/info")
        .locate()
        .await
        .unwrap();

    assert_eq!(located.endpoint, first.uri());
    assert_eq!(located.index, 0);
    assert_eq!(located.body["release"], "r42");
}

#[tokio::test]
async fn test_two_failures_then_success_skips_later_candidates() {
    let failing_http = MockServer::start().await;
    let answering = MockServer::start().await;
    let never_called = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&failing_http)
        .await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&answering)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&never_called)
        .await;

    let candidates = vec![
        DEAD_ENDPOINT.to_string(),
        failing_http.uri(),
        answering.uri(),
        never_called.uri(),
    ];
    let located = locator(candidates, "/info").locate().await.unwrap();

    assert_eq!(located.endpoint, answering.uri());
    assert_eq!(located.index, 2);
    assert_eq!(located.body, json!({"ok": true}));
    // `expect(0)` on `never_called` is verified when the server drops
}

#[tokio::test]
async fn test_all_failing_reports_last_error_and_candidates() {
    let first = MockServer::start().await;
    let last = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&last)
        .await;

    let candidates = vec![first.uri(), DEAD_ENDPOINT.to_string(), last.uri()];
    let err = locator(candidates.clone(), "/").locate().await.unwrap_err();

    match err {
        LocatorError::AllFailed {
            service,
            last_error,
            candidates: tried,
        } => {
            assert_eq!(service, "gateway");
            assert_eq!(last_error, ProbeError::HttpError(404));
            assert_eq!(tried, candidates);
        }
        other => panic!("Expected AllFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_connection_failed() {
    let err = locator(vec![DEAD_ENDPOINT.to_string()], "/")
        .locate()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LocatorError::AllFailed {
            last_error: ProbeError::ConnectionFailed(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_slow_candidate_times_out_and_falls_through() {
    let slow = MockServer::start().await;
    let fast = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"slow": true}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&slow)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fast": true})))
        .mount(&fast)
        .await;

    let start = std::time::Instant::now();
    let located = locator(vec![slow.uri(), fast.uri()], "/")
        .locate()
        .await
        .unwrap();

    assert_eq!(located.endpoint, fast.uri());
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_slow_only_candidate_reports_timeout() {
    let slow = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&slow)
        .await;

    let err = locator(vec![slow.uri()], "/").locate().await.unwrap_err();
    assert!(matches!(
        err,
        LocatorError::AllFailed {
            last_error: ProbeError::Timeout(1),
            ..
        }
    ));
}

#[tokio::test]
async fn test_non_json_success_is_rejected() {
    let html = MockServer::start().await;
    let json_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nginx</html>"))
        .mount(&html)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": 1})))
        .mount(&json_server)
        .await;

    let located = locator(vec![html.uri(), json_server.uri()], "/")
        .locate()
        .await
        .unwrap();
    assert_eq!(located.index, 1);
}

#[tokio::test]
async fn test_every_call_restarts_from_first_candidate() {
    let flaky = MockServer::start().await;
    let stable = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&flaky)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&stable)
        .await;

    let locator = locator(vec![flaky.uri(), stable.uri()], "/");
    locator.locate().await.unwrap();
    locator.locate().await.unwrap();
}

#[tokio::test]
async fn test_locate_path_overrides_probe_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/custom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"custom": true})))
        .expect(1)
        .mount(&server)
        .await;

    let located = locator(vec![server.uri()], "/default")
        .locate_path("/custom")
        .await
        .unwrap();
    assert_eq!(located.body["custom"], true);
}

#[tokio::test]
async fn test_empty_candidate_list() {
    let err = locator(vec![], "/").locate().await.unwrap_err();
    assert!(matches!(err, LocatorError::NoCandidates { ref service } if service == "gateway"));
}
