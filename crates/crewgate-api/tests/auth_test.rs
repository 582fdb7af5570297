mod common;

use axum::http::StatusCode;
use common::{TOKEN, TestApp, valid_requests};
use crewgate::MockEngine;

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let app = TestApp::new(MockEngine::replying("ok"));

    for (path, body) in valid_requests() {
        let (status, response) = app
            .post_raw(path, None, serde_json::to_string(&body).unwrap())
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response["error"], "Unauthorized");
        assert_eq!(response["message"], "Authorization header is missing");
    }
    assert_eq!(app.engine.calls(), 0);
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let app = TestApp::new(MockEngine::replying("ok"));

    for (path, body) in valid_requests() {
        let (status, response) = app
            .post_raw(
                path,
                Some("Bearer not-a-real-token"),
                serde_json::to_string(&body).unwrap(),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response["message"], "Invalid token");
    }
    assert_eq!(app.engine.calls(), 0);
}

#[tokio::test]
async fn test_malformed_header_is_unauthorized() {
    let app = TestApp::new(MockEngine::replying("ok"));

    for header in [TOKEN, "Basic dXNlcjpwYXNz", "Bearer"] {
        let (status, response) = app
            .post_raw("/analyze", Some(header), r#"{"data": 1}"#)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{header}");
        assert_eq!(response["error"], "Unauthorized");
    }
    assert_eq!(app.engine.calls(), 0);
}

#[tokio::test]
async fn test_known_tokens_pass() {
    let app = TestApp::new(MockEngine::replying("ok"));

    for token in [TOKEN, "secret-token-2"] {
        let (status, _) = app
            .post_raw(
                "/analyze",
                Some(format!("Bearer {}", token).as_str()),
                r#"{"data": 1}"#,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(app.engine.calls(), 2);
}

#[tokio::test]
async fn test_auth_runs_before_validation() {
    let app = TestApp::new(MockEngine::replying("ok"));

    let (status, _) = app.post_raw("/analyze", None, "").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = TestApp::new(MockEngine::replying("ok"));

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("Welcome to Crewgate"));

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["engine"], "MockEngine");
}

#[tokio::test]
async fn test_unknown_route_is_not_found_without_token() {
    let app = TestApp::new(MockEngine::replying("ok"));

    let (status, _) = app.post_raw("/summarize", None, "{}").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
