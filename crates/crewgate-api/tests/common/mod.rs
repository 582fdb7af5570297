#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use crewgate::{CrewService, FeatureFlags, MockEngine};
use crewgate_api::{ApiConfig, AppState, TokenTable, build_app};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TOKEN: &str = "secret-token-1";

/// Test application backed by a mock engine
pub struct TestApp {
    pub app: axum::Router,
    pub state: AppState,
    pub engine: Arc<MockEngine>,
}

impl TestApp {
    pub fn new(engine: MockEngine) -> Self {
        Self::with_features(engine, FeatureFlags::all_enabled())
    }

    pub fn with_features(engine: MockEngine, features: FeatureFlags) -> Self {
        let engine = Arc::new(engine);
        let tokens = TokenTable::new([
            (TOKEN.to_string(), "user1".to_string()),
            ("secret-token-2".to_string(), "user2".to_string()),
        ]);
        let state = AppState::new(CrewService::new(engine.clone()), tokens, features);
        let config = ApiConfig {
            enable_swagger: false,
            ..ApiConfig::default()
        };
        let app = build_app(state.clone(), &config);

        Self { app, state, engine }
    }

    /// POST a raw body with an optional Authorization header value
    pub async fn post_raw(
        &self,
        uri: &str,
        authorization: Option<&str>,
        body: impl Into<Body>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }

        self.send(builder.body(body.into()).unwrap()).await
    }

    /// POST JSON with the default valid token
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(
            uri,
            Some(format!("Bearer {}", TOKEN).as_str()),
            serde_json::to_string(&body).unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// GET with the default valid token
    pub async fn get_authorized(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {}", TOKEN))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_value: Value = if body_bytes.is_empty() {
            json!(null)
        } else {
            match serde_json::from_slice(&body_bytes) {
                Ok(json) => json,
                Err(_) => {
                    // If JSON parsing fails, return the raw text as a string
                    let text = String::from_utf8_lossy(&body_bytes);
                    json!(text.to_string())
                }
            }
        };

        (status, body_value)
    }
}

/// A JSON-looking body well over the default 2 MiB request limit
pub fn oversized_body() -> Vec<u8> {
    let mut body = br#"{"data": ""#.to_vec();
    body.resize(3 * 1024 * 1024, b'x');
    body.extend_from_slice(br#""}"#);
    body
}

/// Every capability path with a body that passes validation
pub fn valid_requests() -> Vec<(&'static str, Value)> {
    vec![
        ("/analyze", json!({"data": "test data"})),
        ("/recommend", json!({"user": "test user"})),
        ("/sentiment", json!({"text": "I love this product"})),
        (
            "/generate-content",
            json!({"topic": "Rust", "content_type": "blog post"}),
        ),
        (
            "/comprehensive-analysis",
            json!({"reviews": ["great", "slow shipping"]}),
        ),
    ]
}
