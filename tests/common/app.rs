//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use beadgrid::models::AppConfig;
use beadgrid::server::{build_router, create_app_state, AppState};
use beadgrid::services::PipelineOrchestrator;

/// Test application with router and direct access to the orchestrator
pub struct TestApp {
    router: axum::Router,
    pub orchestrator: Arc<PipelineOrchestrator>,
}

impl TestApp {
    /// Create a new test application with default configuration.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = create_app_state(config);
        Self::from_state(state)
    }

    /// Create a test application from prepared state
    pub fn from_state(state: AppState) -> Self {
        // Keep references for test assertions
        let orchestrator = state.orchestrator.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self {
            router,
            orchestrator,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// POST a PNG body to the given path (query string included)
    pub async fn post_png(&self, path: &str, png: Vec<u8>) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "image/png")
            .body(Body::from(png))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}
