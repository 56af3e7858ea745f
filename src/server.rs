//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::{AppConfig, ProcessingResult};
use crate::services::PipelineOrchestrator;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub orchestrator: Arc<PipelineOrchestrator>,
}

/// Create application state from loaded configuration.
///
/// Must run inside a tokio runtime for the worker strategy to be picked.
pub fn create_app_state(config: AppConfig) -> AppState {
    let orchestrator = Arc::new(PipelineOrchestrator::from_config(&config.pipeline));
    AppState {
        config: Arc::new(config),
        orchestrator,
    }
}

/// Build the API router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/convert", post(handle_convert))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn handle_convert(
    axum::extract::State(state): axum::extract::State<AppState>,
    query: axum::extract::Query<api::ConvertParams>,
    body: axum::body::Bytes,
) -> Result<axum::Json<ProcessingResult>, ApiError> {
    api::handle_convert(
        axum::extract::State(state.config),
        axum::extract::State(state.orchestrator),
        query,
        body,
    )
    .await
}
