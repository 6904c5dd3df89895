//! Observability HTTP Routes
//!
//! Health check and request metrics.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::observability::MetricsRegistry;

/// Shared observability state
pub struct ObservabilityState {
    pub metrics: Arc<MetricsRegistry>,
    pub rules_version: u32,
    pub rule_count: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub rules_version: u32,
    pub rules: usize,
    pub timestamp: String,
}

/// Create observability routes (health available at both `/health` and `/api/health`)
pub fn observability_routes(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rules_version: state.rules_version,
        rules: state.rule_count,
        timestamp: Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}

/// Metrics handler - returns counters as JSON
async fn metrics_handler(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.metrics.to_json()))
}
