//! Health check handler

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
