//! Health, config and metrics handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use jackbridge_core::SanitizedConfig;

use crate::metrics;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/v1/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/v1/config
///
/// The running configuration with secrets redacted.
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

/// GET /metrics
pub async fn get_metrics() -> String {
    metrics::gather()
}
