//! Indexer management handlers: options listing, reload, status and the
//! registry's descriptor view.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::error;

use jackbridge_core::{IndexerDescriptor, IndexerOption, IndexerRegistry};

use crate::state::AppState;

use super::envelope::ApiEnvelope;

/// GET /api/v1/indexers
///
/// The configured Jackett indexers as `{value, text}` picker options.
pub async fn list_indexers(
    State(state): State<Arc<AppState>>,
) -> Json<ApiEnvelope<Vec<IndexerOption>>> {
    match state.plugin().indexer_options().await {
        Ok(options) => Json(ApiEnvelope::ok(options)),
        Err(e) => Json(ApiEnvelope::fail(e.to_string())),
    }
}

/// POST /api/v1/reload
///
/// Force a full teardown and resync of the registry against Jackett's
/// current indexer set.
pub async fn reload(State(state): State<Arc<AppState>>) -> Json<ApiEnvelope<usize>> {
    match state.plugin().sync().await {
        Ok(report) => Json(ApiEnvelope::ok_with_message(
            report.registered,
            format!("Reloaded {} indexers", report.registered),
        )),
        Err(e) => {
            error!(error = %e, "Reload failed");
            Json(ApiEnvelope::fail(format!("Reload failed: {}", e)))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub enabled: bool,
    pub registered: usize,
}

/// GET /api/v1/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ApiEnvelope<StatusResponse>> {
    let registered = state.plugin().ledger_ids().await.len();
    Json(ApiEnvelope::ok(StatusResponse {
        enabled: state.plugin().status(),
        registered,
    }))
}

/// GET /api/v1/descriptors
///
/// The registry's current contents. This is how an embedding host observes
/// registration changes; no restart is required to pick them up.
pub async fn list_descriptors(
    State(state): State<Arc<AppState>>,
) -> Json<ApiEnvelope<Vec<IndexerDescriptor>>> {
    match state.registry().list().await {
        Ok(descriptors) => Json(ApiEnvelope::ok(descriptors)),
        Err(e) => Json(ApiEnvelope::fail(e.to_string())),
    }
}
