//! Relay search handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use jackbridge_core::SearchHit;

use crate::state::AppState;

use super::envelope::ApiEnvelope;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub keyword: String,
}

/// POST /api/v1/search
///
/// Relay a keyword search across the whitelisted indexers and return the
/// normalized hits in indexer order.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Json<ApiEnvelope<Vec<SearchHit>>> {
    let keyword = body.keyword.trim();
    if keyword.is_empty() {
        return Json(ApiEnvelope::fail("keyword must not be empty"));
    }

    match state.plugin().search(keyword).await {
        Ok(hits) => Json(ApiEnvelope::ok(hits)),
        Err(e) => Json(ApiEnvelope::fail(e.to_string())),
    }
}
