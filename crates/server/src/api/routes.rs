use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, indexers, search};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Indexer management
        .route("/indexers", get(indexers::list_indexers))
        .route("/reload", post(indexers::reload))
        .route("/status", get(indexers::get_status))
        .route("/descriptors", get(indexers::list_descriptors))
        // Relay search
        .route("/search", post(search::search))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::get_metrics))
        .layer(middleware::from_fn(super::middleware::track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
