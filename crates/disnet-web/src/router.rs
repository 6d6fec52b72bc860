//! Axum router: maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    network::{get_network, get_disease_edges, get_edge_detail},
    search::search_diseases,
    stats::get_statistics,
    system::{root, health_check, reload},
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let cors = state.config.server.cors_permissive;
    let shared: SharedState = Arc::new(state);

    let router = Router::new()
        .route("/",                     get(root))
        .route("/health",               get(health_check))
        .route("/network",              get(get_network))
        .route("/disease/{disease_id}", get(get_disease_edges))
        .route("/edge/{edge_id}",       get(get_edge_detail))
        .route("/search",               get(search_diseases))
        .route("/stats",                get(get_statistics))
        .route("/reload",               post(reload));

    let router = if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
