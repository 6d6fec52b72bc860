//! API index, health/readiness, and snapshot reload.

use axum::{extract::State, Json};
use disnet_common::ApiError;
use disnet_graph::store::Health;
use serde_json::{json, Value};

use crate::state::SharedState;

/// GET / - API information
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Disease Network API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/health": "Health check",
            "/network": "Get full network with optional filters",
            "/disease/{disease_id}": "Get edges for specific disease",
            "/edge/{edge_id}": "Get specific edge details",
            "/search": "Search diseases by keyword",
            "/stats": "Get network statistics",
            "/reload": "Rebuild the network from the configured source (POST)"
        }
    }))
}

/// GET /health - Loaded state and current counts
pub async fn health_check(State(state): State<SharedState>) -> Json<Health> {
    Json(state.store.health())
}

/// POST /reload - Rebuild and atomically swap the served snapshot
pub async fn reload(State(state): State<SharedState>) -> Result<Json<Health>, ApiError> {
    Ok(Json(state.reload().await?))
}
