//! Network listing and per-disease / per-edge detail endpoints.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use disnet_common::{ApiError, NetworkError};
use disnet_graph::query::{EdgeDetail, EdgeFilter, NetworkView, NodeEdges};

use crate::state::SharedState;

/// Turn an extractor rejection into the API's JSON validation error.
pub(crate) fn bad_query(rejection: QueryRejection) -> ApiError {
    ApiError(NetworkError::Validation(rejection.body_text()))
}

/// GET /network - Edges filtered by weight / interpretability, optionally limited
pub async fn get_network(
    State(state): State<SharedState>,
    filter: Result<Query<EdgeFilter>, QueryRejection>,
) -> Result<Json<NetworkView>, ApiError> {
    let Query(filter) = filter.map_err(bad_query)?;
    filter.validate(state.config.query.max_limit)?;

    let engine = state.store.engine()?;
    Ok(Json(engine.filter_edges(&filter)?))
}

/// GET /disease/{disease_id} - All edges touching one disease pair
pub async fn get_disease_edges(
    State(state): State<SharedState>,
    Path(disease_id): Path<String>,
) -> Result<Json<NodeEdges>, ApiError> {
    let engine = state.store.engine()?;
    Ok(Json(engine.get_node_edges(&disease_id)?))
}

/// GET /edge/{edge_id} - One edge with its endpoints and derived metrics
pub async fn get_edge_detail(
    State(state): State<SharedState>,
    Path(edge_id): Path<String>,
) -> Result<Json<EdgeDetail>, ApiError> {
    let engine = state.store.engine()?;
    Ok(Json(engine.get_edge(&edge_id)?))
}
