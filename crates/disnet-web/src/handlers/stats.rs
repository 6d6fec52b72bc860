//! Network statistics.

use axum::{extract::State, Json};
use disnet_common::ApiError;
use disnet_graph::NetworkStatistics;

use crate::state::SharedState;

/// GET /stats - Weight distribution and interpretability counts
pub async fn get_statistics(
    State(state): State<SharedState>,
) -> Result<Json<NetworkStatistics>, ApiError> {
    let engine = state.store.engine()?;
    Ok(Json(engine.statistics().clone()))
}
