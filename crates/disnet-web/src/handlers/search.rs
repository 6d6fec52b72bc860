//! Keyword search over disease labels and ids.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use disnet_common::{ApiError, NetworkError};
use disnet_graph::query::SearchResults;
use serde::Deserialize;

use crate::handlers::network::bad_query;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
}

/// GET /search?keyword=... - Case-insensitive substring search
pub async fn search_diseases(
    State(state): State<SharedState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResults>, ApiError> {
    let Query(query) = query.map_err(bad_query)?;
    let keyword = query
        .keyword
        .ok_or_else(|| NetworkError::Validation("missing query parameter 'keyword'".to_string()))?;

    let engine = state.store.engine()?;
    Ok(Json(engine.search(&keyword)?))
}
