use std::{collections::HashMap, sync::Arc};

use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pendler::{
    map::{ExplorerQuery, explorer_map},
    routing::TransportMode,
};

/// The precomputed-isochrone browse mode: which stops and reachability
/// polygons fit a commute budget, without calling the routing provider.
pub async fn explore(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let method = match params.get("method") {
        Some(value) => Some(TransportMode::parse(value).ok_or(StatusCode::BAD_REQUEST)?),
        None => None,
    };
    let radius_minutes = match params.get("radius_minutes") {
        Some(value) => Some(value.parse().map_err(|_| StatusCode::BAD_REQUEST)?),
        None => None,
    };
    let total_minutes = match params.get("total_minutes") {
        Some(value) => Some(value.parse().map_err(|_| StatusCode::BAD_REQUEST)?),
        None => None,
    };

    let query = ExplorerQuery {
        method,
        building: params.get("building").cloned(),
        radius_minutes,
        total_minutes,
    };
    let map = explorer_map(&state.repository, &query);
    Ok(Json(map).into_response())
}
