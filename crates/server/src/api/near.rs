use std::{collections::HashMap, sync::Arc};

use crate::{
    api::coordinate_from_str,
    dto::{NearbyStopDto, NearbySummaryDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pendler::{
    repository::{DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_RADIUS},
    shared::geo::Distance,
};

pub async fn near(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let at = params.get("at").ok_or(StatusCode::BAD_REQUEST)?;
    let origin = coordinate_from_str(at)?;
    let radius = match params.get("radius_km") {
        Some(value) => match value.parse::<f64>() {
            Ok(value) => Distance::from_kilometers(value),
            Err(_) => return Err(StatusCode::BAD_REQUEST),
        },
        None => DEFAULT_SEARCH_RADIUS,
    };
    let count: usize = match params.get("count") {
        Some(value) => match value.parse() {
            Ok(value) => value,
            Err(_) => return Err(StatusCode::BAD_REQUEST),
        },
        None => DEFAULT_MAX_RESULTS,
    };

    let result: Vec<_> = state
        .repository
        .nearby_stops(&origin, radius, count)
        .iter()
        .map(NearbyStopDto::from)
        .collect();
    Ok(Json(result).into_response())
}

pub async fn near_summary(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let at = params.get("at").ok_or(StatusCode::BAD_REQUEST)?;
    let origin = coordinate_from_str(at)?;
    let radius = match params.get("radius_km") {
        Some(value) => match value.parse::<f64>() {
            Ok(value) => Distance::from_kilometers(value),
            Err(_) => return Err(StatusCode::BAD_REQUEST),
        },
        None => DEFAULT_SEARCH_RADIUS,
    };

    let summary = state.repository.nearby_summary(&origin, radius);
    Ok(Json(NearbySummaryDto::from(&summary)).into_response())
}
