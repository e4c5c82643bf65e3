use std::{collections::HashMap, sync::Arc};

use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::future::join_all;
use pendler::{
    map::assemble,
    routing::{GeocodedAddress, RoutingResponse, TransportMode},
    shared::geo::Units,
};
use tracing::error;

/// Runs one full commute analysis: geocode the home address, request a
/// route per enabled mode, then assemble scores and map data. Modes whose
/// request or normalization fails are skipped, the rest still score.
pub async fn analyze(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let home_query = params.get("home").ok_or(StatusCode::BAD_REQUEST)?;
    let building_name = params.get("building").ok_or(StatusCode::BAD_REQUEST)?;
    let building = state
        .repository
        .building_by_name(building_name)
        .ok_or(StatusCode::NOT_FOUND)?
        .clone();

    let include_connector = params
        .get("connector")
        .is_some_and(|value| value == "1" || value == "true");
    let units = match params.get("units").map(String::as_str) {
        Some("imperial") => Units::Imperial,
        _ => Units::Metric,
    };
    let modes = parse_modes(params.get("modes"))?;

    let geocoded = state.provider.geocode(home_query).await.map_err(|err| {
        error!("Failed to geocode home address: {err}");
        StatusCode::BAD_GATEWAY
    })?;
    let home =
        GeocodedAddress::from_geocode(home_query, &geocoded).ok_or(StatusCode::NOT_FOUND)?;

    // Mode pipelines are independent, so all requests go out together.
    let requests = modes
        .iter()
        .map(|mode| state.provider.route(home.coordinate, building.coordinate, *mode));
    let responses = join_all(requests).await;

    let mut results: Vec<(TransportMode, RoutingResponse)> = Vec::new();
    for (mode, response) in modes.iter().zip(responses) {
        match response {
            Ok(data) => results.push((*mode, data)),
            Err(err) => error!("Routing request for {mode} failed: {err}"),
        }
    }

    let report = assemble(
        &state.repository,
        &home,
        &building,
        &results,
        include_connector,
        units,
    );
    Ok(Json(report).into_response())
}

/// Parses the comma separated mode list, defaulting to drive only. The
/// connector is handled separately and never requested from the provider.
fn parse_modes(value: Option<&String>) -> Result<Vec<TransportMode>, StatusCode> {
    let Some(value) = value else {
        return Ok(vec![TransportMode::Drive]);
    };
    let mut modes = Vec::new();
    for token in value.split(',') {
        let mode = TransportMode::parse(token.trim()).ok_or(StatusCode::BAD_REQUEST)?;
        if mode != TransportMode::Transit && !modes.contains(&mode) {
            modes.push(mode);
        }
    }
    if modes.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(modes)
}
