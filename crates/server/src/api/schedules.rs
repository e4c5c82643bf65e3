use std::{collections::HashMap, sync::Arc};

use crate::{dto::RouteScheduleDto, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Shuttle schedules, optionally filtered to routes calling at the given
/// comma separated stop ids.
pub async fn schedules(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let routes = match params.get("stop_ids") {
        Some(value) => {
            let stop_ids: Vec<&str> = value.split(',').map(str::trim).collect();
            state.repository.routes_for_stops(&stop_ids)
        }
        None => state.repository.shuttle_routes.iter().collect(),
    };

    let result: Vec<_> = routes
        .into_iter()
        .filter_map(RouteScheduleDto::from)
        .collect();
    Ok(Json(result).into_response())
}
