use std::{collections::HashMap, sync::Arc};

use crate::{dto::StopDto, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Serialize)]
struct BuildingDto {
    id: String,
    name: String,
    building_name: String,
}

pub async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let Some(query) = params.get("q") else {
        return Err(StatusCode::BAD_REQUEST);
    };
    let count: usize = match params.get("count") {
        Some(value) => match value.parse() {
            Ok(value) => value,
            Err(_) => return Err(StatusCode::BAD_REQUEST),
        },
        None => 5,
    };

    match params.get("kind").map(String::as_str) {
        Some("buildings") => {
            let result: Vec<_> = state
                .repository
                .search_buildings_by_name(query)
                .into_iter()
                .take(count)
                .map(|building| BuildingDto {
                    id: building.id.to_string(),
                    name: building.name.to_string(),
                    building_name: building.building_name.to_string(),
                })
                .collect();
            Ok(Json(result).into_response())
        }
        Some("stops") | None => {
            let result: Vec<_> = state
                .repository
                .search_stops_by_name(query)
                .into_iter()
                .take(count)
                .map(StopDto::from)
                .collect();
            Ok(Json(result).into_response())
        }
        Some(_) => Err(StatusCode::BAD_REQUEST),
    }
}
