use std::{collections::HashMap, sync::Arc};

use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Address autocomplete proxy. Keeps the provider key off the client.
pub async fn geocode(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    if let Some(text) = params.get("text") {
        let response = state.provider.geocode(text).await.map_err(|err| {
            error!("Failed to geocode: {err}");
            StatusCode::BAD_GATEWAY
        })?;
        Ok(Json(response).into_response())
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}
