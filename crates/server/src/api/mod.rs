mod analyze;
mod explore;
mod geocode;
mod near;
mod schedules;
mod search;

pub use analyze::*;
pub use explore::*;
pub use geocode::*;
pub use near::*;
pub use schedules::*;
pub use search::*;

use axum::http::StatusCode;
use pendler::shared::geo::Coordinate;

/// Parses a "lat,lng" query value.
pub(crate) fn coordinate_from_str(value: &str) -> Result<Coordinate, StatusCode> {
    let mut split = value.split(',');
    let latitude: f64 = split
        .next()
        .ok_or(StatusCode::BAD_REQUEST)?
        .trim()
        .parse()
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    let longitude: f64 = split
        .next()
        .ok_or(StatusCode::BAD_REQUEST)?
        .trim()
        .parse()
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    if split.next().is_some() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Coordinate {
        latitude,
        longitude,
    })
}
