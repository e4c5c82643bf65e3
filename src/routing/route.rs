use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{
    routing::{GeocodeResponse, TransportMode},
    shared::geo::{Coordinate, Position},
};

/// An address resolved to a coordinate. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    /// The text the user typed.
    pub original: String,
    /// The provider formatted display string.
    pub formatted: String,
    pub coordinate: Coordinate,
}

impl GeocodedAddress {
    pub fn new(original: impl Into<String>, formatted: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            original: original.into(),
            formatted: formatted.into(),
            coordinate,
        }
    }

    /// Takes the first geocoding hit as the match for `original`.
    pub fn from_geocode(original: &str, response: &GeocodeResponse) -> Option<Self> {
        let hit = response.results.first()?;
        Some(Self {
            original: original.to_string(),
            formatted: hit.formatted.clone(),
            coordinate: Coordinate {
                latitude: hit.lat,
                longitude: hit.lon,
            },
        })
    }

    /// Placeholder endpoint used when geocode data is missing, so degraded
    /// results can still be rendered.
    pub(crate) fn unknown() -> Self {
        Self {
            original: "Unknown".into(),
            formatted: "Unknown location".into(),
            coordinate: Coordinate::default(),
        }
    }
}

/// Map ready metadata for a single normalized route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteProperties {
    pub mode: TransportMode,
    /// Meters, never negative. Zero when the provider omitted it.
    pub distance: f64,
    /// Seconds, never negative. Zero when the provider omitted it.
    pub time: f64,
    pub distance_formatted: String,
    pub time_formatted: String,
    pub description: Option<String>,
    pub color: String,
}

/// The canonical, map ready form of one provider routing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRoute {
    pub id: String,
    /// Polyline positions, longitude first. Empty on a failed normalization.
    pub geometry: Vec<Position>,
    pub properties: RouteProperties,
}

/// Full normalization result, including the degraded error shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteMapData {
    pub start: GeocodedAddress,
    pub end: GeocodedAddress,
    pub route: NormalizedRoute,
    pub waypoints: Vec<Coordinate>,
    pub success: bool,
    pub error: Option<String>,
}

/// Deterministic route id for a (start, end, mode) triple. Stable within a
/// process so callers can use it for caching and deduplication.
pub fn route_id(start: &str, end: &str, mode: TransportMode) -> String {
    let mut hasher = DefaultHasher::new();
    start.hash(&mut hasher);
    end.hash(&mut hasher);
    mode.as_str().hash(&mut hasher);
    format!("route-{}-{:08x}", mode, hasher.finish() as u32)
}

#[test]
fn route_id_is_deterministic() {
    let a = route_id("123 Main St", "BUILDING 109", TransportMode::Drive);
    let b = route_id("123 Main St", "BUILDING 109", TransportMode::Drive);
    assert_eq!(a, b);
}

#[test]
fn route_id_differs_per_triple() {
    let drive = route_id("123 Main St", "BUILDING 109", TransportMode::Drive);
    let bike = route_id("123 Main St", "BUILDING 109", TransportMode::Bike);
    let other_start = route_id("456 Pine St", "BUILDING 109", TransportMode::Drive);
    assert_ne!(drive, bike);
    assert_ne!(drive, other_start);
}
