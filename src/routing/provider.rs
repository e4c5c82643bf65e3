use serde::{Deserialize, Serialize};

use crate::shared::geo::Position;

/// Raw routing provider payload. Everything except the geometry tag and its
/// coordinates is optional, and unknown fields are ignored rather than
/// rejected since the payload is not under our control.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingResponse {
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteFeature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureProperties {
    /// Route length in meters.
    pub distance: Option<f64>,
    /// Travel time in seconds.
    pub time: Option<f64>,
    pub way_points: Option<Vec<String>>,
}

/// Route geometry as sent by the provider. Positions are longitude first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    #[serde(other)]
    Unsupported,
}

/// Geocoding provider payload. The first result is treated as the match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeHit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeHit {
    pub formatted: String,
    pub lat: f64,
    pub lon: f64,
}
