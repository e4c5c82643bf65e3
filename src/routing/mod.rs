use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod provider;
mod route;
pub use provider::*;
pub use route::*;

use crate::shared::{
    geo::{Distance, Units},
    time::Duration,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("no route found in response")]
    NoRoute,
    #[error("unsupported geometry type")]
    UnsupportedGeometry,
    #[error("route geometry has no paths")]
    EmptyGeometry,
    #[error("missing geocoded endpoint")]
    MissingEndpoint,
}

/// Transport modes understood by the routing provider. Only drive, transit,
/// walk and bike take part in scoring, the rest exist for completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Drive,
    Transit,
    Walk,
    Bike,
    Truck,
    Taxi,
}

impl TransportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Drive => "drive",
            TransportMode::Transit => "transit",
            TransportMode::Walk => "walk",
            TransportMode::Bike => "bike",
            TransportMode::Truck => "truck",
            TransportMode::Taxi => "taxi",
        }
    }

    /// Polyline color used when the route is rendered.
    pub const fn color(&self) -> &'static str {
        match self {
            TransportMode::Drive => "#3b82f6",
            TransportMode::Transit => "#10b981",
            TransportMode::Walk => "#8b5cf6",
            TransportMode::Bike => "#f59e0b",
            TransportMode::Truck => "#ef4444",
            TransportMode::Taxi => "#06b6d4",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            TransportMode::Drive => "Driving",
            TransportMode::Transit => "Transit",
            TransportMode::Walk => "Walking",
            TransportMode::Bike => "Biking",
            TransportMode::Truck => "Truck",
            TransportMode::Taxi => "Taxi",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "drive" => Some(TransportMode::Drive),
            "transit" => Some(TransportMode::Transit),
            "walk" => Some(TransportMode::Walk),
            "bike" => Some(TransportMode::Bike),
            "truck" => Some(TransportMode::Truck),
            "taxi" => Some(TransportMode::Taxi),
            _ => None,
        }
    }
}

impl Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a raw provider response into the map ready shape.
///
/// Never panics across this boundary: a malformed response produces a
/// degraded result with `success` set to false, empty geometry and zero
/// metrics, using whichever geocoded endpoints were available.
pub fn normalize(
    response: &RoutingResponse,
    endpoints: &[GeocodedAddress],
    mode: TransportMode,
    units: Units,
) -> RouteMapData {
    match try_normalize(response, endpoints, mode, units) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(mode = %mode, "failed to normalize routing response: {err}");
            degraded(endpoints, mode, &err)
        }
    }
}

fn try_normalize(
    response: &RoutingResponse,
    endpoints: &[GeocodedAddress],
    mode: TransportMode,
    units: Units,
) -> Result<RouteMapData, Error> {
    let feature = response.features.first().ok_or(Error::NoRoute)?;
    let start = endpoints.first().ok_or(Error::MissingEndpoint)?.clone();
    let end = endpoints.get(1).ok_or(Error::MissingEndpoint)?.clone();

    // Positions are already longitude first, pass them through untouched.
    // A multi polyline keeps only its first sub path.
    let geometry = match &feature.geometry {
        Geometry::LineString { coordinates } => coordinates.clone(),
        Geometry::MultiLineString { coordinates } => {
            coordinates.first().ok_or(Error::EmptyGeometry)?.clone()
        }
        Geometry::Unsupported => return Err(Error::UnsupportedGeometry),
    };

    let distance = feature.properties.distance.unwrap_or(0.0);
    let time = feature.properties.time.unwrap_or(0.0);
    let description = feature
        .properties
        .way_points
        .as_ref()
        .map(|points| format!("Via {}", points.join(", ")));

    let route = NormalizedRoute {
        id: route_id(&start.original, &end.original, mode),
        geometry,
        properties: RouteProperties {
            mode,
            distance,
            time,
            distance_formatted: Distance::from_meters(distance).to_display_string(units),
            time_formatted: Duration::from_seconds(time).to_display_string(),
            description,
            color: mode.color().to_string(),
        },
    };

    Ok(RouteMapData {
        waypoints: vec![start.coordinate, end.coordinate],
        start,
        end,
        route,
        success: true,
        error: None,
    })
}

fn degraded(endpoints: &[GeocodedAddress], mode: TransportMode, err: &Error) -> RouteMapData {
    let start = endpoints
        .first()
        .cloned()
        .unwrap_or_else(GeocodedAddress::unknown);
    let end = endpoints
        .get(1)
        .cloned()
        .unwrap_or_else(GeocodedAddress::unknown);

    RouteMapData {
        start,
        end,
        route: NormalizedRoute {
            id: "error-route".into(),
            geometry: Vec::new(),
            properties: RouteProperties {
                mode,
                distance: 0.0,
                time: 0.0,
                distance_formatted: "0 km".into(),
                time_formatted: "0 min".into(),
                description: None,
                color: mode.color().to_string(),
            },
        },
        waypoints: Vec::new(),
        success: false,
        error: Some(err.to_string()),
    }
}
