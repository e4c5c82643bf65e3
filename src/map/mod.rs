use serde::{Deserialize, Serialize};

use crate::{
    repository::{Address, Building, ConnectorStop, NearbyStop, Repository},
    routing::{GeocodedAddress, NormalizedRoute, RoutingResponse, TransportMode, normalize},
    score::{CommuteScore, commute_score, overall_score},
    shared::geo::{Coordinate, Distance, Position, Units},
};

/// Average walking speed used for the walk-to-stop leg.
pub const WALK_SPEED_KMH: f64 = 5.0;
/// Assumed shuttle speed of 30 km/h, expressed per minute of ride time.
pub const RIDE_METERS_PER_MINUTE: f64 = 500.0;
/// Ride estimate for stops without a fixed commute time.
pub const DEFAULT_RIDE_MINUTES: u32 = 30;

const NEARBY_PIN_RADIUS: Distance = Distance::from_kilometers(3.0);
const NEARBY_PIN_LIMIT: usize = 8;
const SCORING_RADIUS: Distance = Distance::from_kilometers(2.0);
const SCORING_STOP_LIMIT: usize = 5;

/// A map marker. The variants mirror what the renderer can draw, so this
/// stays a tagged union rather than a trait object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MapPin {
    #[serde(rename_all = "camelCase")]
    ConnectorStop {
        id: String,
        name: String,
        coordinates: Position,
        description: String,
        has_parking: bool,
        is_campus_building: bool,
        commute_minutes: Option<u32>,
        address: Option<Address>,
    },
    #[serde(rename_all = "camelCase")]
    CampusBuilding {
        id: String,
        name: String,
        coordinates: Position,
        building_name: String,
        address: Option<Address>,
    },
    #[serde(rename_all = "camelCase")]
    Other {
        id: String,
        name: String,
        coordinates: Position,
        address: Option<Address>,
    },
}

impl MapPin {
    pub fn id(&self) -> &str {
        match self {
            MapPin::ConnectorStop { id, .. }
            | MapPin::CampusBuilding { id, .. }
            | MapPin::Other { id, .. } => id,
        }
    }

    pub fn from_stop(stop: &ConnectorStop) -> Self {
        MapPin::ConnectorStop {
            id: stop.id.to_string(),
            name: stop.name.to_string(),
            coordinates: stop.coordinate.into(),
            description: stop.description.to_string(),
            has_parking: stop.has_parking,
            is_campus_building: stop.is_campus_building,
            commute_minutes: stop.commute_minutes,
            address: stop.address.clone(),
        }
    }

    /// Stop pin with the query distance appended to its description.
    pub fn from_nearby_stop(nearby: &NearbyStop) -> Self {
        let mut pin = Self::from_stop(&nearby.stop);
        if let MapPin::ConnectorStop { description, .. } = &mut pin {
            *description = format!(
                "{}\n\nDistance: {} from your location",
                description, nearby.distance_formatted
            );
        }
        pin
    }

    pub fn from_building(building: &Building) -> Self {
        MapPin::CampusBuilding {
            id: building.id.to_string(),
            name: building.name.to_string(),
            coordinates: building.coordinate.into(),
            building_name: building.building_name.to_string(),
            address: building.address.clone(),
        }
    }
}

/// A renderable route polyline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRoute {
    pub id: String,
    pub name: String,
    /// Polyline positions, longitude first.
    pub geometry: Vec<Position>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub distance: Option<String>,
    pub estimated_time: Option<String>,
}

impl MapRoute {
    pub fn from_normalized(route: &NormalizedRoute) -> Self {
        let mode = route.properties.mode;
        Self {
            id: route.id.clone(),
            name: format!("{mode} route"),
            geometry: route.geometry.clone(),
            color: Some(route.properties.color.clone()),
            description: Some(
                route
                    .properties
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("{mode} route")),
            ),
            distance: Some(route.properties.distance_formatted.clone()),
            estimated_time: Some(route.properties.time_formatted.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RadiusKind {
    ConnectorStopRadius,
    OtherRadius,
}

/// A reachability overlay polygon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRadius {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RadiusKind,
    pub address: String,
    pub center_point: Position,
    /// Polygon boundary vertices, longitude first.
    pub boundary: Vec<Position>,
    pub color: Option<String>,
    pub travel_time_minutes: u32,
    pub transport_mode: String,
}

/// The unified payload handed to the map renderer. Everything inside is a
/// plain value object, safe to serialize as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapData {
    pub pins: Vec<MapPin>,
    pub routes: Vec<MapRoute>,
    pub radii: Vec<MapRadius>,
}

impl MapData {
    /// Adds a pin unless one with the same id is already present. The same
    /// destination pin gets pushed once per mode pass, first one wins.
    pub fn push_pin(&mut self, pin: MapPin) {
        if !self.pins.iter().any(|existing| existing.id() == pin.id()) {
            self.pins.push(pin);
        }
    }

    pub fn extend_pins(&mut self, pins: impl IntoIterator<Item = MapPin>) {
        for pin in pins {
            self.push_pin(pin);
        }
    }
}

/// Stops near `origin` as ready-to-render pins, with the distance phrase
/// folded into each description.
pub fn nearby_stop_pins(
    repository: &Repository,
    origin: &Coordinate,
    radius: Distance,
    max_results: usize,
) -> Vec<MapPin> {
    repository
        .nearby_stops(origin, radius, max_results)
        .iter()
        .map(MapPin::from_nearby_stop)
        .collect()
}

/// The synthetic connector leg backing a transit score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorLeg {
    pub stop_name: String,
    pub walk_minutes: u32,
    pub ride_minutes: u32,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommuteReport {
    pub map: MapData,
    pub scores: Vec<CommuteScore>,
    pub overall: u8,
    /// Present when a connector stop was close enough to score.
    pub connector_leg: Option<ConnectorLeg>,
}

/// Combines per-mode routing responses, nearby stops and scores into one
/// report. Modes whose response fails to normalize are skipped, scoring
/// proceeds with whatever succeeded.
pub fn assemble(
    repository: &Repository,
    home: &GeocodedAddress,
    building: &Building,
    results: &[(TransportMode, RoutingResponse)],
    include_connector: bool,
    units: Units,
) -> CommuteReport {
    let mut map = MapData::default();
    let mut scores: Vec<CommuteScore> = Vec::new();

    map.push_pin(MapPin::Other {
        id: "start".into(),
        name: "Home".into(),
        coordinates: home.coordinate.into(),
        address: Some(Address {
            street: Some(home.original.clone()),
            ..Default::default()
        }),
    });
    let mut end_pin = MapPin::from_building(building);
    if let MapPin::CampusBuilding { id, .. } = &mut end_pin {
        *id = "end".into();
    }
    map.push_pin(end_pin);

    if include_connector {
        map.extend_pins(nearby_stop_pins(
            repository,
            &home.coordinate,
            NEARBY_PIN_RADIUS,
            NEARBY_PIN_LIMIT,
        ));
    }

    let destination = GeocodedAddress::new(
        building.name.to_string(),
        building.name.to_string(),
        building.coordinate,
    );
    let endpoints = [home.clone(), destination];

    for (mode, response) in results {
        let normalized = normalize(response, &endpoints, *mode, units);
        if !normalized.success {
            tracing::warn!(mode = %mode, "skipping mode that failed to normalize");
            continue;
        }
        let route = &normalized.route;
        map.routes.push(MapRoute::from_normalized(route));
        scores.push(CommuteScore {
            mode: *mode,
            time: route.properties.time,
            distance: route.properties.distance,
            time_formatted: route.properties.time_formatted.clone(),
            distance_formatted: route.properties.distance_formatted.clone(),
            score: commute_score(route.properties.time, route.properties.distance, *mode),
        });
    }

    let connector_leg = if include_connector {
        score_connector(repository, &home.coordinate, &mut scores)
    } else {
        None
    };

    let overall = overall_score(&scores);
    CommuteReport {
        map,
        scores,
        overall,
        connector_leg,
    }
}

/// Scores the shuttle option against the closest stop: an estimated walk at
/// [`WALK_SPEED_KMH`] plus the stop's fixed ride time, tagged as transit.
/// Returns None when no stop is in range.
fn score_connector(
    repository: &Repository,
    origin: &Coordinate,
    scores: &mut Vec<CommuteScore>,
) -> Option<ConnectorLeg> {
    let nearby = repository.nearby_stops(origin, SCORING_RADIUS, SCORING_STOP_LIMIT);
    let closest = nearby.first()?;

    let walk_minutes = (closest.distance.as_kilometers() / WALK_SPEED_KMH * 60.0).round() as u32;
    let ride_minutes = closest.stop.commute_minutes.unwrap_or(DEFAULT_RIDE_MINUTES);
    let total_minutes = walk_minutes + ride_minutes;
    let total_seconds = f64::from(total_minutes) * 60.0;

    let walk_meters = closest.distance.as_meters();
    let ride_meters = f64::from(ride_minutes) * RIDE_METERS_PER_MINUTE;
    let total_meters = walk_meters + ride_meters;

    scores.push(CommuteScore {
        mode: TransportMode::Transit,
        time: total_seconds,
        distance: total_meters,
        time_formatted: format!("{total_minutes} min"),
        distance_formatted: format!("{:.1} km", total_meters / 1000.0),
        score: commute_score(total_seconds, total_meters, TransportMode::Transit),
    });

    Some(ConnectorLeg {
        stop_name: closest.stop.name.to_string(),
        walk_minutes,
        ride_minutes,
    })
}

/// Query for the precomputed-isochrone browse mode.
#[derive(Debug, Clone, Default)]
pub struct ExplorerQuery {
    pub method: Option<TransportMode>,
    /// Building catalogue name to filter on for the drive method.
    pub building: Option<String>,
    /// Which isochrone minute bucket to overlay.
    pub radius_minutes: Option<u32>,
    /// Total acceptable commute budget in minutes.
    pub total_minutes: Option<u32>,
}

/// Stops without a fixed estimate sort behind every real one when the
/// commute budget filter runs.
const UNKNOWN_COMMUTE_MINUTES: u32 = 999_999;

/// Builds the explorer payload: every pin when no method is chosen, the
/// selected building for drive, and budget-filtered stops with their
/// isochrone overlays for the connector.
pub fn explorer_map(repository: &Repository, query: &ExplorerQuery) -> MapData {
    let mut map = MapData::default();

    let Some(method) = query.method else {
        map.extend_pins(repository.stops.iter().map(MapPin::from_stop));
        map.extend_pins(repository.buildings.iter().map(MapPin::from_building));
        return map;
    };

    match method {
        TransportMode::Drive => {
            let pins = repository
                .buildings
                .iter()
                .filter(|building| Some(building.name.as_ref()) == query.building.as_deref())
                .map(MapPin::from_building);
            map.extend_pins(pins);
            map
        }
        TransportMode::Transit => {
            let stops: Vec<&ConnectorStop> = repository
                .stops
                .iter()
                .filter(|stop| {
                    match (query.radius_minutes, query.total_minutes) {
                        (Some(radius), Some(total)) => {
                            let ride = stop.commute_minutes.unwrap_or(UNKNOWN_COMMUTE_MINUTES);
                            ride + radius <= total
                        }
                        _ => true,
                    }
                })
                .collect();

            if let Some(radius_minutes) = query.radius_minutes {
                for stop in &stops {
                    let Some(isochrones) = repository.isochrones_by_stop_id(&stop.id) else {
                        continue;
                    };
                    let Some(isochrone) = isochrones
                        .into_iter()
                        .find(|isochrone| isochrone.travel_minutes == radius_minutes)
                    else {
                        continue;
                    };
                    map.radii.push(MapRadius {
                        id: format!("{}-{}", stop.id, radius_minutes),
                        name: format!("{} - {} min radius", stop.name, radius_minutes),
                        kind: RadiusKind::ConnectorStopRadius,
                        address: isochrone.address.to_string(),
                        center_point: isochrone.center.into(),
                        boundary: isochrone.boundary.to_vec(),
                        color: None,
                        travel_time_minutes: isochrone.travel_minutes,
                        transport_mode: isochrone.transport_mode.to_string(),
                    });
                }
            }

            map.extend_pins(stops.into_iter().map(MapPin::from_stop));
            map
        }
        _ => map,
    }
}
