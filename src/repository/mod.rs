use std::{collections::HashMap, sync::Arc};

mod entities;
pub use entities::*;

use chrono::{DateTime, NaiveDate};

use crate::{
    catalog::{self, Catalog},
    schedule::{RouteStop, ShuttleRoute, ShuttleTrip, StopCall},
    shared::{self, geo::Coordinate, geo::Distance, geo::Position},
};

pub const DEFAULT_SEARCH_RADIUS: Distance = Distance::from_kilometers(2.0);
pub const DEFAULT_MAX_RESULTS: usize = 5;
/// One kilometer, roughly a twelve minute walk.
pub const WALKABLE_DISTANCE: Distance = Distance::from_kilometers(1.0);

type IdToIndex = HashMap<Arc<str>, usize>;
type IdToIndexes = HashMap<Arc<str>, Box<[usize]>>;

/// The in-memory commute catalogue: connector stops, campus buildings,
/// shuttle schedules and precomputed isochrones, plus the lookups over them.
/// Built once per process from a [`Catalog`], or directly from entity
/// vectors in tests.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub stops: Box<[ConnectorStop]>,
    pub buildings: Box<[Building]>,
    pub shuttle_routes: Box<[ShuttleRoute]>,
    pub isochrones: Box<[Isochrone]>,

    stop_lookup: Arc<IdToIndex>,
    building_lookup: Arc<IdToIndex>,
    building_name_lookup: Arc<IdToIndex>,
    stop_to_isochrones: Arc<IdToIndexes>,
    stop_to_routes: Arc<IdToIndexes>,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the stop set and rebuilds its lookup.
    pub fn with_stops(mut self, stops: Vec<ConnectorStop>) -> Self {
        let mut stop_lookup: IdToIndex = HashMap::new();
        let stops: Vec<ConnectorStop> = stops
            .into_iter()
            .enumerate()
            .map(|(i, mut stop)| {
                stop.index = i as u32;
                stop_lookup.insert(stop.id.clone(), i);
                stop
            })
            .collect();
        self.stops = stops.into();
        self.stop_lookup = stop_lookup.into();
        self
    }

    /// Replaces the building set and rebuilds its lookups.
    pub fn with_buildings(mut self, buildings: Vec<Building>) -> Self {
        let mut building_lookup: IdToIndex = HashMap::new();
        let mut building_name_lookup: IdToIndex = HashMap::new();
        let buildings: Vec<Building> = buildings
            .into_iter()
            .enumerate()
            .map(|(i, mut building)| {
                building.index = i as u32;
                building_lookup.insert(building.id.clone(), i);
                building_name_lookup.insert(building.name.clone(), i);
                building
            })
            .collect();
        self.buildings = buildings.into();
        self.building_lookup = building_lookup.into();
        self.building_name_lookup = building_name_lookup.into();
        self
    }

    /// Replaces the shuttle routes and rebuilds the stop-to-route lookup.
    pub fn with_shuttle_routes(mut self, routes: Vec<ShuttleRoute>) -> Self {
        let mut stop_to_routes: HashMap<Arc<str>, Vec<usize>> = HashMap::new();
        for (i, route) in routes.iter().enumerate() {
            for stop in route.stops.iter() {
                stop_to_routes
                    .entry(stop.stop_id.clone())
                    .or_default()
                    .push(i);
            }
        }
        self.shuttle_routes = routes.into();
        let stop_to_routes: IdToIndexes = stop_to_routes
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();
        self.stop_to_routes = stop_to_routes.into();
        self
    }

    /// Replaces the isochrone set and rebuilds the stop-to-isochrone lookup.
    pub fn with_isochrones(mut self, isochrones: Vec<Isochrone>) -> Self {
        let mut stop_to_isochrones: HashMap<Arc<str>, Vec<usize>> = HashMap::new();
        for (i, isochrone) in isochrones.iter().enumerate() {
            stop_to_isochrones
                .entry(isochrone.stop_id.clone())
                .or_default()
                .push(i);
        }
        self.isochrones = isochrones.into();
        let stop_to_isochrones: IdToIndexes = stop_to_isochrones
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();
        self.stop_to_isochrones = stop_to_isochrones.into();
        self
    }

    /// Streams the full catalogue into memory. Depending on the size of the
    /// data this can be a long blocking function.
    pub fn load_catalog(self, catalog: &Catalog) -> Result<Self, catalog::Error> {
        let mut stops: Vec<ConnectorStop> = Vec::new();
        catalog.stream_stops(|(_, record)| {
            stops.push(stop_from_record(record));
        })?;

        let mut buildings: Vec<Building> = Vec::new();
        catalog.stream_buildings(|(_, record)| {
            buildings.push(building_from_record(record));
        })?;

        let mut isochrones: Vec<Isochrone> = Vec::new();
        catalog.stream_isochrones(|(_, record)| {
            isochrones.push(Isochrone {
                id: record.isochrone_id.into(),
                stop_id: record.stop_id.into(),
                travel_minutes: record.travel_minutes,
                transport_mode: record.transport_mode.into(),
                address: record.address.into(),
                center: Coordinate {
                    latitude: record.center_lat,
                    longitude: record.center_lon,
                },
                boundary: Box::default(),
            });
        })?;

        // Boundary vertices arrive as their own rows, grouped here by id and
        // ordered by sequence.
        let mut points: HashMap<String, Vec<(u32, Position)>> = HashMap::new();
        catalog.stream_isochrone_points(|(_, record)| {
            points.entry(record.isochrone_id).or_default().push((
                record.point_sequence,
                Position(record.point_lon, record.point_lat),
            ));
        })?;
        for isochrone in isochrones.iter_mut() {
            if let Some(mut vertices) = points.remove(isochrone.id.as_ref()) {
                vertices.sort_by_key(|(sequence, _)| *sequence);
                isochrone.boundary = vertices
                    .into_iter()
                    .map(|(_, position)| position)
                    .collect();
            }
        }

        let shuttle_routes = load_shuttle_routes(catalog)?;

        Ok(self
            .with_stops(stops)
            .with_buildings(buildings)
            .with_isochrones(isochrones)
            .with_shuttle_routes(shuttle_routes))
    }

    /// Get a stop with the given id.
    /// Stop is safe and quick to clone if an owned instance is needed.
    pub fn stop_by_id(&self, id: &str) -> Option<&ConnectorStop> {
        let index = self.stop_lookup.get(id)?;
        Some(&self.stops[*index])
    }

    pub fn building_by_id(&self, id: &str) -> Option<&Building> {
        let index = self.building_lookup.get(id)?;
        Some(&self.buildings[*index])
    }

    /// Buildings are also addressable by their short catalogue name, which
    /// is what selection forms submit.
    pub fn building_by_name(&self, name: &str) -> Option<&Building> {
        let index = self.building_name_lookup.get(name)?;
        Some(&self.buildings[*index])
    }

    /// All isochrones precomputed for a stop, one per minute bucket.
    pub fn isochrones_by_stop_id(&self, stop_id: &str) -> Option<Vec<&Isochrone>> {
        let indexes = self.stop_to_isochrones.get(stop_id)?;
        Some(indexes.iter().map(|i| &self.isochrones[*i]).collect())
    }

    /// All shuttle routes calling at a stop.
    pub fn routes_for_stop(&self, stop_id: &str) -> Option<Vec<&ShuttleRoute>> {
        let indexes = self.stop_to_routes.get(stop_id)?;
        Some(indexes.iter().map(|i| &self.shuttle_routes[*i]).collect())
    }

    /// Shuttle routes calling at any of the given stops, deduplicated and
    /// in catalogue order.
    pub fn routes_for_stops(&self, stop_ids: &[&str]) -> Vec<&ShuttleRoute> {
        let mut indexes: Vec<usize> = stop_ids
            .iter()
            .filter_map(|stop_id| self.stop_to_routes.get(*stop_id))
            .flat_map(|found| found.iter().copied())
            .collect();
        indexes.sort_unstable();
        indexes.dedup();
        indexes.into_iter().map(|i| &self.shuttle_routes[i]).collect()
    }

    /// Stops within `radius` of `origin`, closest first, capped at
    /// `max_results`. Ties keep catalogue order. An empty result is a valid
    /// outcome, not an error.
    pub fn nearby_stops(
        &self,
        origin: &Coordinate,
        radius: Distance,
        max_results: usize,
    ) -> Vec<NearbyStop> {
        let mut found: Vec<NearbyStop> = self
            .stops
            .iter()
            .filter_map(|stop| {
                let distance = origin.distance(&stop.coordinate);
                (distance <= radius).then(|| NearbyStop {
                    stop: stop.clone(),
                    distance,
                    distance_formatted: distance.to_compact_string(),
                })
            })
            .collect();
        found.sort_by(|a, b| a.distance.as_meters().total_cmp(&b.distance.as_meters()));
        found.truncate(max_results);
        found
    }

    /// Whether any stop sits within walking distance of `origin`.
    pub fn has_nearby_stop(&self, origin: &Coordinate) -> bool {
        !self.nearby_stops(origin, WALKABLE_DISTANCE, 1).is_empty()
    }

    /// Digest of the stops around `origin` for UI display. The walkable flag
    /// always uses the fixed [`WALKABLE_DISTANCE`] threshold, regardless of
    /// the radius asked for here.
    pub fn nearby_summary(&self, origin: &Coordinate, radius: Distance) -> NearbySummary {
        let nearby = self.nearby_stops(origin, radius, DEFAULT_MAX_RESULTS);
        NearbySummary {
            count: nearby.len(),
            closest_distance: nearby.first().map(|n| n.distance_formatted.clone()),
            closest_stop_name: nearby.first().map(|n| n.stop.name.clone()),
            has_walkable_stop: self.has_nearby_stop(origin),
        }
    }

    /// Does a fuzzy search on all the stops, comparing their name to the needle.
    pub fn search_stops_by_name<'a>(&'a self, needle: &'a str) -> Vec<&'a ConnectorStop> {
        shared::search(needle, &self.stops)
    }

    /// Does a fuzzy search on all the buildings, comparing their name to the needle.
    pub fn search_buildings_by_name<'a>(&'a self, needle: &'a str) -> Vec<&'a Building> {
        shared::search(needle, &self.buildings)
    }
}

fn stop_from_record(record: catalog::models::StopRecord) -> ConnectorStop {
    let address = Address {
        street: record.street,
        city: record.city,
        state: record.state,
        zip: record.zip,
    };
    ConnectorStop {
        index: 0,
        id: record.stop_id.into(),
        name: record.stop_name.clone().into(),
        normalized_name: record.stop_name.to_lowercase().into(),
        coordinate: Coordinate {
            latitude: record.stop_lat,
            longitude: record.stop_lon,
        },
        description: record.description.into(),
        has_parking: record.has_parking != 0,
        is_campus_building: record.is_campus_building != 0,
        commute_minutes: record.commute_minutes,
        address: (!address.is_empty()).then_some(address),
    }
}

fn building_from_record(record: catalog::models::BuildingRecord) -> Building {
    let address = Address {
        street: record.street,
        city: record.city,
        state: record.state,
        zip: record.zip,
    };
    Building {
        index: 0,
        id: record.building_id.into(),
        name: record.name.clone().into(),
        normalized_name: record.name.to_lowercase().into(),
        building_name: record.building_name.into(),
        coordinate: Coordinate {
            latitude: record.lat,
            longitude: record.lon,
        },
        address: (!address.is_empty()).then_some(address),
    }
}

/// Groups schedule call rows into trips and trips into routes. Rows with
/// unparseable timestamps are skipped with a warning rather than failing
/// the whole load.
fn load_shuttle_routes(catalog: &Catalog) -> Result<Vec<ShuttleRoute>, catalog::Error> {
    struct RouteDraft {
        name: Arc<str>,
        date: NaiveDate,
        trips: HashMap<Arc<str>, Vec<(u16, StopCall)>>,
    }

    let mut drafts: HashMap<Arc<str>, RouteDraft> = HashMap::new();
    let mut route_order: Vec<Arc<str>> = Vec::new();

    catalog.stream_calls(|(_, record)| {
        let (arrival, departure) = match (
            DateTime::parse_from_rfc3339(&record.arrival_time),
            DateTime::parse_from_rfc3339(&record.departure_time),
        ) {
            (Ok(arrival), Ok(departure)) => (arrival, departure),
            _ => {
                tracing::warn!(
                    trip = %record.trip_id,
                    stop = %record.stop_id,
                    "skipping schedule row with invalid timestamps"
                );
                return;
            }
        };
        let Ok(date) = record.service_date.parse::<NaiveDate>() else {
            tracing::warn!(trip = %record.trip_id, "skipping schedule row with invalid date");
            return;
        };

        let route_id: Arc<str> = record.route_id.into();
        let draft = drafts.entry(route_id.clone()).or_insert_with(|| {
            route_order.push(route_id);
            RouteDraft {
                name: record.route_name.into(),
                date,
                trips: HashMap::new(),
            }
        });

        let stop_id: Arc<str> = record.stop_id.into();
        let stop_name: Arc<str> = record.stop_name.into();
        draft
            .trips
            .entry(record.trip_id.into())
            .or_default()
            .push((
                record.stop_sequence,
                StopCall {
                    stop_id,
                    stop_name,
                    arrival,
                    departure,
                    pick_up: record.pick_up != 0,
                    drop_off: record.drop_off != 0,
                },
            ));
    })?;

    let routes = route_order
        .into_iter()
        .filter_map(|route_id| {
            let draft = drafts.remove(&route_id)?;
            let mut trips: Vec<ShuttleTrip> = draft
                .trips
                .into_iter()
                .map(|(trip_id, mut calls)| {
                    calls.sort_by_key(|(sequence, _)| *sequence);
                    ShuttleTrip {
                        id: trip_id,
                        calls: calls.into_iter().map(|(_, call)| call).collect(),
                    }
                })
                .collect();
            trips.sort_by(|a, b| a.id.cmp(&b.id));

            // The route's stop list follows call order, first trip first.
            let mut stops: Vec<RouteStop> = Vec::new();
            for trip in &trips {
                for call in trip.calls.iter() {
                    if !stops.iter().any(|stop| stop.stop_id == call.stop_id) {
                        stops.push(RouteStop {
                            stop_id: call.stop_id.clone(),
                            name: call.stop_name.clone(),
                        });
                    }
                }
            }

            Some(ShuttleRoute {
                id: route_id,
                name: draft.name,
                date: draft.date,
                stops: stops.into(),
                trips: trips.into(),
            })
        })
        .collect();
    Ok(routes)
}
