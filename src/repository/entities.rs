use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::shared::{Identifiable, geo::Coordinate, geo::Distance, geo::Position};

/// A postal address. Every part is optional since the catalogue is sparse.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.city.is_none() && self.state.is_none() && self.zip.is_none()
    }
}

/// A shuttle stop from the fixed connector catalogue.
#[derive(Debug, Default, Clone)]
pub struct ConnectorStop {
    /// The global internal index used for O(1) array lookups in the repository.
    pub index: u32,
    /// The unique external identifier.
    pub id: Arc<str>,
    /// The display name of the stop.
    pub name: Arc<str>,
    /// A search-optimized version of the name (e.g., lowercase).
    pub normalized_name: Arc<str>,
    pub coordinate: Coordinate,
    pub description: Arc<str>,
    /// Whether riders can park at the stop.
    pub has_parking: bool,
    /// Whether the stop doubles as a campus building.
    pub is_campus_building: bool,
    /// Fixed shuttle ride estimate to the main office, in minutes.
    pub commute_minutes: Option<u32>,
    pub address: Option<Address>,
}

impl Identifiable for ConnectorStop {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

/// A campus office building a commute can end at.
#[derive(Debug, Default, Clone)]
pub struct Building {
    pub index: u32,
    pub id: Arc<str>,
    /// Short catalogue name used for selection and filtering.
    pub name: Arc<str>,
    pub normalized_name: Arc<str>,
    /// Longer display name shown on the map.
    pub building_name: Arc<str>,
    pub coordinate: Coordinate,
    pub address: Option<Address>,
}

impl Identifiable for Building {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

/// A stop enriched with its distance from a query point.
#[derive(Debug, Clone)]
pub struct NearbyStop {
    pub stop: ConnectorStop,
    pub distance: Distance,
    /// Compact distance label, e.g. "500m" or "1.2km".
    pub distance_formatted: String,
}

/// Digest of a nearby stop query for UI display.
#[derive(Debug, Clone, Default)]
pub struct NearbySummary {
    pub count: usize,
    pub closest_distance: Option<String>,
    pub closest_stop_name: Option<Arc<str>>,
    /// Computed at a fixed walkable threshold, independent of the query radius.
    pub has_walkable_stop: bool,
}

/// A precomputed reachability polygon around a stop for one minute bucket.
#[derive(Debug, Clone)]
pub struct Isochrone {
    pub id: Arc<str>,
    pub stop_id: Arc<str>,
    pub travel_minutes: u32,
    pub transport_mode: Arc<str>,
    pub address: Arc<str>,
    pub center: Coordinate,
    /// Boundary vertices, longitude first, in ring order.
    pub boundary: Box<[Position]>,
}
