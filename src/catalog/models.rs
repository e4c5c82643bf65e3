use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct StopRecord {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
    pub description: String,
    pub has_parking: u8,
    pub is_campus_building: u8,
    /// Fixed shuttle ride estimate to the main office, in minutes.
    pub commute_minutes: Option<u32>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BuildingRecord {
    pub building_id: String,
    /// Short catalogue name used for selection and filtering.
    pub name: String,
    pub building_name: String,
    pub lat: f64,
    pub lon: f64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct CallRecord {
    pub trip_id: String,
    pub route_id: String,
    pub route_name: String,
    /// Service date in YYYY-MM-DD form.
    pub service_date: String,
    pub stop_id: String,
    pub stop_name: String,
    pub stop_sequence: u16,
    /// RFC 3339 timestamps.
    pub arrival_time: String,
    pub departure_time: String,
    pub pick_up: u8,
    pub drop_off: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct IsochroneRecord {
    pub isochrone_id: String,
    pub stop_id: String,
    pub travel_minutes: u32,
    pub transport_mode: String,
    pub address: String,
    pub center_lat: f64,
    pub center_lon: f64,
}

/// One boundary vertex of an isochrone polygon, ordered by sequence.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct IsochronePointRecord {
    pub isochrone_id: String,
    pub point_lat: f64,
    pub point_lon: f64,
    pub point_sequence: u32,
}
