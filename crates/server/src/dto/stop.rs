use pendler::{
    repository::{Address, ConnectorStop, NearbyStop, NearbySummary},
    shared::geo::Coordinate,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub description: String,
    pub has_parking: bool,
    pub is_campus_building: bool,
    pub commute_minutes: Option<u32>,
    pub address: Option<Address>,
}

impl StopDto {
    pub fn from(stop: &ConnectorStop) -> Self {
        Self {
            id: stop.id.to_string(),
            name: stop.name.to_string(),
            coordinate: stop.coordinate,
            description: stop.description.to_string(),
            has_parking: stop.has_parking,
            is_campus_building: stop.is_campus_building,
            commute_minutes: stop.commute_minutes,
            address: stop.address.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyStopDto {
    #[serde(flatten)]
    pub stop: StopDto,
    pub distance_km: f64,
    pub distance_formatted: String,
}

impl NearbyStopDto {
    pub fn from(nearby: &NearbyStop) -> Self {
        Self {
            stop: StopDto::from(&nearby.stop),
            distance_km: nearby.distance.as_kilometers(),
            distance_formatted: nearby.distance_formatted.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySummaryDto {
    pub count: usize,
    pub closest_distance: Option<String>,
    pub closest_stop_name: Option<String>,
    pub has_walkable_stop: bool,
}

impl NearbySummaryDto {
    pub fn from(summary: &NearbySummary) -> Self {
        Self {
            count: summary.count,
            closest_distance: summary.closest_distance.clone(),
            closest_stop_name: summary
                .closest_stop_name
                .as_ref()
                .map(|name| name.to_string()),
            has_walkable_stop: summary.has_walkable_stop,
        }
    }
}
