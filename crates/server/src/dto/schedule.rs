use pendler::schedule::ShuttleRoute;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntryDto {
    pub stop_name: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub is_pick_up: bool,
    pub is_drop_off: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteScheduleDto {
    pub route_id: String,
    pub route_name: String,
    pub schedules: Vec<ScheduleEntryDto>,
}

impl RouteScheduleDto {
    /// Display schedule for a route, taken from its first trip since trips
    /// on a route keep a consistent calling pattern.
    pub fn from(route: &ShuttleRoute) -> Option<Self> {
        let first_trip = route.trips.first()?;
        let schedules = first_trip
            .calls
            .iter()
            .map(|call| ScheduleEntryDto {
                stop_name: call.stop_name.to_string(),
                arrival_time: call.arrival_label(),
                departure_time: call.departure_label(),
                is_pick_up: call.pick_up,
                is_drop_off: call.drop_off,
            })
            .collect();
        Some(Self {
            route_id: route.id.to_string(),
            route_name: route.name.to_string(),
            schedules,
        })
    }
}
