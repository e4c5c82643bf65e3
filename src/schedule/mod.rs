use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};

/// One vehicle call at a stop within a trip.
#[derive(Debug, Clone)]
pub struct StopCall {
    pub stop_id: Arc<str>,
    pub stop_name: Arc<str>,
    pub arrival: DateTime<FixedOffset>,
    pub departure: DateTime<FixedOffset>,
    /// Whether passengers can board here.
    pub pick_up: bool,
    /// Whether passengers can alight here.
    pub drop_off: bool,
}

impl StopCall {
    pub fn arrival_label(&self) -> String {
        self.arrival.format("%-I:%M %p").to_string()
    }

    pub fn departure_label(&self) -> String {
        self.departure.format("%-I:%M %p").to_string()
    }
}

/// A single shuttle journey through an ordered sequence of stop calls.
#[derive(Debug, Clone)]
pub struct ShuttleTrip {
    pub id: Arc<str>,
    pub calls: Box<[StopCall]>,
}

/// A stop reference within a route's ordered stop list.
#[derive(Debug, Clone)]
pub struct RouteStop {
    pub stop_id: Arc<str>,
    pub name: Arc<str>,
}

/// A named shuttle route with its trips for one service date.
#[derive(Debug, Clone)]
pub struct ShuttleRoute {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub date: NaiveDate,
    pub stops: Box<[RouteStop]>,
    pub trips: Box<[ShuttleTrip]>,
}

impl ShuttleRoute {
    pub fn serves_stop(&self, stop_id: &str) -> bool {
        self.stops.iter().any(|stop| stop.stop_id.as_ref() == stop_id)
    }

    /// The earliest boarding departure from `stop_id` at or after `after`,
    /// across all trips of this route.
    pub fn next_departure_from(
        &self,
        stop_id: &str,
        after: DateTime<FixedOffset>,
    ) -> Option<&StopCall> {
        self.trips
            .iter()
            .flat_map(|trip| trip.calls.iter())
            .filter(|call| {
                call.stop_id.as_ref() == stop_id && call.pick_up && call.departure >= after
            })
            .min_by_key(|call| call.departure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(stop_id: &str, departure: &str, pick_up: bool) -> StopCall {
        let departure = DateTime::parse_from_rfc3339(departure).unwrap();
        StopCall {
            stop_id: stop_id.into(),
            stop_name: stop_id.into(),
            arrival: departure,
            departure,
            pick_up,
            drop_off: true,
        }
    }

    fn route() -> ShuttleRoute {
        ShuttleRoute {
            id: "rt-1".into(),
            name: "Overlake Express".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            stops: vec![RouteStop {
                stop_id: "stop-a".into(),
                name: "Stop A".into(),
            }]
            .into(),
            trips: vec![ShuttleTrip {
                id: "trip-1".into(),
                calls: vec![
                    call("stop-a", "2024-03-04T07:30:00-08:00", true),
                    call("stop-a", "2024-03-04T08:15:00-08:00", true),
                    call("stop-a", "2024-03-04T09:00:00-08:00", false),
                ]
                .into(),
            }]
            .into(),
        }
    }

    #[test]
    fn serves_stop_checks_ordered_stops() {
        let route = route();
        assert!(route.serves_stop("stop-a"));
        assert!(!route.serves_stop("stop-b"));
    }

    #[test]
    fn next_departure_skips_past_and_non_boarding_calls() {
        let route = route();
        let after = DateTime::parse_from_rfc3339("2024-03-04T07:45:00-08:00").unwrap();
        let next = route.next_departure_from("stop-a", after).unwrap();
        assert_eq!(next.departure_label(), "8:15 AM");
    }

    #[test]
    fn next_departure_none_when_day_is_over() {
        let route = route();
        let after = DateTime::parse_from_rfc3339("2024-03-04T10:00:00-08:00").unwrap();
        assert!(route.next_departure_from("stop-a", after).is_none());
    }
}
