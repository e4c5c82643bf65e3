use std::{
    cmp,
    fmt::Display,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

const MILES_PER_METER: f64 = 0.000_621_371;
const FEET_PER_MILE: f64 = 5280.0;

/// A distance stored internally in meters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Distance {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }

    /// Short label used for stop distances: meters below one kilometer,
    /// one decimal of kilometers otherwise. No space before the unit.
    pub fn to_compact_string(&self) -> String {
        if self.as_kilometers() < 1.0 {
            format!("{}m", self.0.round() as i64)
        } else {
            format!("{:.1}km", self.as_kilometers())
        }
    }

    /// Route display label in the requested unit system.
    pub fn to_display_string(&self, units: Units) -> String {
        match units {
            Units::Metric => {
                if self.0 >= 1000.0 {
                    format!("{:.1} km", self.as_kilometers())
                } else {
                    format!("{} m", self.0.round() as i64)
                }
            }
            Units::Imperial => {
                let miles = self.0 * MILES_PER_METER;
                if miles >= 1.0 {
                    format!("{miles:.1} miles")
                } else {
                    format!("{} ft", (miles * FEET_PER_MILE).round() as i64)
                }
            }
        }
    }
}

/// Unit system for user facing distance labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

/// A geographic point in latitude/longitude order, the convention used by
/// everything display adjacent. GeoJSON adjacent code uses [`Position`]
/// instead, which is longitude first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from(value: (f64, f64)) -> Self {
        Self {
            latitude: value.0,
            longitude: value.1,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl Coordinate {
    /// Great circle distance to another point using the haversine formula.
    pub fn distance(&self, coord: &Self) -> Distance {
        const R: f64 = 6371.0;
        let dist_lat = f64::to_radians(coord.latitude - self.latitude);
        let dist_lon = f64::to_radians(coord.longitude - self.longitude);
        let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
            + f64::cos(f64::to_radians(self.latitude))
                * f64::cos(f64::to_radians(coord.latitude))
                * f64::sin(dist_lon / 2.0)
                * f64::sin(dist_lon / 2.0);
        let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
        Distance::from_kilometers(R * c)
    }
}

/// A GeoJSON position: longitude first, latitude second. Kept as its own
/// type so the two orderings can never be mixed up silently.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position(pub f64, pub f64);

impl Position {
    pub const fn longitude(&self) -> f64 {
        self.0
    }

    pub const fn latitude(&self) -> f64 {
        self.1
    }
}

impl From<Coordinate> for Position {
    fn from(value: Coordinate) -> Self {
        Self(value.longitude, value.latitude)
    }
}

impl From<Position> for Coordinate {
    fn from(value: Position) -> Self {
        Self {
            latitude: value.1,
            longitude: value.0,
        }
    }
}

#[test]
fn distance_self_is_zero() {
    let coord = Coordinate {
        latitude: 47.6062,
        longitude: -122.3321,
    };
    assert_eq!(coord.distance(&coord).as_meters(), 0.0);
}

#[test]
fn distance_is_symmetric() {
    let coord_a = Coordinate {
        latitude: 47.6062,
        longitude: -122.3321,
    };
    let coord_b = Coordinate {
        latitude: 47.6740,
        longitude: -122.1215,
    };
    assert_eq!(coord_a.distance(&coord_b), coord_b.distance(&coord_a));
}

#[test]
fn distance_seattle_to_redmond() {
    let seattle = Coordinate {
        latitude: 47.6062,
        longitude: -122.3321,
    };
    let redmond = Coordinate {
        latitude: 47.6740,
        longitude: -122.1215,
    };
    let d = seattle.distance(&redmond).as_kilometers();
    assert!(d > 15.0 && d < 17.0, "got {d} km");
}

#[test]
fn compact_label_below_one_kilometer() {
    assert_eq!(Distance::from_kilometers(0.5).to_compact_string(), "500m");
}

#[test]
fn compact_label_at_one_kilometer() {
    assert_eq!(Distance::from_kilometers(1.0).to_compact_string(), "1.0km");
}

#[test]
fn compact_label_rounds_to_one_decimal() {
    assert_eq!(Distance::from_kilometers(2.34).to_compact_string(), "2.3km");
}

#[test]
fn display_label_metric() {
    assert_eq!(
        Distance::from_meters(5200.0).to_display_string(Units::Metric),
        "5.2 km"
    );
    assert_eq!(
        Distance::from_meters(750.0).to_display_string(Units::Metric),
        "750 m"
    );
}

#[test]
fn display_label_imperial() {
    assert_eq!(
        Distance::from_meters(5000.0).to_display_string(Units::Imperial),
        "3.1 miles"
    );
    assert_eq!(
        Distance::from_meters(100.0).to_display_string(Units::Imperial),
        "328 ft"
    );
}

#[test]
fn position_round_trip_swaps_order() {
    let coord = Coordinate {
        latitude: 47.6,
        longitude: -122.3,
    };
    let position = Position::from(coord);
    assert_eq!(position.0, -122.3);
    assert_eq!(position.1, 47.6);
    assert_eq!(Coordinate::from(position), coord);
}
