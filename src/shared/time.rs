use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// A travel duration in seconds. Routing providers report fractional
/// seconds, so this wraps an `f64` rather than an integer count.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Duration(f64);

impl From<f64> for Duration {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Duration {
    pub const fn from_seconds(secs: f64) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: f64) -> Self {
        Self(minutes * 60.0)
    }

    pub const fn as_seconds(&self) -> f64 {
        self.0
    }

    pub const fn as_minutes(&self) -> f64 {
        self.0 / 60.0
    }

    /// Route display label in whole minutes, switching to an hour form at
    /// sixty minutes. The minute part is dropped when it is exactly zero.
    pub fn to_display_string(&self) -> String {
        let minutes = self.as_minutes().round() as i64;
        if minutes >= 60 {
            let hours = minutes / 60;
            let remaining = minutes % 60;
            if remaining > 0 {
                format!("{hours}h {remaining}min")
            } else {
                format!("{hours}h")
            }
        } else {
            format!("{minutes} min")
        }
    }
}

#[test]
fn label_rounds_to_nearest_minute() {
    assert_eq!(Duration::from_seconds(90.0).to_display_string(), "2 min");
}

#[test]
fn label_whole_hour() {
    assert_eq!(Duration::from_seconds(3600.0).to_display_string(), "1h");
}

#[test]
fn label_hour_and_minutes() {
    assert_eq!(Duration::from_seconds(5400.0).to_display_string(), "1h 30min");
}

#[test]
fn label_short_trip() {
    assert_eq!(Duration::from_seconds(300.0).to_display_string(), "5 min");
}

#[test]
fn label_zero() {
    assert_eq!(Duration::from_seconds(0.0).to_display_string(), "0 min");
}
