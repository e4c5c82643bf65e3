use serde::{Deserialize, Serialize};

use crate::routing::TransportMode;

/// One scored commute option. Recomputed on every analysis, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommuteScore {
    pub mode: TransportMode,
    /// Seconds.
    pub time: f64,
    /// Meters.
    pub distance: f64,
    pub time_formatted: String,
    pub distance_formatted: String,
    /// Suitability in [0, 100], higher is better.
    pub score: u8,
}

/// Scores a single commute option from its time, distance and mode.
///
/// Starts at 100 and applies, in order: a time penalty (2 points per minute
/// over 30, otherwise 1 point per minute over 20), a distance penalty
/// (1.5 points per kilometer over 25) and a mode adjustment. Bike and walk
/// carry a bonus but pay steeply for long distances. The raw value may go
/// negative before the final clamp, which is fine since only the clamped
/// result is observable.
pub fn commute_score(time_seconds: f64, distance_meters: f64, mode: TransportMode) -> u8 {
    let mut score = 100.0;

    let minutes = time_seconds / 60.0;
    if minutes > 30.0 {
        score -= (minutes - 30.0) * 2.0;
    } else if minutes > 20.0 {
        score -= minutes - 20.0;
    }

    let kilometers = distance_meters / 1000.0;
    if kilometers > 25.0 {
        score -= (kilometers - 25.0) * 1.5;
    }

    match mode {
        TransportMode::Bike => {
            score += 10.0;
            if kilometers > 15.0 {
                score -= (kilometers - 15.0) * 3.0;
            }
        }
        TransportMode::Walk => {
            score += 15.0;
            if kilometers > 3.0 {
                score -= (kilometers - 3.0) * 10.0;
            }
        }
        TransportMode::Transit => score += 8.0,
        _ => {}
    }

    score.round().clamp(0.0, 100.0) as u8
}

/// Weight of a mode in the overall score. Modes outside the commute set
/// fall back to a neutral weight.
pub const fn mode_weight(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Drive => 1.0,
        TransportMode::Transit => 1.2,
        TransportMode::Bike => 1.1,
        TransportMode::Walk => 0.8,
        _ => 1.0,
    }
}

/// Weighted mean of the per mode scores, or zero when nothing was scored.
pub fn overall_score(scores: &[CommuteScore]) -> u8 {
    if scores.is_empty() {
        return 0;
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for entry in scores {
        let weight = mode_weight(entry.mode);
        weighted_sum += f64::from(entry.score) * weight;
        total_weight += weight;
    }

    (weighted_sum / total_weight).round() as u8
}
