//! Discrete velocity/acceleration derivation and oscillation measurements.

use serde::{Deserialize, Serialize};

use crate::sample::{MotionProperty, Sample};

/// One derived point of the velocity profile. Transient; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityPoint {
    /// Milliseconds from recording start
    pub time: f64,
    /// Units per millisecond
    pub velocity: f64,
    /// Units per millisecond squared
    pub acceleration: f64,
    /// Position the velocity was measured at
    pub position: f64,
}

/// Derive the velocity profile of one projected property.
///
/// `velocity[i] = (pos[i] - pos[i-1]) / dt`; consecutive pairs with `dt == 0`
/// are skipped rather than divided. Acceleration comes from consecutive
/// velocity pairs and is 0 for the first retained point.
#[must_use]
pub fn velocity_profile(samples: &[Sample], property: MotionProperty) -> Vec<VelocityPoint> {
    let mut points: Vec<VelocityPoint> = Vec::with_capacity(samples.len().saturating_sub(1));
    for pair in samples.windows(2) {
        let dt = pair[1].time - pair[0].time;
        if dt == 0.0 {
            continue;
        }
        let position = pair[1].project(property);
        let velocity = (position - pair[0].project(property)) / dt;
        let acceleration = points
            .last()
            .map_or(0.0, |prev| (velocity - prev.velocity) / dt);
        points.push(VelocityPoint {
            time: pair[1].time,
            velocity,
            acceleration,
            position,
        });
    }
    points
}

/// True if any interior position passes beyond the final value on the side
/// away from the start.
#[must_use]
pub fn detect_overshoot(positions: &[f64]) -> bool {
    let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else {
        return false;
    };
    if positions.len() < 3 || first == last {
        return false;
    }
    let interior = &positions[1..positions.len() - 1];
    if last > first {
        interior.iter().any(|&p| p > last)
    } else {
        interior.iter().any(|&p| p < last)
    }
}

/// Number of full oscillations around the final value.
///
/// Counts strict sign changes of `position - final` across the sequence and
/// floors the half-crossings: two crossings make one oscillation.
#[must_use]
pub fn count_oscillations(positions: &[f64]) -> usize {
    let Some(&last) = positions.last() else {
        return 0;
    };
    let crossings = positions
        .windows(2)
        .filter(|pair| (pair[0] - last) * (pair[1] - last) < 0.0)
        .count();
    crossings / 2
}
