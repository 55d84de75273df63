//! Spring-parameter estimation under a damped harmonic oscillator model.
//!
//! This is a best-effort fit to noisy, low-sample-count data under a
//! simplified one-mass model, not exact system identification. Output values
//! are clamped into visually plausible ranges and rounded before they leave
//! this module, so the clamp bounds are never violated downstream.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::sample::{MotionProperty, Sample};

use super::velocity_profile;

/// Stiffness clamp range
pub const STIFFNESS_RANGE: (f64, f64) = (50.0, 500.0);
/// Damping-coefficient clamp range
pub const DAMPING_RANGE: (f64, f64) = (5.0, 40.0);
/// Mass clamp range
pub const MASS_RANGE: (f64, f64) = (0.5, 5.0);

/// Natural frequency (rad/s) assumed when no full period is measurable.
const FALLBACK_OMEGA: f64 = 10.0;
/// Damping ratio assumed when peak decay is not measurable.
const FALLBACK_ZETA: f64 = 0.3;
/// Minimum samples before peak decay is trusted at all.
const MIN_SAMPLES_FOR_DECAY: usize = 10;

/// Physically plausible spring parameters for replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringParameters {
    /// Spring stiffness, clamped to [50, 500]
    pub stiffness: f64,
    /// Damping coefficient, clamped to [5, 40]
    pub damping: f64,
    /// Oscillating mass, clamped to [0.5, 5]
    pub mass: f64,
    /// First measured velocity, units per second
    pub initial_velocity: f64,
    /// Normalized overshoot proxy in [0, 1]
    pub bounce: f64,
}

/// Estimate spring parameters from one property's sampled motion.
///
/// Never fails: every degenerate measurement (no crossings, no peaks, too few
/// samples) falls back to a documented constant, and the result is always
/// clamped and rounded.
#[must_use]
pub fn estimate_spring(samples: &[Sample], property: MotionProperty) -> SpringParameters {
    estimate_with_decay(samples, property).0
}

/// Estimate parameters and also report the measured peak decay rate, which
/// classification surfaces as analysis metadata.
pub(super) fn estimate_with_decay(
    samples: &[Sample],
    property: MotionProperty,
) -> (SpringParameters, f64) {
    let positions: Vec<f64> = samples.iter().map(|s| s.project(property)).collect();
    let times: Vec<f64> = samples.iter().map(|s| s.time).collect();
    let target = positions.last().copied().unwrap_or(0.0);

    let period_ms = full_period_ms(&positions, &times, target);
    let decay = peak_decay_rate(&positions, target);

    // Natural frequency from the measured period, in rad/s.
    let omega = if period_ms > 0.0 {
        2.0 * std::f64::consts::PI / (period_ms / 1000.0)
    } else {
        FALLBACK_OMEGA
    };

    // Log-decrement gives the damping ratio when the decay is a real decay.
    let zeta = if decay > 0.0 && decay < 1.0 {
        -decay.ln() / (2.0 * std::f64::consts::PI)
    } else {
        FALLBACK_ZETA
    };

    let mass = 1.0_f64;
    let stiffness = clamp_round1(omega * omega * mass, STIFFNESS_RANGE);
    let damping = clamp_round1(2.0 * zeta * (stiffness * mass).sqrt(), DAMPING_RANGE);
    let mass = clamp_round1(mass, MASS_RANGE);

    // Measured per millisecond, reported per second.
    let initial_velocity = velocity_profile(samples, property)
        .first()
        .map_or(0.0, |p| p.velocity * 1000.0);

    let bounce = round2((1.0 - zeta).clamp(0.0, 1.0));

    trace!(period_ms, decay, omega, zeta, "spring parameters estimated");

    (
        SpringParameters {
            stiffness,
            damping,
            mass,
            initial_velocity,
            bounce,
        },
        decay,
    )
}

/// Full oscillation period in milliseconds: mean spacing between successive
/// zero-crossings of `position - target`, times two. 0 with fewer than two
/// crossings.
fn full_period_ms(positions: &[f64], times: &[f64], target: f64) -> f64 {
    let mut crossings: Vec<f64> = Vec::new();
    for i in 1..positions.len() {
        let (prev, curr) = (positions[i - 1] - target, positions[i] - target);
        if prev * curr < 0.0 {
            // Linear interpolation inside the crossing interval.
            let fraction = prev / (prev - curr);
            crossings.push(times[i - 1] + fraction * (times[i] - times[i - 1]));
        }
    }
    if crossings.len() < 2 {
        return 0.0;
    }
    let spacings: Vec<f64> = crossings.windows(2).map(|w| w[1] - w[0]).collect();
    let mean = spacings.iter().sum::<f64>() / spacings.len() as f64;
    mean * 2.0
}

/// Mean ratio of successive peak amplitudes relative to the target value.
/// 0 with fewer than [`MIN_SAMPLES_FOR_DECAY`] samples or fewer than two
/// peaks.
fn peak_decay_rate(positions: &[f64], target: f64) -> f64 {
    if positions.len() < MIN_SAMPLES_FOR_DECAY {
        return 0.0;
    }
    let mut amplitudes: Vec<f64> = Vec::new();
    for i in 1..positions.len().saturating_sub(1) {
        let rising = positions[i] - positions[i - 1];
        let falling = positions[i + 1] - positions[i];
        if rising * falling < 0.0 {
            amplitudes.push((positions[i] - target).abs());
        }
    }
    if amplitudes.len() < 2 {
        return 0.0;
    }
    let ratios: Vec<f64> = amplitudes
        .windows(2)
        .filter(|w| w[0] > 1e-9)
        .map(|w| w[1] / w[0])
        .collect();
    if ratios.is_empty() {
        return 0.0;
    }
    ratios.iter().sum::<f64>() / ratios.len() as f64
}

fn clamp_round1(value: f64, range: (f64, f64)) -> f64 {
    (value.clamp(range.0, range.1) * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
