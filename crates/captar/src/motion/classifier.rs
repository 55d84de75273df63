//! Easing-family classification over one property's sampled motion.
//!
//! The decision table is an ordered guard chain; later branches are reachable
//! only when every earlier one fails, so the order below is load-bearing.

use tracing::debug;

use crate::sample::{MotionProperty, Sample};

use super::{
    count_oscillations, detect_overshoot, spring, velocity_profile, EasingFamily, MotionAnalysis,
    MotionMetadata,
};

/// Minimum samples for any classification beyond the fixed default.
pub const MIN_SAMPLES: usize = 3;

/// Velocity coefficient-of-variation ceiling for "near-constant speed".
const LINEAR_COV_CEILING: f64 = 0.2;

/// Duration clamp range in seconds for [`estimate_duration`].
pub const DURATION_RANGE_SECS: (f64, f64) = (0.1, 2.0);

/// Classify one property's motion into an easing family.
///
/// With fewer than [`MIN_SAMPLES`] samples the fixed default
/// (`ease-out`, confidence 0.3) is returned; otherwise the guard chain runs
/// in priority order: spring, linear, ease-in-out, ease-in, ease-out, custom.
#[must_use]
pub fn analyze(samples: &[Sample], property: MotionProperty) -> MotionAnalysis {
    if samples.len() < MIN_SAMPLES {
        debug!(
            count = samples.len(),
            "too few samples, returning default classification"
        );
        return MotionAnalysis::insufficient_data();
    }

    let positions: Vec<f64> = samples.iter().map(|s| s.project(property)).collect();
    let profile = velocity_profile(samples, property);
    let speeds: Vec<f64> = profile.iter().map(|p| p.velocity.abs()).collect();

    let mut metadata = MotionMetadata {
        has_overshoot: detect_overshoot(&positions),
        oscillation_count: count_oscillations(&positions),
        peak_velocity: speeds.iter().copied().fold(0.0, f64::max),
        decay_rate: 0.0,
    };

    // 1. Overshoot or oscillation means spring physics.
    if metadata.has_overshoot || metadata.oscillation_count > 0 {
        let (params, decay) = spring::estimate_with_decay(samples, property);
        metadata.decay_rate = decay;
        let confidence = (0.6 + 0.1 * metadata.oscillation_count as f64).min(0.95);
        debug!(?property, confidence, "classified as spring");
        return MotionAnalysis {
            family: EasingFamily::Spring,
            spring: Some(params),
            curve: None,
            confidence,
            metadata,
        };
    }

    // All remaining branches compare speed statistics; with no usable
    // velocity pairs (every dt was zero) the motion is unclassifiable.
    if speeds.len() < 2 {
        debug!(?property, "no usable velocity pairs, classifying as custom");
        return MotionAnalysis {
            family: EasingFamily::Custom,
            spring: None,
            curve: None,
            confidence: 0.5,
            metadata,
        };
    }

    // 2. Near-constant speed is linear.
    let cov = coefficient_of_variation(&speeds);
    if cov < LINEAR_COV_CEILING {
        return tween(
            EasingFamily::Linear,
            (1.0 - cov).clamp(0.5, 0.95),
            metadata,
        );
    }

    // 3-5. Compare the first and last quarters of the speed profile.
    let quarter = (speeds.len() / 4).max(1);
    let start_speed = mean(&speeds[..quarter]);
    let end_speed = mean(&speeds[speeds.len() - quarter..]);
    let slow_start = start_speed < end_speed / 2.0;
    let slow_end = end_speed < start_speed / 2.0;

    match (slow_start, slow_end) {
        (true, true) => tween(EasingFamily::EaseInOut, 0.75, metadata),
        (true, false) => tween(EasingFamily::EaseIn, 0.7, metadata),
        (false, true) => tween(EasingFamily::EaseOut, 0.7, metadata),
        // 6. Nothing matched.
        (false, false) => MotionAnalysis {
            family: EasingFamily::Custom,
            spring: None,
            curve: None,
            confidence: 0.5,
            metadata,
        },
    }
}

/// Duration estimate in seconds from the sampled time span, clamped to
/// [`DURATION_RANGE_SECS`]. Used when no other duration signal exists.
#[must_use]
pub fn estimate_duration(samples: &[Sample]) -> f64 {
    let span_ms = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => last.time - first.time,
        _ => 0.0,
    };
    (span_ms / 1000.0).clamp(DURATION_RANGE_SECS.0, DURATION_RANGE_SECS.1)
}

fn tween(family: EasingFamily, confidence: f64, metadata: MotionMetadata) -> MotionAnalysis {
    debug!(?family, confidence, "classified as tween");
    MotionAnalysis {
        family,
        spring: None,
        curve: family.curve_token().map(str::to_string),
        confidence,
        metadata,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation over mean of the speed profile. A zero mean is a
/// perfectly constant (all-stopped) profile, reported as zero variation.
fn coefficient_of_variation(speeds: &[f64]) -> f64 {
    let mu = mean(speeds);
    if mu < 1e-12 {
        return 0.0;
    }
    let variance = speeds.iter().map(|s| (s - mu) * (s - mu)).sum::<f64>() / speeds.len() as f64;
    variance.sqrt() / mu
}
