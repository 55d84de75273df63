//! Motion classification: easing-family detection and spring-parameter
//! estimation over sampled scalar motion.
//!
//! Nothing in this module errors or panics. Every degenerate numeric case
//! (too few samples, zero time deltas, empty peak lists, near-zero
//! denominators) takes an explicit fallback branch, and callers judge trust
//! through [`MotionAnalysis::confidence`].

mod classifier;
mod spring;
mod velocity;

pub use classifier::{analyze, estimate_duration};
pub use spring::{estimate_spring, SpringParameters};
pub use velocity::{count_oscillations, detect_overshoot, velocity_profile, VelocityPoint};

use serde::{Deserialize, Serialize};

/// Closed set of replayable easing families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingFamily {
    /// Near-constant velocity
    Linear,
    /// Slow start
    EaseIn,
    /// Slow end
    EaseOut,
    /// Slow start and end
    EaseInOut,
    /// Overshooting, oscillating motion
    Spring,
    /// No named family matched
    Custom,
}

impl EasingFamily {
    /// Equivalent replay-curve token, where one exists.
    ///
    /// Spring motion replays from its parameters and custom motion has no
    /// faithful token, so both map to `None`.
    #[must_use]
    pub const fn curve_token(self) -> Option<&'static str> {
        match self {
            Self::Linear => Some("linear"),
            Self::EaseIn => Some("ease-in"),
            Self::EaseOut => Some("ease-out"),
            Self::EaseInOut => Some("ease-in-out"),
            Self::Spring | Self::Custom => None,
        }
    }
}

/// Measurements recorded alongside a classification.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionMetadata {
    /// Any interior position passed beyond the final value
    pub has_overshoot: bool,
    /// Full oscillations around the final value
    pub oscillation_count: usize,
    /// Largest observed |velocity|, units per millisecond
    pub peak_velocity: f64,
    /// Mean successive peak-amplitude ratio (0 when not measurable)
    pub decay_rate: f64,
}

/// Result of classifying one property's motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionAnalysis {
    /// Classified easing family
    pub family: EasingFamily,
    /// Estimated spring parameters, present only for [`EasingFamily::Spring`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spring: Option<SpringParameters>,
    /// Equivalent replay-curve token for tween families
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
    /// Trust in the classification, always in [0, 1]
    pub confidence: f64,
    /// Supporting measurements
    pub metadata: MotionMetadata,
}

impl MotionAnalysis {
    /// The fixed low-confidence default returned when fewer than three
    /// samples are available.
    #[must_use]
    pub fn insufficient_data() -> Self {
        Self {
            family: EasingFamily::EaseOut,
            spring: None,
            curve: EasingFamily::EaseOut.curve_token().map(str::to_string),
            confidence: 0.3,
            metadata: MotionMetadata::default(),
        }
    }
}
