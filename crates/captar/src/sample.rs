//! Sampled motion data: timestamped observations, frozen recordings, and the
//! caller-owned session that accumulates them.
//!
//! The mechanism that produces samples (a headless renderer, a scripted test
//! double, a synthetic generator) lives behind the [`FrameSource`] trait so
//! the engine never touches a live rendering environment directly.

use serde::{Deserialize, Serialize};

use crate::motion::EasingFamily;
use crate::trigger::TriggerKind;

/// One timestamped observation of an element's visual state.
///
/// `time` is monotonic, in milliseconds from the start of the recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Milliseconds from recording start (non-decreasing within a sequence)
    pub time: f64,
    /// Horizontal translation in units
    pub x: f64,
    /// Vertical translation in units
    pub y: f64,
    /// Uniform scale factor (1.0 = unscaled)
    pub scale: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Opacity in [0, 1]
    pub opacity: f64,
    /// Resolved background color, if sampled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Resolved text color, if sampled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Sample {
    /// Create a sample at rest (identity transform, fully opaque).
    #[must_use]
    pub fn at_rest(time: f64) -> Self {
        Self {
            time,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
            background_color: None,
            color: None,
        }
    }

    /// Project one scalar property out of this sample.
    #[must_use]
    pub fn project(&self, property: MotionProperty) -> f64 {
        match property {
            MotionProperty::X => self.x,
            MotionProperty::Y => self.y,
            MotionProperty::Scale => self.scale,
            MotionProperty::Rotation => self.rotation,
            MotionProperty::Opacity => self.opacity,
        }
    }
}

/// Scalar property of a [`Sample`] that motion analysis can project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionProperty {
    /// Horizontal translation
    X,
    /// Vertical translation
    Y,
    /// Uniform scale
    Scale,
    /// Rotation (degrees)
    Rotation,
    /// Opacity
    Opacity,
}

/// A completed capture of one element's motion.
///
/// Created once when sampling completes; immutable afterward. The sole input
/// to descriptor generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Stable key identifying the captured element
    pub element_key: String,
    /// Causal condition that started the animation
    pub trigger: TriggerKind,
    /// Classified easing family for the dominant property
    pub easing: EasingFamily,
    /// Total recorded time span in milliseconds
    pub total_duration_ms: f64,
    /// Ordered samples with non-decreasing time
    pub samples: Vec<Sample>,
}

/// Caller-owned accumulation of in-flight samples for one element.
///
/// Each session owns an independent buffer, so multiple elements can be
/// recorded concurrently without interference. A session abandoned after a
/// single sample still freezes into a valid (low-confidence) recording.
#[derive(Debug, Clone)]
pub struct RecordingSession {
    element_key: String,
    trigger: TriggerKind,
    samples: Vec<Sample>,
}

impl RecordingSession {
    /// Start a session for one element.
    #[must_use]
    pub fn new(element_key: impl Into<String>, trigger: TriggerKind) -> Self {
        Self {
            element_key: element_key.into(),
            trigger,
            samples: Vec::new(),
        }
    }

    /// Append one observation. Out-of-order timestamps are clamped forward so
    /// the frozen sequence stays non-decreasing.
    pub fn push(&mut self, mut sample: Sample) {
        if let Some(last) = self.samples.last() {
            if sample.time < last.time {
                sample.time = last.time;
            }
        }
        self.samples.push(sample);
    }

    /// The samples accumulated so far, for pre-freeze analysis.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if no samples have been captured yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Freeze the session into an immutable [`Recording`].
    ///
    /// `easing` is the classification of the dominant property, computed by
    /// the caller from the same sample buffer.
    #[must_use]
    pub fn finish(self, easing: EasingFamily) -> Recording {
        let total_duration_ms = match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        };
        Recording {
            element_key: self.element_key,
            trigger: self.trigger,
            easing,
            total_duration_ms,
            samples: self.samples,
        }
    }
}

/// Source of ordered samples and resolved property values for one element.
///
/// Implemented by the excluded frame-sampling collaborator; tests substitute
/// [`crate::mock::MockFrameSource`].
pub trait FrameSource {
    /// The ordered sample sequence captured for the element.
    fn samples(&self) -> &[Sample];

    /// Resolve one named visual property to its current string value.
    fn resolved_property(&self, name: &str) -> Option<String>;
}
