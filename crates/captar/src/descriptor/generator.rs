//! Descriptor generation: merging classification, trigger, and boundary
//! states into one phase-keyed descriptor.

use tracing::debug;

use crate::motion::{analyze, EasingFamily, MotionAnalysis};
use crate::sample::{MotionProperty, Recording, Sample};
use crate::transform::{dominant_axis, Axis, MotionComponents};
use crate::trigger::TriggerKind;

use super::{
    compact_form, render_code, AnimationDescriptor, Phase, StateBag, StateValue, Transition,
    ViewportPolicy,
};

/// Position deltas below this are treated as "at rest".
const POSITION_EPSILON: f64 = 0.1;
/// Scale deltas from 1 below this are neutral.
const SCALE_EPSILON: f64 = 0.01;
/// Rotation deltas below this (degrees) are neutral.
const ROTATION_EPSILON: f64 = 0.1;
/// Opacity deltas from 1 below this are neutral.
const OPACITY_EPSILON: f64 = 0.01;

/// Tween duration clamp in seconds.
const DURATION_RANGE_SECS: (f64, f64) = (0.1, 2.0);

/// A descriptor together with its two serializations.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDescriptor {
    /// The internal phase-keyed value
    pub descriptor: AnimationDescriptor,
    /// Compact keyed form, one attribute value
    pub compact: String,
    /// Verbose authoring form
    pub code: String,
}

/// Generate a descriptor from one completed recording.
///
/// Total: a recording with fewer than two samples yields the explicit no-op
/// descriptor rather than an error.
#[must_use]
pub fn generate(recording: &Recording) -> GeneratedDescriptor {
    let descriptor = build_descriptor(recording);
    let compact = compact_form(&descriptor);
    let code = render_code(&recording.element_key, &descriptor);
    GeneratedDescriptor {
        descriptor,
        compact,
        code,
    }
}

fn build_descriptor(recording: &Recording) -> AnimationDescriptor {
    let (Some(first), Some(last)) = (recording.samples.first(), recording.samples.last()) else {
        return AnimationDescriptor::no_op();
    };
    if recording.samples.len() < 2 {
        debug!(key = %recording.element_key, "single-sample recording, emitting no-op descriptor");
        return AnimationDescriptor::no_op();
    }

    let initial = state_bag(first);
    let target = target_bag(first, last);

    let analysis = analyze(&recording.samples, dominant_property(first, last));
    let transition = synthesize_transition(recording, &analysis);

    let (phase, viewport) = match recording.trigger {
        TriggerKind::Load => (Phase::Animate, None),
        TriggerKind::Hover => (Phase::WhileHovering, None),
        TriggerKind::Scroll | TriggerKind::Intersection => {
            (Phase::WhileInView, Some(ViewportPolicy::scroll_default()))
        }
        TriggerKind::Click => (Phase::WhilePressed, None),
        TriggerKind::Focus => (Phase::WhileFocused, None),
    };

    AnimationDescriptor {
        initial,
        phase,
        phase_state: target,
        transition,
        viewport,
    }
}

/// Pick the property to classify: the axis that moved the most between the
/// boundary samples, falling back to opacity for pure fades.
fn dominant_property(first: &Sample, last: &Sample) -> MotionProperty {
    let from = components_of(first);
    let to = components_of(last);
    match dominant_axis(&from, &to) {
        Axis::X => MotionProperty::X,
        Axis::Y => MotionProperty::Y,
        Axis::Scale => MotionProperty::Scale,
        Axis::Rotate => MotionProperty::Rotation,
        Axis::Z | Axis::None => {
            if (last.opacity - first.opacity).abs() > OPACITY_EPSILON {
                MotionProperty::Opacity
            } else {
                MotionProperty::Y
            }
        }
    }
}

fn components_of(sample: &Sample) -> MotionComponents {
    MotionComponents {
        translate_x: sample.x,
        translate_y: sample.y,
        scale_x: sample.scale,
        scale_y: sample.scale,
        rotate_z: sample.rotation,
        ..MotionComponents::identity()
    }
}

fn synthesize_transition(recording: &Recording, analysis: &MotionAnalysis) -> Transition {
    if analysis.family == EasingFamily::Spring {
        if let Some(params) = analysis.spring {
            return Transition::Spring { params };
        }
    }

    let duration = (recording.total_duration_ms / 1000.0)
        .clamp(DURATION_RANGE_SECS.0, DURATION_RANGE_SECS.1);
    let curve = analysis
        .family
        .curve_token()
        .unwrap_or("ease-out")
        .to_string();
    Transition::Tween { duration, curve }
}

/// Build the populated-phase bag: a property appears when it moved between
/// the boundary samples beyond its epsilon, carrying the final value. An
/// animation that settles back to rest (fade to opacity 1, slide to y 0)
/// still names the properties it animated.
fn target_bag(first: &Sample, last: &Sample) -> StateBag {
    let mut bag = StateBag::new();
    if (last.x - first.x).abs() > POSITION_EPSILON {
        bag.insert("x".to_string(), StateValue::Number(last.x));
    }
    if (last.y - first.y).abs() > POSITION_EPSILON {
        bag.insert("y".to_string(), StateValue::Number(last.y));
    }
    if (last.scale - first.scale).abs() > SCALE_EPSILON {
        bag.insert("scale".to_string(), StateValue::Number(last.scale));
    }
    if (last.rotation - first.rotation).abs() > ROTATION_EPSILON {
        bag.insert("rotate".to_string(), StateValue::Number(last.rotation));
    }
    if (last.opacity - first.opacity).abs() > OPACITY_EPSILON {
        bag.insert("opacity".to_string(), StateValue::Number(last.opacity));
    }
    if let Some(color) = non_transparent(&last.background_color) {
        bag.insert("backgroundColor".to_string(), StateValue::Text(color));
    }
    if let Some(color) = non_transparent(&last.color) {
        bag.insert("color".to_string(), StateValue::Text(color));
    }
    bag
}

/// Build the initial state bag: a property appears only when it differs from
/// its neutral default beyond a small epsilon.
fn state_bag(sample: &Sample) -> StateBag {
    let mut bag = StateBag::new();
    if sample.x.abs() > POSITION_EPSILON {
        bag.insert("x".to_string(), StateValue::Number(sample.x));
    }
    if sample.y.abs() > POSITION_EPSILON {
        bag.insert("y".to_string(), StateValue::Number(sample.y));
    }
    if (sample.scale - 1.0).abs() > SCALE_EPSILON {
        bag.insert("scale".to_string(), StateValue::Number(sample.scale));
    }
    if sample.rotation.abs() > ROTATION_EPSILON {
        bag.insert("rotate".to_string(), StateValue::Number(sample.rotation));
    }
    if (sample.opacity - 1.0).abs() > OPACITY_EPSILON {
        bag.insert("opacity".to_string(), StateValue::Number(sample.opacity));
    }
    if let Some(color) = non_transparent(&sample.background_color) {
        bag.insert("backgroundColor".to_string(), StateValue::Text(color));
    }
    if let Some(color) = non_transparent(&sample.color) {
        bag.insert("color".to_string(), StateValue::Text(color));
    }
    bag
}

fn non_transparent(color: &Option<String>) -> Option<String> {
    color
        .as_deref()
        .map(str::trim)
        .filter(|value| {
            !value.is_empty() && *value != "transparent" && *value != "rgba(0, 0, 0, 0)"
        })
        .map(str::to_string)
}
