//! Compact serialization: short keys, one JSON object, suitable for
//! embedding as a single attribute value on exported markup.

use serde_json::{json, Map, Value};

use super::{AnimationDescriptor, StateBag, StateValue, Transition};

/// Serialize a descriptor into its compact keyed form.
///
/// Shape: `{"initial": {...}, "<phase>": {...}, "t": {...}}` with the phase
/// under its short key (`final`, `hover`, `view`, `tap`, `focus`) and the
/// viewport policy folded into the `view` entry's sibling `v` key when
/// present. Serialization of these value types cannot realistically fail;
/// the degenerate fallback is the empty object.
#[must_use]
pub fn compact_form(descriptor: &AnimationDescriptor) -> String {
    let mut object = Map::new();
    object.insert("initial".to_string(), bag_to_value(&descriptor.initial));
    object.insert(
        descriptor.phase.compact_key().to_string(),
        bag_to_value(&descriptor.phase_state),
    );
    object.insert("t".to_string(), transition_value(&descriptor.transition));
    if let Some(viewport) = &descriptor.viewport {
        object.insert(
            "v".to_string(),
            json!({
                "once": viewport.once,
                "margin": viewport.margin,
                "amount": viewport.amount,
            }),
        );
    }
    serde_json::to_string(&Value::Object(object)).unwrap_or_else(|_| "{}".to_string())
}

fn bag_to_value(bag: &StateBag) -> Value {
    let mut object = Map::new();
    for (key, value) in bag {
        let json_value = match value {
            StateValue::Number(n) => json!(n),
            StateValue::Text(s) => json!(s),
        };
        object.insert(key.clone(), json_value);
    }
    Value::Object(object)
}

fn transition_value(transition: &Transition) -> Value {
    match transition {
        Transition::Tween { duration, curve } => json!({
            "type": "tween",
            "duration": duration,
            "curve": curve,
        }),
        Transition::Spring { params } => json!({
            "type": "spring",
            "stiffness": params.stiffness,
            "damping": params.damping,
            "mass": params.mass,
            "velocity": params.initial_velocity,
            "bounce": params.bounce,
        }),
    }
}
