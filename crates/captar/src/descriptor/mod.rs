//! Animation descriptors: the portable, declarative output of the engine.
//!
//! A descriptor is per-phase state bags plus one transition, independent of
//! any specific replay engine. It is produced once from an immutable
//! [`crate::sample::Recording`] and never mutated; the compact and authoring
//! serializations both derive from the same internal value.

mod code;
mod compact;
mod generator;
mod manifest;

pub use code::{component_identifier, render_code};
pub use compact::compact_form;
pub use generator::{generate, GeneratedDescriptor};
pub use manifest::{generate_manifest, Manifest, ManifestEntry};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::motion::SpringParameters;

/// One state property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    /// Numeric property (position, scale, rotation, opacity)
    Number(f64),
    /// Textual property (colors)
    Text(String),
}

/// Minimal diff of visual properties against their neutral defaults.
///
/// Keys are sorted so serialized output is deterministic.
pub type StateBag = BTreeMap<String, StateValue>;

/// The single phase a descriptor populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Plays immediately (load-triggered)
    #[serde(rename = "animate")]
    Animate,
    /// Active while hovered
    #[serde(rename = "while-hovering")]
    WhileHovering,
    /// Active while in the viewport
    #[serde(rename = "while-in-view")]
    WhileInView,
    /// Active while pressed
    #[serde(rename = "while-pressed")]
    WhilePressed,
    /// Active while focused
    #[serde(rename = "while-focused")]
    WhileFocused,
}

impl Phase {
    /// Short key used by the compact serialization.
    #[must_use]
    pub const fn compact_key(self) -> &'static str {
        match self {
            Self::Animate => "final",
            Self::WhileHovering => "hover",
            Self::WhileInView => "view",
            Self::WhilePressed => "tap",
            Self::WhileFocused => "focus",
        }
    }

    /// Property name used by the authoring serialization.
    #[must_use]
    pub const fn authoring_key(self) -> &'static str {
        match self {
            Self::Animate => "animate",
            Self::WhileHovering => "whileHover",
            Self::WhileInView => "whileInView",
            Self::WhilePressed => "whileTap",
            Self::WhileFocused => "whileFocus",
        }
    }
}

/// How the populated phase is reached from the initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transition {
    /// Duration-and-curve tween
    Tween {
        /// Seconds, clamped to [0.1, 2]
        duration: f64,
        /// Replay-curve token
        curve: String,
    },
    /// Physical spring
    Spring {
        /// Clamped estimated parameters
        #[serde(flatten)]
        params: SpringParameters,
    },
}

impl Transition {
    /// The fixed fallback when no classification is available:
    /// a 0.3 s ease-out tween.
    #[must_use]
    pub fn fallback() -> Self {
        Self::Tween {
            duration: 0.3,
            curve: "ease-out".to_string(),
        }
    }
}

/// Viewport policy attached to scroll-driven descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportPolicy {
    /// Fire only on first entry
    pub once: bool,
    /// Begin observing this far outside the viewport
    pub margin: String,
    /// Visible-area fraction that triggers
    pub amount: f64,
}

impl ViewportPolicy {
    /// The fixed policy for scroll-triggered animations: fire once, begin
    /// 100px before entry, trigger at 30% visible area.
    #[must_use]
    pub fn scroll_default() -> Self {
        Self {
            once: true,
            margin: "-100px".to_string(),
            amount: 0.3,
        }
    }
}

/// The portable animation descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDescriptor {
    /// State before the animation runs
    pub initial: StateBag,
    /// Which phase holds the target state
    pub phase: Phase,
    /// Target state for the populated phase
    pub phase_state: StateBag,
    /// How the phase state is reached
    pub transition: Transition,
    /// Present only for viewport-driven phases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<ViewportPolicy>,
}

impl AnimationDescriptor {
    /// The explicit no-op descriptor for recordings with fewer than two
    /// samples: empty states and the fallback tween.
    #[must_use]
    pub fn no_op() -> Self {
        Self {
            initial: StateBag::new(),
            phase: Phase::Animate,
            phase_state: StateBag::new(),
            transition: Transition::fallback(),
            viewport: None,
        }
    }
}
