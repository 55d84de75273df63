//! Trigger classification: determining which causal condition starts an
//! animation, passively (static inspection) or actively (event observation).

mod cursor;
mod infer;
mod selector;
pub mod watch;

pub use cursor::{collect_cursors, detect_cursor, CursorInfo};
pub use infer::{collect_animation_candidates, has_nontrivial_transition, infer};
pub use selector::synthesize_key;
pub use watch::{watch, TriggerCallback, WatchHandle};

use serde::{Deserialize, Serialize};

/// Closed set of causal conditions that can start an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// Starts when the page loads
    Load,
    /// Starts on pointer hover
    Hover,
    /// Starts when scrolled toward
    Scroll,
    /// Starts when entering the viewport
    Intersection,
    /// Starts on click/press
    Click,
    /// Starts on keyboard focus
    Focus,
}

/// A classified trigger with the context needed for replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerContext {
    /// The classified trigger
    pub kind: TriggerKind,
    /// Stable key of the triggering element
    pub target_key: String,
    /// Replay-relevant details
    pub metadata: TriggerMetadata,
}

/// Replay-relevant trigger details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerMetadata {
    /// Visible-area ratio at which a visibility trigger fires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_threshold: Option<f64>,
    /// Root margin for visibility observation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    /// The animation is declared in style rules rather than scripted
    pub style_driven: bool,
    /// Event names associated with this trigger
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub event_names: Vec<String>,
}

impl TriggerContext {
    /// Context for a non-visibility trigger.
    #[must_use]
    pub fn new(kind: TriggerKind, target_key: impl Into<String>, style_driven: bool) -> Self {
        let event_names = match kind {
            TriggerKind::Hover => vec!["pointerenter".to_string()],
            TriggerKind::Click => vec!["click".to_string()],
            TriggerKind::Focus => vec!["focus".to_string()],
            TriggerKind::Load | TriggerKind::Scroll | TriggerKind::Intersection => Vec::new(),
        };
        Self {
            kind,
            target_key: target_key.into(),
            metadata: TriggerMetadata {
                style_driven,
                event_names,
                ..TriggerMetadata::default()
            },
        }
    }

    /// Context for a visibility-driven trigger.
    #[must_use]
    pub fn visibility(
        kind: TriggerKind,
        target_key: impl Into<String>,
        threshold: f64,
        margin: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            target_key: target_key.into(),
            metadata: TriggerMetadata {
                visibility_threshold: Some(threshold),
                margin: Some(margin.into()),
                ..TriggerMetadata::default()
            },
        }
    }
}
