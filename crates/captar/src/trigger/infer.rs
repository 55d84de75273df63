//! Passive trigger inference: static inspection of one element's resolved
//! state, no subscriptions involved.
//!
//! The guard chain runs in a fixed priority order; the final `Scroll` default
//! is a deliberate bias toward the tool's primary target content, not an
//! accident.

use tracing::debug;

use crate::dom::{DomAdapter, ElementId};
use crate::transform::{decompose, parse_transform};

use super::TriggerKind;

/// Class-token vocabulary that marks scroll-driven animation conventions.
pub const SCROLL_CLASS_VOCABULARY: &[&str] = &[
    "scroll",
    "reveal",
    "fade-in",
    "fade-up",
    "slide-in",
    "animate-on-scroll",
    "aos",
    "in-view",
    "parallax",
];

/// Class-token vocabulary that marks an element as animated at all.
pub const ANIMATION_CLASS_VOCABULARY: &[&str] = &[
    "animate", "animated", "motion", "fade", "slide", "zoom", "bounce", "reveal", "parallax",
];

/// Data attributes that explicitly mark an element for animation tooling.
const ANIMATION_MARKER_ATTRIBUTES: &[&str] = &["data-animate", "data-aos", "data-motion"];

/// Tags that are natively focusable.
const FOCUSABLE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

/// Infer the trigger for one element from static inspection.
///
/// Guards are evaluated in order, first match wins: hover affordance, scroll
/// vocabulary, click affordance, focusability, declared motion effect, and
/// finally the `Scroll` default.
#[must_use]
pub fn infer(dom: &dyn DomAdapter, el: ElementId) -> TriggerKind {
    let kind = infer_inner(dom, el);
    debug!(element = el.0, ?kind, "trigger inferred");
    kind
}

fn infer_inner(dom: &dyn DomAdapter, el: ElementId) -> TriggerKind {
    // 1. Hover affordance: pointer cursor, or a transition that would play
    //    on a state change.
    let cursor = dom.resolved_style(el, "cursor").unwrap_or_default();
    if cursor == "pointer" || has_nontrivial_transition(dom, el) {
        return TriggerKind::Hover;
    }

    // 2. Scroll-animation class conventions.
    let classes = dom.class_list(el);
    if classes.iter().any(|class| {
        let lower = class.to_ascii_lowercase();
        SCROLL_CLASS_VOCABULARY
            .iter()
            .any(|token| lower.contains(token))
    }) {
        return TriggerKind::Scroll;
    }

    // 3. Click affordance.
    if dom.attribute(el, "onclick").is_some()
        || dom.attribute(el, "data-click").is_some()
        || dom.attribute(el, "role").as_deref() == Some("button")
        || dom.tag_name(el) == "button"
    {
        return TriggerKind::Click;
    }

    // 4. Focusable.
    let tag = dom.tag_name(el);
    if FOCUSABLE_TAGS.contains(&tag.as_str()) || dom.attribute(el, "tabindex").is_some() {
        return TriggerKind::Focus;
    }

    // 5. A declared or running motion effect plays on load.
    if has_declared_animation(dom, el) {
        return TriggerKind::Load;
    }

    // 6. Default.
    TriggerKind::Scroll
}

/// True if the element declares a transition with a non-zero duration.
#[must_use]
pub fn has_nontrivial_transition(dom: &dyn DomAdapter, el: ElementId) -> bool {
    let Some(transition) = dom.resolved_style(el, "transition") else {
        return false;
    };
    let trimmed = transition.trim();
    if trimmed.is_empty() || trimmed == "none" {
        return false;
    }
    // "all 0s ease 0s" is the resolved no-op transition.
    has_nonzero_duration(trimmed)
}

fn has_nonzero_duration(transition: &str) -> bool {
    transition
        .split(|c: char| c == ' ' || c == ',')
        .filter_map(|token| {
            let token = token.trim();
            token
                .strip_suffix("ms")
                .or_else(|| token.strip_suffix('s'))
                .and_then(|n| n.parse::<f64>().ok())
        })
        .any(|duration| duration > 0.0)
}

fn has_declared_animation(dom: &dyn DomAdapter, el: ElementId) -> bool {
    dom.resolved_style(el, "animation-name")
        .map(|name| {
            let trimmed = name.trim().to_string();
            !trimmed.is_empty() && trimmed != "none"
        })
        .unwrap_or(false)
}

/// Collect elements in the subtree that look like animation candidates.
///
/// A fixed allow-list heuristic: declared/running motion effect, non-trivial
/// transition, non-identity transform, a non-default `will-change` hint, a
/// class-vocabulary match, or an explicit marker data-attribute. False
/// positives are fine; downstream sample variance filters them out.
#[must_use]
pub fn collect_animation_candidates(dom: &dyn DomAdapter, root: ElementId) -> Vec<ElementId> {
    let mut candidates = Vec::new();
    let mut stack = vec![root];
    while let Some(el) = stack.pop() {
        if is_animation_candidate(dom, el) {
            candidates.push(el);
        }
        let mut children = dom.children(el);
        children.reverse();
        stack.extend(children);
    }
    candidates
}

fn is_animation_candidate(dom: &dyn DomAdapter, el: ElementId) -> bool {
    if has_declared_animation(dom, el) || has_nontrivial_transition(dom, el) {
        return true;
    }

    if let Some(transform) = dom.resolved_style(el, "transform") {
        if !decompose(&parse_transform(&transform)).is_identity(0.01) {
            return true;
        }
    }

    if let Some(hint) = dom.resolved_style(el, "will-change") {
        let trimmed = hint.trim();
        if !trimmed.is_empty() && trimmed != "auto" {
            return true;
        }
    }

    if dom.class_list(el).iter().any(|class| {
        let lower = class.to_ascii_lowercase();
        ANIMATION_CLASS_VOCABULARY
            .iter()
            .any(|token| lower.contains(token))
    }) {
        return true;
    }

    ANIMATION_MARKER_ATTRIBUTES
        .iter()
        .any(|attr| dom.attribute(el, attr).is_some())
}
