//! Captar: Motion Decomposition & Descriptor Synthesis
//!
//! Captar (Spanish: "to capture") reverse-engineers a compact, engine-portable
//! description of how an element moves during an animation: a small set of
//! named states plus a classified motion curve (linear, eased, or
//! spring-physics) that a different rendering engine can replay.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      CAPTAR Pipeline                             │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  Frame Source ──► Samples ──► MotionClassifier ──► Descriptor    │
//! │   (excluded)        │          + SpringEstimator       ▲         │
//! │                     │                                  │         │
//! │  transform strings ─┴─► MatrixDecomposer   TriggerClassifier     │
//! │                                             (live element)       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The excluded collaborators (frame sampling, the live element/listener
//! substrate, markup extraction, bundling, UI) sit behind the traits in
//! [`sample`] and [`dom`]; everything in this crate is a synchronous,
//! side-effect-free transform over already-collected values, except the
//! four-watcher trigger subscription in [`trigger::watch`].
//!
//! # Example
//!
//! ```rust
//! use captar::prelude::*;
//!
//! let mut session = RecordingSession::new("hero", TriggerKind::Scroll);
//! for i in 0..10 {
//!     session.push(Sample {
//!         opacity: f64::from(i) / 9.0,
//!         ..Sample::at_rest(f64::from(i) * 40.0)
//!     });
//! }
//! let analysis = analyze(session.samples(), MotionProperty::Opacity);
//! let recording = session.finish(analysis.family);
//! let generated = generate(&recording);
//! assert!(generated.code.contains("HeroMotion"));
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod descriptor;
pub mod dom;
pub mod mock;
pub mod motion;
pub mod result;
pub mod sample;
pub mod transform;
pub mod trigger;

pub use descriptor::{generate, generate_manifest, AnimationDescriptor, GeneratedDescriptor};
pub use motion::{analyze, estimate_duration, EasingFamily, MotionAnalysis, SpringParameters};
pub use result::{CaptarError, CaptarResult};
pub use sample::{MotionProperty, Recording, RecordingSession, Sample};
pub use transform::{decompose, parse_transform, MotionComponents, TransformRepresentation};
pub use trigger::{infer, synthesize_key, watch, TriggerContext, TriggerKind};

/// Commonly used types and functions, one import away.
pub mod prelude {
    pub use crate::descriptor::{
        compact_form, component_identifier, generate, generate_manifest, render_code,
        AnimationDescriptor, GeneratedDescriptor, Manifest, Phase, StateBag, StateValue,
        Transition, ViewportPolicy,
    };
    pub use crate::dom::{DomAdapter, ElementId, EventSubstrate, Subscription};
    pub use crate::motion::{
        analyze, estimate_duration, estimate_spring, EasingFamily, MotionAnalysis, MotionMetadata,
        SpringParameters, VelocityPoint,
    };
    pub use crate::result::{CaptarError, CaptarResult};
    pub use crate::sample::{FrameSource, MotionProperty, Recording, RecordingSession, Sample};
    pub use crate::transform::{
        decompose, dominant_axis, equal_within_tolerance, parse_transform, Axis, MotionComponents,
        TransformFunction, TransformRepresentation,
    };
    pub use crate::trigger::{
        collect_animation_candidates, collect_cursors, detect_cursor, infer, synthesize_key,
        watch, CursorInfo, TriggerCallback, TriggerContext, TriggerKind, WatchHandle,
    };
}
