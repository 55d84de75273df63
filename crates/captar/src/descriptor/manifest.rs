//! Batch manifest: one versioned document aggregating every recording of a
//! capture session, written as a companion artifact next to exported markup.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::motion::EasingFamily;
use crate::result::CaptarResult;
use crate::sample::Recording;
use crate::trigger::TriggerKind;

use super::{generate, StateBag};

/// Manifest schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Tag identifying the generator build.
pub const GENERATOR_TAG: &str = concat!("captar@", env!("CARGO_PKG_VERSION"));

/// One animation entry in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Causal trigger
    pub trigger: TriggerKind,
    /// Classified easing family
    pub easing: EasingFamily,
    /// Recorded span in milliseconds
    pub duration_ms: f64,
    /// Number of captured samples
    pub sample_count: usize,
    /// Initial and target state bags
    pub states: ManifestStates,
    /// Authoring-form code block
    pub code: String,
}

/// The two state bags of one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestStates {
    /// State before the animation
    pub initial: StateBag,
    /// Target state of the populated phase
    pub target: StateBag,
}

/// The versioned batch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Schema version of this document
    pub schema_version: u32,
    /// Generator build tag
    pub generator_tag: String,
    /// RFC 3339 creation timestamp
    pub timestamp: String,
    /// Entries keyed by element key
    pub animations: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    /// Serialize the manifest as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> CaptarResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Aggregate many keyed recordings into one manifest.
///
/// Keys repeat the recording's own element key by convention; when they
/// differ, the explicit pair key wins, so N distinct keys always produce
/// exactly N entries.
#[must_use]
pub fn generate_manifest(recordings: &[(String, Recording)]) -> Manifest {
    let mut animations = BTreeMap::new();
    for (key, recording) in recordings {
        let generated = generate(recording);
        animations.insert(
            key.clone(),
            ManifestEntry {
                trigger: recording.trigger,
                easing: recording.easing,
                duration_ms: recording.total_duration_ms,
                sample_count: recording.samples.len(),
                states: ManifestStates {
                    initial: generated.descriptor.initial,
                    target: generated.descriptor.phase_state,
                },
                code: generated.code,
            },
        );
    }
    Manifest {
        schema_version: SCHEMA_VERSION,
        generator_tag: GENERATOR_TAG.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        animations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Sample;

    fn recording(key: &str) -> (String, Recording) {
        (
            key.to_string(),
            Recording {
                element_key: key.to_string(),
                trigger: TriggerKind::Scroll,
                easing: EasingFamily::EaseOut,
                total_duration_ms: 300.0,
                samples: vec![
                    Sample {
                        opacity: 0.0,
                        ..Sample::at_rest(0.0)
                    },
                    Sample {
                        opacity: 0.6,
                        ..Sample::at_rest(150.0)
                    },
                    Sample::at_rest(300.0),
                ],
            },
        )
    }

    #[test]
    fn test_manifest_has_one_entry_per_key() {
        let recordings = vec![recording("a"), recording("b"), recording("c")];
        let manifest = generate_manifest(&recordings);
        assert_eq!(manifest.animations.len(), 3);
        assert_eq!(manifest.schema_version, SCHEMA_VERSION);
        assert!(manifest.generator_tag.starts_with("captar@"));
    }

    #[test]
    fn test_manifest_entry_fields() {
        let manifest = generate_manifest(&[recording("hero")]);
        let entry = &manifest.animations["hero"];
        assert_eq!(entry.trigger, TriggerKind::Scroll);
        assert_eq!(entry.sample_count, 3);
        assert!((entry.duration_ms - 300.0).abs() < 1e-9);
        assert!(entry.code.contains("HeroMotion"));
    }

    #[test]
    fn test_manifest_serializes() {
        let manifest = generate_manifest(&[recording("hero")]);
        let json = manifest.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["schemaVersion"], 1);
        assert!(parsed["animations"]["hero"]["states"]["initial"].is_object());
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = generate_manifest(&[]);
        assert!(manifest.animations.is_empty());
    }
}
