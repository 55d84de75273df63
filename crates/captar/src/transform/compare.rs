//! State comparison over decomposed components.

use serde::{Deserialize, Serialize};

use super::MotionComponents;

/// Aggregate deltas below this count as "no dominant change".
pub const DOMINANT_AXIS_FLOOR: f64 = 0.01;

/// The axis along which two states differ the most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal translation
    X,
    /// Vertical translation
    Y,
    /// Depth translation
    Z,
    /// Any scale component
    Scale,
    /// Any rotation component
    Rotate,
    /// No delta above the floor
    None,
}

/// True iff all 11 component fields differ by strictly less than `tol`.
#[must_use]
pub fn equal_within_tolerance(a: &MotionComponents, b: &MotionComponents, tol: f64) -> bool {
    a.fields()
        .iter()
        .zip(b.fields().iter())
        .all(|(left, right)| (left - right).abs() < tol)
}

/// The single axis with the largest aggregate absolute delta between two
/// states.
///
/// Scale and rotate aggregate their three sub-components by summed absolute
/// difference. Ties resolve by the fixed priority x > y > z > scale > rotate;
/// a maximum below [`DOMINANT_AXIS_FLOOR`] yields [`Axis::None`].
#[must_use]
pub fn dominant_axis(from: &MotionComponents, to: &MotionComponents) -> Axis {
    let candidates = [
        (Axis::X, (to.translate_x - from.translate_x).abs()),
        (Axis::Y, (to.translate_y - from.translate_y).abs()),
        (Axis::Z, (to.translate_z - from.translate_z).abs()),
        (
            Axis::Scale,
            (to.scale_x - from.scale_x).abs()
                + (to.scale_y - from.scale_y).abs()
                + (to.scale_z - from.scale_z).abs(),
        ),
        (
            Axis::Rotate,
            (to.rotate_x - from.rotate_x).abs()
                + (to.rotate_y - from.rotate_y).abs()
                + (to.rotate_z - from.rotate_z).abs(),
        ),
    ];

    // Strict > keeps the earlier (higher-priority) axis on ties.
    let mut best = (Axis::None, DOMINANT_AXIS_FLOOR);
    for (axis, delta) in candidates {
        if delta > best.1 {
            best = (axis, delta);
        }
    }
    if best.1 <= DOMINANT_AXIS_FLOOR {
        Axis::None
    } else {
        best.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(dx: f64, dy: f64) -> MotionComponents {
        MotionComponents {
            translate_x: dx,
            translate_y: dy,
            ..MotionComponents::identity()
        }
    }

    #[test]
    fn test_equal_within_tolerance_boundary() {
        let a = MotionComponents::identity();
        let b = moved(0.5, 0.0);
        assert!(equal_within_tolerance(&a, &b, 0.6));
        assert!(!equal_within_tolerance(&a, &b, 0.5));
    }

    #[test]
    fn test_dominant_axis_translation() {
        let from = MotionComponents::identity();
        assert_eq!(dominant_axis(&from, &moved(40.0, 3.0)), Axis::X);
        assert_eq!(dominant_axis(&from, &moved(3.0, 40.0)), Axis::Y);
    }

    #[test]
    fn test_dominant_axis_scale_aggregates() {
        let from = MotionComponents::identity();
        let to = MotionComponents {
            scale_x: 1.4,
            scale_y: 1.4,
            translate_x: 0.5,
            ..MotionComponents::identity()
        };
        assert_eq!(dominant_axis(&from, &to), Axis::Scale);
    }

    #[test]
    fn test_dominant_axis_none_below_floor() {
        let from = MotionComponents::identity();
        let to = moved(0.005, 0.0);
        assert_eq!(dominant_axis(&from, &to), Axis::None);
    }

    #[test]
    fn test_tie_prefers_x() {
        let from = MotionComponents::identity();
        let to = moved(5.0, 5.0);
        assert_eq!(dominant_axis(&from, &to), Axis::X);
    }
}
