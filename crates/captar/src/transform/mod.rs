//! Transform decomposition: recovering independent translate/scale/rotate/
//! skew components from one combined transform.
//!
//! Decomposition is total. Unparseable or degenerate input never errors; it
//! decomposes to the identity components, and callers compare results with
//! [`equal_within_tolerance`] rather than exact equality.

mod compare;
mod decompose;
mod parse;

pub use compare::{dominant_axis, equal_within_tolerance, Axis};
pub use decompose::decompose;
pub use parse::parse_transform;

use serde::{Deserialize, Serialize};

/// One combined transform, as captured from an element.
///
/// Function-list arguments are stored in canonical units: lengths in plain
/// units, angles in degrees. [`parse_transform`] performs the normalization
/// when the representation comes from a raw style string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformRepresentation {
    /// 2D affine matrix `[a, b, c, d, tx, ty]`
    Matrix2D([f64; 6]),
    /// 4x4 matrix, column-major, 16 values
    Matrix3D([f64; 16]),
    /// Ordered list of named transform functions with numeric arguments
    FunctionList(Vec<TransformFunction>),
}

/// One named transform function with already-normalized numeric arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformFunction {
    /// Function name as written (`translate`, `rotateZ`, ...)
    pub name: String,
    /// Numeric arguments; angles in degrees
    pub args: Vec<f64>,
}

impl TransformFunction {
    /// Build a function entry.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Canonical 11-component decomposition of one transform.
///
/// Identity is translate 0, scale 1, rotate 0, skew 0. Every field is always
/// populated; there are no partial results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionComponents {
    /// Translation along X, in units
    pub translate_x: f64,
    /// Translation along Y, in units
    pub translate_y: f64,
    /// Translation along Z, in units
    pub translate_z: f64,
    /// Scale factor along X
    pub scale_x: f64,
    /// Scale factor along Y
    pub scale_y: f64,
    /// Scale factor along Z
    pub scale_z: f64,
    /// Rotation about X, degrees
    pub rotate_x: f64,
    /// Rotation about Y, degrees
    pub rotate_y: f64,
    /// Rotation about Z, degrees
    pub rotate_z: f64,
    /// Skew along X, degrees
    pub skew_x: f64,
    /// Skew along Y, degrees
    pub skew_y: f64,
}

impl Default for MotionComponents {
    fn default() -> Self {
        Self::identity()
    }
}

impl MotionComponents {
    /// The identity decomposition.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            translate_z: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            scale_z: 1.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
        }
    }

    /// All 11 fields in a fixed order, for field-wise comparison.
    #[must_use]
    pub const fn fields(&self) -> [f64; 11] {
        [
            self.translate_x,
            self.translate_y,
            self.translate_z,
            self.scale_x,
            self.scale_y,
            self.scale_z,
            self.rotate_x,
            self.rotate_y,
            self.rotate_z,
            self.skew_x,
            self.skew_y,
        ]
    }

    /// True if this decomposition is the identity within `tol`.
    #[must_use]
    pub fn is_identity(&self, tol: f64) -> bool {
        equal_within_tolerance(self, &Self::identity(), tol)
    }
}
