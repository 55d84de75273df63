//! Matrix and function-list decomposition.
//!
//! The 2D and 3D extractions pick one canonical solution among the
//! mathematically equivalent rotation/skew combinations; the exact sign
//! conventions below are deliberate so outputs stay comparable across
//! implementations, and must not be "improved".

use super::{MotionComponents, TransformFunction, TransformRepresentation};

/// Column norms below this are treated as degenerate in the 3D branch.
const DEGENERATE_SCALE: f64 = 1e-9;

/// Gimbal-lock threshold on |r13| for the 3D Euler extraction.
const GIMBAL_LOCK: f64 = 0.9999;

/// Decompose one combined transform into its canonical 11 components.
///
/// Pure and total: every input yields a fully populated result, with
/// unparseable or degenerate input mapping to the identity components.
#[must_use]
pub fn decompose(input: &TransformRepresentation) -> MotionComponents {
    match input {
        TransformRepresentation::Matrix2D(m) => decompose_2d(m),
        TransformRepresentation::Matrix3D(m) => decompose_3d(m),
        TransformRepresentation::FunctionList(functions) => decompose_functions(functions),
    }
}

/// 2D affine case: `[a, b, c, d, tx, ty]`.
fn decompose_2d(m: &[f64; 6]) -> MotionComponents {
    let [a, b, c, d, tx, ty] = *m;
    let mut out = MotionComponents::identity();

    let mut scale_x = a.hypot(b);
    // sign(scaleX) follows sign(a); a == 0 keeps the positive root
    if a < 0.0 {
        scale_x = -scale_x;
    }

    let mut scale_y = c.hypot(d);
    // a negative determinant means one axis is flipped; by convention it is Y
    if a * d - b * c < 0.0 {
        scale_y = -scale_y;
    }

    out.translate_x = tx;
    out.translate_y = ty;
    out.scale_x = scale_x;
    out.scale_y = scale_y;
    out.rotate_z = b.atan2(a).to_degrees();
    out.skew_x = (a * c + b * d).atan2(scale_x * scale_x).to_degrees();
    out
}

/// 3D case: 16 values, column-major. Skew is not modeled in 3D.
fn decompose_3d(m: &[f64; 16]) -> MotionComponents {
    let mut out = MotionComponents::identity();

    // Column-major: element (row, col) lives at m[(col - 1) * 4 + (row - 1)].
    out.translate_x = m[12];
    out.translate_y = m[13];
    out.translate_z = m[14];

    let col = |c: usize| [m[c * 4], m[c * 4 + 1], m[c * 4 + 2]];
    let norm = |v: [f64; 3]| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();

    let (c1, c2, c3) = (col(0), col(1), col(2));
    let (sx, sy, sz) = (norm(c1), norm(c2), norm(c3));
    out.scale_x = sx;
    out.scale_y = sy;
    out.scale_z = sz;

    if sx < DEGENERATE_SCALE || sy < DEGENERATE_SCALE || sz < DEGENERATE_SCALE {
        // Collapsed axis: rotation is unrecoverable, keep identity angles.
        return out;
    }

    // Normalize the 3x3 block into a pure rotation sub-block.
    let r = |row: usize, column: usize| -> f64 {
        let scale = [sx, sy, sz][column - 1];
        m[(column - 1) * 4 + (row - 1)] / scale
    };

    let r13 = r(1, 3).clamp(-1.0, 1.0);
    if r13.abs() >= GIMBAL_LOCK {
        out.rotate_y = 90.0_f64.copysign(r13);
        out.rotate_x = (-r(3, 1)).atan2(r(2, 2)).to_degrees();
        out.rotate_z = 0.0;
    } else {
        out.rotate_y = r13.asin().to_degrees();
        out.rotate_x = (-r(2, 3)).atan2(r(3, 3)).to_degrees();
        out.rotate_z = (-r(1, 2)).atan2(r(1, 1)).to_degrees();
    }
    out
}

/// Function-list case: left fold with field-overwrite semantics.
///
/// Later functions in the list win on shared fields; this is not matrix
/// composition. Angle arguments arrive in degrees (see the parse module).
/// Unknown names, including `perspective`, are ignored.
fn decompose_functions(functions: &[TransformFunction]) -> MotionComponents {
    let mut out = MotionComponents::identity();
    for function in functions {
        apply_function(&mut out, function);
    }
    out
}

fn apply_function(out: &mut MotionComponents, function: &TransformFunction) {
    let arg = |i: usize| function.args.get(i).copied().unwrap_or(0.0);
    match function.name.to_ascii_lowercase().as_str() {
        "translate" => {
            out.translate_x = arg(0);
            out.translate_y = arg(1);
        }
        "translatex" => out.translate_x = arg(0),
        "translatey" => out.translate_y = arg(0),
        "translatez" => out.translate_z = arg(0),
        "translate3d" => {
            out.translate_x = arg(0);
            out.translate_y = arg(1);
            out.translate_z = arg(2);
        }
        "scale" => {
            out.scale_x = arg(0);
            out.scale_y = function.args.get(1).copied().unwrap_or_else(|| arg(0));
        }
        "scalex" => out.scale_x = arg(0),
        "scaley" => out.scale_y = arg(0),
        "scalez" => out.scale_z = arg(0),
        "scale3d" => {
            out.scale_x = arg(0);
            out.scale_y = arg(1);
            out.scale_z = arg(2);
        }
        // rotate(theta) is a Z rotation
        "rotate" | "rotatez" => out.rotate_z = arg(0),
        "rotatex" => out.rotate_x = arg(0),
        "rotatey" => out.rotate_y = arg(0),
        "skew" => {
            out.skew_x = arg(0);
            out.skew_y = arg(1);
        }
        "skewx" => out.skew_x = arg(0),
        "skewy" => out.skew_y = arg(0),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::equal_within_tolerance;

    const TOL: f64 = 0.01;

    #[test]
    fn test_identity_matrix_2d() {
        let out = decompose(&TransformRepresentation::Matrix2D([
            1.0, 0.0, 0.0, 1.0, 100.0, 50.0,
        ]));
        assert!((out.translate_x - 100.0).abs() < TOL);
        assert!((out.translate_y - 50.0).abs() < TOL);
        assert!((out.scale_x - 1.0).abs() < TOL);
        assert!((out.scale_y - 1.0).abs() < TOL);
        assert!(out.rotate_z.abs() < TOL);
    }

    #[test]
    fn test_pure_rotation_2d() {
        // 90 degrees: cos = 0, sin = 1
        let out = decompose(&TransformRepresentation::Matrix2D([
            0.0, 1.0, -1.0, 0.0, 0.0, 0.0,
        ]));
        assert!((out.rotate_z - 90.0).abs() < TOL);
        assert!((out.scale_x - 1.0).abs() < TOL);
        assert!((out.scale_y - 1.0).abs() < TOL);
    }

    #[test]
    fn test_rotation_45_with_scale_2d() {
        let s = std::f64::consts::FRAC_1_SQRT_2 * 3.0;
        let out = decompose(&TransformRepresentation::Matrix2D([
            s, s, -s, s, 0.0, 0.0,
        ]));
        assert!((out.rotate_z - 45.0).abs() < TOL);
        assert!((out.scale_x - 3.0).abs() < TOL);
        assert!((out.scale_y - 3.0).abs() < TOL);
    }

    #[test]
    fn test_negative_determinant_flips_scale_y() {
        // scale(1, -1)
        let out = decompose(&TransformRepresentation::Matrix2D([
            1.0, 0.0, 0.0, -1.0, 0.0, 0.0,
        ]));
        assert!((out.scale_x - 1.0).abs() < TOL);
        assert!((out.scale_y + 1.0).abs() < TOL);
    }

    #[test]
    fn test_matrix3d_translation_and_scale() {
        let mut m = [0.0; 16];
        m[0] = 2.0;
        m[5] = 3.0;
        m[10] = 4.0;
        m[15] = 1.0;
        m[12] = 10.0;
        m[13] = 20.0;
        m[14] = 30.0;
        let out = decompose(&TransformRepresentation::Matrix3D(m));
        assert!((out.translate_x - 10.0).abs() < TOL);
        assert!((out.translate_y - 20.0).abs() < TOL);
        assert!((out.translate_z - 30.0).abs() < TOL);
        assert!((out.scale_x - 2.0).abs() < TOL);
        assert!((out.scale_y - 3.0).abs() < TOL);
        assert!((out.scale_z - 4.0).abs() < TOL);
        assert!(out.rotate_x.abs() < TOL);
    }

    #[test]
    fn test_matrix3d_rotation_about_z() {
        // rotateZ(30deg), column-major
        let (s, c) = 30.0_f64.to_radians().sin_cos();
        let mut m = [0.0; 16];
        m[0] = c;
        m[1] = s;
        m[4] = -s;
        m[5] = c;
        m[10] = 1.0;
        m[15] = 1.0;
        let out = decompose(&TransformRepresentation::Matrix3D(m));
        assert!((out.rotate_z - 30.0).abs() < TOL);
        assert!(out.rotate_x.abs() < TOL);
        assert!(out.rotate_y.abs() < TOL);
    }

    #[test]
    fn test_matrix3d_gimbal_lock_branch() {
        // rotateY(90deg): r13 = 1
        let mut m = [0.0; 16];
        m[2] = -1.0; // r31
        m[5] = 1.0; // r22
        m[8] = 1.0; // r13
        m[15] = 1.0;
        let out = decompose(&TransformRepresentation::Matrix3D(m));
        assert!((out.rotate_y - 90.0).abs() < TOL);
        assert!(out.rotate_z.abs() < TOL);
    }

    #[test]
    fn test_degenerate_3d_keeps_identity_rotation() {
        let out = decompose(&TransformRepresentation::Matrix3D([0.0; 16]));
        assert!(out.rotate_x.abs() < TOL);
        assert!(out.rotate_y.abs() < TOL);
        assert!(out.rotate_z.abs() < TOL);
    }

    #[test]
    fn test_function_list_fold() {
        let out = decompose(&TransformRepresentation::FunctionList(vec![
            TransformFunction::new("translate", vec![10.0, 20.0]),
            TransformFunction::new("scale", vec![2.0]),
            TransformFunction::new("rotate", vec![45.0]),
        ]));
        assert!((out.translate_x - 10.0).abs() < TOL);
        assert!((out.translate_y - 20.0).abs() < TOL);
        assert!((out.scale_x - 2.0).abs() < TOL);
        assert!((out.scale_y - 2.0).abs() < TOL);
        assert!((out.rotate_z - 45.0).abs() < TOL);
    }

    #[test]
    fn test_function_list_later_wins() {
        let out = decompose(&TransformRepresentation::FunctionList(vec![
            TransformFunction::new("translateX", vec![10.0]),
            TransformFunction::new("translateX", vec![-4.0]),
        ]));
        assert!((out.translate_x + 4.0).abs() < TOL);
    }

    #[test]
    fn test_perspective_is_ignored() {
        let out = decompose(&TransformRepresentation::FunctionList(vec![
            TransformFunction::new("perspective", vec![800.0]),
        ]));
        assert!(out.is_identity(TOL));
    }

    #[test]
    fn test_empty_function_list_is_identity() {
        let out = decompose(&TransformRepresentation::FunctionList(Vec::new()));
        assert!(out.is_identity(TOL));
    }

    #[test]
    fn test_decompose_is_idempotent() {
        let input = TransformRepresentation::Matrix2D([0.5, 0.5, -0.5, 0.5, 12.0, -7.0]);
        let a = decompose(&input);
        let b = decompose(&input);
        assert!(equal_within_tolerance(&a, &b, 1e-12));
    }
}
