//! Raw transform-string parsing.
//!
//! Converts a resolved `transform` style value into a
//! [`TransformRepresentation`]. Unit normalization happens here so the rest
//! of the pipeline only ever sees canonical numbers: lengths lose their unit
//! suffix, angles become degrees (`rad` x 180/pi, `turn` x 360, `grad` x 0.9).
//!
//! Parsing never fails: `none`, the empty string, and garbage all parse to an
//! empty function list, which decomposes to the identity components.

use std::sync::OnceLock;

use regex::Regex;

use super::{TransformFunction, TransformRepresentation};

fn function_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([a-zA-Z][a-zA-Z0-9]*)\(([^)]*)\)").unwrap_or_else(|_| unreachable!())
    })
}

/// Parse one resolved transform string.
#[must_use]
pub fn parse_transform(value: &str) -> TransformRepresentation {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return TransformRepresentation::FunctionList(Vec::new());
    }

    let mut functions = Vec::new();
    for capture in function_pattern().captures_iter(trimmed) {
        let name = capture[1].to_string();
        let args: Vec<f64> = capture[2]
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_scalar)
            .collect();

        // A bare matrix is promoted to its dedicated representation; anything
        // trailing it still wins through function-list overwrite semantics,
        // so promotion only happens for a lone matrix.
        if functions.is_empty() && !has_more_functions(trimmed) {
            if name.eq_ignore_ascii_case("matrix") && args.len() == 6 {
                let mut m = [0.0; 6];
                m.copy_from_slice(&args);
                return TransformRepresentation::Matrix2D(m);
            }
            if name.eq_ignore_ascii_case("matrix3d") && args.len() == 16 {
                let mut m = [0.0; 16];
                m.copy_from_slice(&args);
                return TransformRepresentation::Matrix3D(m);
            }
        }

        functions.push(TransformFunction { name, args });
    }

    TransformRepresentation::FunctionList(functions)
}

fn has_more_functions(value: &str) -> bool {
    function_pattern().captures_iter(value).count() > 1
}

/// Parse one scalar argument, normalizing its unit.
///
/// Angles are converted to degrees; length suffixes (`px`, `em`, `%`, ...)
/// are stripped; an unparseable argument becomes 0.
fn parse_scalar(raw: &str) -> f64 {
    let lower = raw.to_ascii_lowercase();
    let (number_part, factor) = if let Some(stripped) = lower.strip_suffix("deg") {
        (stripped.to_string(), 1.0)
    } else if let Some(stripped) = lower.strip_suffix("grad") {
        (stripped.to_string(), 0.9)
    } else if let Some(stripped) = lower.strip_suffix("rad") {
        (stripped.to_string(), 180.0 / std::f64::consts::PI)
    } else if let Some(stripped) = lower.strip_suffix("turn") {
        (stripped.to_string(), 360.0)
    } else {
        // Length units are a trailing run of letters or '%' (px, em, vh, %).
        let numeric = lower.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
        (numeric.to_string(), 1.0)
    };
    number_part.trim().parse::<f64>().map_or(0.0, |n| n * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_none_is_empty_list() {
        assert_eq!(
            parse_transform("none"),
            TransformRepresentation::FunctionList(Vec::new())
        );
        assert_eq!(
            parse_transform("  "),
            TransformRepresentation::FunctionList(Vec::new())
        );
    }

    #[test]
    fn test_parse_matrix_2d() {
        let parsed = parse_transform("matrix(1, 0, 0, 1, 100, 50)");
        assert_eq!(
            parsed,
            TransformRepresentation::Matrix2D([1.0, 0.0, 0.0, 1.0, 100.0, 50.0])
        );
    }

    #[test]
    fn test_parse_matrix3d() {
        let parsed = parse_transform(
            "matrix3d(1,0,0,0, 0,1,0,0, 0,0,1,0, 10,20,30,1)",
        );
        match parsed {
            TransformRepresentation::Matrix3D(m) => {
                assert!((m[12] - 10.0).abs() < f64::EPSILON);
                assert!((m[13] - 20.0).abs() < f64::EPSILON);
                assert!((m[14] - 30.0).abs() < f64::EPSILON);
            }
            other => panic!("expected Matrix3D, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_function_list_with_units() {
        let parsed = parse_transform("translate(10px, 20px) scale(2) rotate(0.5turn)");
        let TransformRepresentation::FunctionList(functions) = parsed else {
            panic!("expected function list");
        };
        assert_eq!(functions.len(), 3);
        assert_eq!(functions[0].name, "translate");
        assert_eq!(functions[0].args, vec![10.0, 20.0]);
        assert_eq!(functions[2].name, "rotate");
        assert!((functions[2].args[0] - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_unit_conversions() {
        assert!((parse_scalar("90deg") - 90.0).abs() < 1e-9);
        assert!((parse_scalar("100grad") - 90.0).abs() < 1e-9);
        assert!((parse_scalar("1rad") - 57.295_779_513_082_32).abs() < 1e-9);
        assert!((parse_scalar("0.25turn") - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_garbage_parses_to_zero_arg() {
        assert!((parse_scalar("banana")).abs() < f64::EPSILON);
        assert!((parse_scalar("2em") - 2.0).abs() < f64::EPSILON);
        let parsed = parse_transform("what even is this");
        assert_eq!(
            parsed,
            TransformRepresentation::FunctionList(Vec::new())
        );
    }

    #[test]
    fn test_matrix_followed_by_function_stays_a_list() {
        let parsed = parse_transform("matrix(1,0,0,1,5,5) translateX(10px)");
        let TransformRepresentation::FunctionList(functions) = parsed else {
            panic!("expected function list");
        };
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].name, "matrix");
    }
}
