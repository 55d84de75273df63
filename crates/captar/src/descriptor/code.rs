//! Authoring serialization: a human-editable declaration block naming a
//! generated component identifier, one property line per populated phase,
//! plus the transition line.

use crate::result::{CaptarError, CaptarResult};

use super::{AnimationDescriptor, StateBag, StateValue, Transition};

/// Marker word every generated identifier contains.
const MARKER: &str = "Motion";

/// Derive a component identifier from an element key.
///
/// The key is split on non-alphanumeric boundaries, each part title-cased
/// and joined; the result is guaranteed to start with a letter and to
/// contain the marker word. Errors only when the key holds no alphanumeric
/// characters at all.
pub fn component_identifier(key: &str) -> CaptarResult<String> {
    let mut name: String = key
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(title_case)
        .collect();

    if name.is_empty() {
        return Err(CaptarError::InvalidIdentifier {
            key: key.to_string(),
        });
    }
    if !name.contains(MARKER) {
        name.push_str(MARKER);
    }
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        name.insert_str(0, MARKER);
    }
    Ok(name)
}

fn title_case(part: &str) -> String {
    let mut chars = part.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
    })
}

/// Render the authoring form of one descriptor.
///
/// A key that yields no identifier falls back to the bare marker word, so
/// rendering stays total.
#[must_use]
pub fn render_code(element_key: &str, descriptor: &AnimationDescriptor) -> String {
    let name = component_identifier(element_key).unwrap_or_else(|_| MARKER.to_string());

    let mut lines = Vec::new();
    lines.push(format!("const {name} = {{"));
    lines.push(format!("  initial: {},", render_bag(&descriptor.initial)));
    lines.push(format!(
        "  {}: {},",
        descriptor.phase.authoring_key(),
        render_bag(&descriptor.phase_state)
    ));
    if let Some(viewport) = &descriptor.viewport {
        lines.push(format!(
            "  viewport: {{ once: {}, margin: \"{}\", amount: {} }},",
            viewport.once, viewport.margin, viewport.amount
        ));
    }
    lines.push(format!(
        "  transition: {},",
        render_transition(&descriptor.transition)
    ));
    lines.push("};".to_string());
    lines.join("\n")
}

fn render_bag(bag: &StateBag) -> String {
    if bag.is_empty() {
        return "{}".to_string();
    }
    let entries: Vec<String> = bag
        .iter()
        .map(|(key, value)| match value {
            StateValue::Number(n) => format!("{key}: {}", format_number(*n)),
            StateValue::Text(s) => format!("{key}: \"{s}\""),
        })
        .collect();
    format!("{{ {} }}", entries.join(", "))
}

fn render_transition(transition: &Transition) -> String {
    match transition {
        Transition::Tween { duration, curve } => format!(
            "{{ duration: {}, ease: \"{curve}\" }}",
            format_number(*duration)
        ),
        Transition::Spring { params } => format!(
            "{{ type: \"spring\", stiffness: {}, damping: {}, mass: {}, velocity: {}, bounce: {} }}",
            format_number(params.stiffness),
            format_number(params.damping),
            format_number(params.mass),
            format_number(params.initial_velocity),
            format_number(params.bounce),
        ),
    }
}

/// Trim trailing zeros so authored numbers read naturally.
fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let formatted = format!("{value:.3}");
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Phase, ViewportPolicy};

    #[test]
    fn test_identifier_from_kebab_key() {
        assert_eq!(component_identifier("hero-card").unwrap(), "HeroCardMotion");
    }

    #[test]
    fn test_identifier_from_selector_key() {
        assert_eq!(
            component_identifier(".feature.card").unwrap(),
            "FeatureCardMotion"
        );
    }

    #[test]
    fn test_identifier_starts_with_letter() {
        let name = component_identifier("3col-grid").unwrap();
        assert!(name.starts_with(|c: char| c.is_ascii_alphabetic()));
        assert!(name.contains(MARKER));
    }

    #[test]
    fn test_identifier_keeps_existing_marker() {
        assert_eq!(
            component_identifier("motion-header").unwrap(),
            "MotionHeader"
        );
    }

    #[test]
    fn test_identifier_rejects_symbol_soup() {
        assert!(component_identifier("##!!").is_err());
    }

    #[test]
    fn test_render_code_shape() {
        let mut initial = StateBag::new();
        initial.insert("opacity".to_string(), StateValue::Number(0.0));
        let mut target = StateBag::new();
        target.insert("opacity".to_string(), StateValue::Number(1.0));
        target.insert("y".to_string(), StateValue::Number(0.0));
        let descriptor = AnimationDescriptor {
            initial,
            phase: Phase::WhileInView,
            phase_state: target,
            transition: Transition::Tween {
                duration: 0.45,
                curve: "ease-out".to_string(),
            },
            viewport: Some(ViewportPolicy::scroll_default()),
        };

        let code = render_code("hero-card", &descriptor);
        assert!(code.starts_with("const HeroCardMotion = {"));
        assert!(code.contains("initial: { opacity: 0 },"));
        assert!(code.contains("whileInView: { opacity: 1, y: 0 },"));
        assert!(code.contains("viewport: { once: true, margin: \"-100px\", amount: 0.3 },"));
        assert!(code.contains("transition: { duration: 0.45, ease: \"ease-out\" },"));
        assert!(code.ends_with("};"));
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.30000000000000004), "0.3");
        assert_eq!(format_number(-12.5), "-12.5");
    }
}
