//! Cursor inspection: image-cursor extraction and hover-change detection.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dom::{DomAdapter, ElementId};

/// Resolved cursor information for one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorInfo {
    /// Raw resolved cursor value
    pub value: String,
    /// The value encodes a pointer-style cursor
    pub is_pointer: bool,
    /// External image reference, when the cursor is an image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Hotspot coordinates following the image reference, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<(f64, f64)>,
    /// The cursor differs from the parent's resolved cursor.
    ///
    /// An approximation of "changes on hover", not a true hover-state probe.
    pub changes_on_hover: bool,
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"url\(\s*['"]?([^'")]+?)['"]?\s*\)(?:\s+(-?[\d.]+)\s+(-?[\d.]+))?"#)
            .unwrap_or_else(|_| unreachable!())
    })
}

/// Inspect one element's resolved cursor.
#[must_use]
pub fn detect_cursor(dom: &dyn DomAdapter, el: ElementId) -> CursorInfo {
    let value = dom.resolved_style(el, "cursor").unwrap_or_default();

    let (image_url, hotspot) = url_pattern().captures(&value).map_or((None, None), |caps| {
        let url = caps.get(1).map(|m| m.as_str().to_string());
        let hotspot = match (caps.get(2), caps.get(3)) {
            (Some(x), Some(y)) => x
                .as_str()
                .parse::<f64>()
                .ok()
                .zip(y.as_str().parse::<f64>().ok()),
            _ => None,
        };
        (url, hotspot)
    });

    let parent_cursor = dom
        .parent(el)
        .and_then(|parent| dom.resolved_style(parent, "cursor"))
        .unwrap_or_default();

    CursorInfo {
        is_pointer: value == "pointer",
        changes_on_hover: !value.is_empty() && value != parent_cursor,
        image_url,
        hotspot,
        value,
    }
}

/// Collect cursor info for every element in the subtree whose resolved
/// cursor is explicitly set to something other than the defaults.
#[must_use]
pub fn collect_cursors(dom: &dyn DomAdapter, root: ElementId) -> Vec<(ElementId, CursorInfo)> {
    let mut found = Vec::new();
    let mut stack = vec![root];
    while let Some(el) = stack.pop() {
        if let Some(value) = dom.resolved_style(el, "cursor") {
            let trimmed = value.trim();
            if !trimmed.is_empty() && trimmed != "auto" && trimmed != "default" {
                found.push((el, detect_cursor(dom, el)));
            }
        }
        let mut children = dom.children(el);
        children.reverse();
        stack.extend(children);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDom;

    #[test]
    fn test_plain_pointer_cursor() {
        let mut dom = MockDom::new();
        let el = dom.add_element(dom.root(), "a");
        dom.set_style(el, "cursor", "pointer");
        let info = detect_cursor(&dom, el);
        assert!(info.is_pointer);
        assert!(info.image_url.is_none());
        assert!(info.changes_on_hover);
    }

    #[test]
    fn test_image_cursor_with_hotspot() {
        let mut dom = MockDom::new();
        let el = dom.add_element(dom.root(), "div");
        dom.set_style(el, "cursor", "url('/cursors/brush.png') 4 12, auto");
        let info = detect_cursor(&dom, el);
        assert_eq!(info.image_url.as_deref(), Some("/cursors/brush.png"));
        assert_eq!(info.hotspot, Some((4.0, 12.0)));
        assert!(!info.is_pointer);
    }

    #[test]
    fn test_image_cursor_without_hotspot() {
        let mut dom = MockDom::new();
        let el = dom.add_element(dom.root(), "div");
        dom.set_style(el, "cursor", "url(grab.svg), pointer");
        let info = detect_cursor(&dom, el);
        assert_eq!(info.image_url.as_deref(), Some("grab.svg"));
        assert_eq!(info.hotspot, None);
    }

    #[test]
    fn test_no_hover_change_when_parent_matches() {
        let mut dom = MockDom::new();
        let parent = dom.add_element(dom.root(), "div");
        dom.set_style(parent, "cursor", "pointer");
        let child = dom.add_element(parent, "span");
        dom.set_style(child, "cursor", "pointer");
        let info = detect_cursor(&dom, child);
        assert!(!info.changes_on_hover);
    }

    #[test]
    fn test_collect_skips_defaults() {
        let mut dom = MockDom::new();
        let plain = dom.add_element(dom.root(), "div");
        dom.set_style(plain, "cursor", "auto");
        let fancy = dom.add_element(dom.root(), "div");
        dom.set_style(fancy, "cursor", "grab");

        let found = collect_cursors(&dom, dom.root());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, fancy);
        assert_eq!(found[0].1.value, "grab");
    }
}
