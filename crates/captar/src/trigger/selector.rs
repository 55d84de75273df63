//! Stable element-key synthesis for telemetry indexing.
//!
//! The key is not guaranteed stable if the document structure changes between
//! recording and replay; it only needs to index recordings consistently
//! within one capture session.

use crate::dom::{DomAdapter, ElementId};

/// At most this many class tokens go into a class-based selector.
const MAX_CLASS_TOKENS: usize = 3;

/// Synthesize a stable identifying key for one element.
///
/// Resolution order: the element's own non-empty id wins outright; then a
/// class selector from the first up-to-3 class tokens, if it resolves
/// uniquely within the whole document; otherwise an ancestor path of
/// `tag[.firstClass][:position]` segments, truncated at the first ancestor
/// that carries an id (ids are assumed unique, so that ancestor becomes the
/// leftmost segment).
#[must_use]
pub fn synthesize_key(dom: &dyn DomAdapter, el: ElementId) -> String {
    if let Some(id) = dom.element_id(el) {
        return id;
    }

    if let Some(selector) = unique_class_selector(dom, el) {
        return selector;
    }

    ancestor_path(dom, el)
}

fn unique_class_selector(dom: &dyn DomAdapter, el: ElementId) -> Option<String> {
    let classes = dom.class_list(el);
    if classes.is_empty() {
        return None;
    }
    let selector: String = classes
        .iter()
        .take(MAX_CLASS_TOKENS)
        .map(|class| format!(".{class}"))
        .collect();
    (dom.query_count(&selector) == 1).then_some(selector)
}

fn ancestor_path(dom: &dyn DomAdapter, el: ElementId) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut current = Some(el);
    while let Some(node) = current {
        if let Some(id) = dom.element_id(node) {
            segments.push(format!("#{id}"));
            break;
        }
        segments.push(segment_for(dom, node));
        current = dom.parent(node);
    }
    segments.reverse();
    segments.join(" > ")
}

/// One path segment: `tag`, plus the first class when present, plus the
/// 1-based position among same-tag siblings when the element has any.
fn segment_for(dom: &dyn DomAdapter, el: ElementId) -> String {
    let tag = dom.tag_name(el);
    let mut segment = tag.clone();
    if let Some(first_class) = dom.class_list(el).first() {
        segment.push('.');
        segment.push_str(first_class);
    }
    if let Some(parent) = dom.parent(el) {
        let same_tag: Vec<ElementId> = dom
            .children(parent)
            .into_iter()
            .filter(|&sibling| dom.tag_name(sibling) == tag)
            .collect();
        if same_tag.len() > 1 {
            if let Some(position) = same_tag.iter().position(|&sibling| sibling == el) {
                segment.push_str(&format!(":{}", position + 1));
            }
        }
    }
    segment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDom;

    #[test]
    fn test_own_id_wins_over_classes() {
        let mut dom = MockDom::new();
        let el = dom.add_element(dom.root(), "div");
        dom.set_id(el, "hero");
        dom.add_class(el, "card");
        assert_eq!(synthesize_key(&dom, el), "hero");
    }

    #[test]
    fn test_unique_class_selector() {
        let mut dom = MockDom::new();
        let el = dom.add_element(dom.root(), "div");
        dom.add_class(el, "hero");
        dom.add_class(el, "large");
        assert_eq!(synthesize_key(&dom, el), ".hero.large");
    }

    #[test]
    fn test_class_selector_caps_at_three_tokens() {
        let mut dom = MockDom::new();
        let el = dom.add_element(dom.root(), "div");
        for class in ["a", "b", "c", "d"] {
            dom.add_class(el, class);
        }
        assert_eq!(synthesize_key(&dom, el), ".a.b.c");
    }

    #[test]
    fn test_ambiguous_classes_fall_back_to_path() {
        let mut dom = MockDom::new();
        let first = dom.add_element(dom.root(), "div");
        dom.add_class(first, "card");
        let second = dom.add_element(dom.root(), "div");
        dom.add_class(second, "card");

        let key = synthesize_key(&dom, second);
        assert_eq!(key, "body > div.card:2");
    }

    #[test]
    fn test_path_stops_at_ancestor_id() {
        let mut dom = MockDom::new();
        let section = dom.add_element(dom.root(), "section");
        dom.set_id(section, "features");
        let row = dom.add_element(section, "div");
        let cell = dom.add_element(row, "span");

        let key = synthesize_key(&dom, cell);
        assert_eq!(key, "#features > div > span");
    }

    #[test]
    fn test_position_only_with_same_tag_siblings() {
        let mut dom = MockDom::new();
        let wrap = dom.add_element(dom.root(), "section");
        let only_span = dom.add_element(wrap, "span");
        let _div = dom.add_element(wrap, "div");

        let key = synthesize_key(&dom, only_span);
        assert_eq!(key, "body > section > span");
    }
}
