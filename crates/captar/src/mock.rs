//! In-memory doubles for the excluded collaborators.
//!
//! [`MockDom`] is a scripted element tree implementing [`DomAdapter`],
//! [`MockSubstrate`] a deterministic event source implementing
//! [`EventSubstrate`], and [`MockFrameSource`] a canned [`FrameSource`].
//! Together they let every trigger and descriptor path run in a controlled
//! environment, with no live rendering environment anywhere near the tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::dom::{
    DomAdapter, ElementId, EventCallback, EventSubstrate, Subscription, VisibilityCallback,
};
use crate::sample::{FrameSource, Sample};

/// One scripted element.
#[derive(Debug, Clone, Default)]
struct MockElement {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    styles: HashMap<String, String>,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Scripted in-memory element tree.
///
/// Indices are stable: elements are only ever appended.
#[derive(Debug, Clone)]
pub struct MockDom {
    elements: Vec<MockElement>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// A document with a single `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: vec![MockElement {
                tag: "body".to_string(),
                ..MockElement::default()
            }],
        }
    }

    /// Append a child element and return its handle.
    pub fn add_element(&mut self, parent: ElementId, tag: impl Into<String>) -> ElementId {
        let index = self.elements.len();
        self.elements.push(MockElement {
            tag: tag.into(),
            parent: Some(parent.0),
            ..MockElement::default()
        });
        self.elements[parent.0].children.push(index);
        ElementId(index)
    }

    /// Set the `id` attribute.
    pub fn set_id(&mut self, el: ElementId, id: impl Into<String>) {
        self.elements[el.0].id = Some(id.into());
    }

    /// Append one class token.
    pub fn add_class(&mut self, el: ElementId, class: impl Into<String>) {
        self.elements[el.0].classes.push(class.into());
    }

    /// Set an attribute.
    pub fn set_attribute(&mut self, el: ElementId, name: impl Into<String>, value: impl Into<String>) {
        self.elements[el.0].attributes.insert(name.into(), value.into());
    }

    /// Set a resolved style property.
    pub fn set_style(&mut self, el: ElementId, property: impl Into<String>, value: impl Into<String>) {
        self.elements[el.0].styles.insert(property.into(), value.into());
    }
}

impl DomAdapter for MockDom {
    fn root(&self) -> ElementId {
        ElementId(0)
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.elements.get(el.0)?.parent.map(ElementId)
    }

    fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.elements
            .get(el.0)
            .map(|e| e.children.iter().copied().map(ElementId).collect())
            .unwrap_or_default()
    }

    fn tag_name(&self, el: ElementId) -> String {
        self.elements
            .get(el.0)
            .map(|e| e.tag.clone())
            .unwrap_or_default()
    }

    fn element_id(&self, el: ElementId) -> Option<String> {
        self.elements
            .get(el.0)?
            .id
            .clone()
            .filter(|id| !id.is_empty())
    }

    fn class_list(&self, el: ElementId) -> Vec<String> {
        self.elements
            .get(el.0)
            .map(|e| e.classes.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.elements.get(el.0)?.attributes.get(name).cloned()
    }

    fn resolved_style(&self, el: ElementId, property: &str) -> Option<String> {
        self.elements.get(el.0)?.styles.get(property).cloned()
    }

    fn query_count(&self, class_selector: &str) -> usize {
        let wanted: Vec<&str> = class_selector
            .split('.')
            .filter(|token| !token.is_empty())
            .collect();
        if wanted.is_empty() {
            return 0;
        }
        self.elements
            .iter()
            .filter(|e| wanted.iter().all(|w| e.classes.iter().any(|c| c == w)))
            .count()
    }
}

enum ListenerCallback {
    Plain(EventCallback),
    Visibility(VisibilityCallback),
}

struct Listener {
    el: ElementId,
    event: String,
    callback: ListenerCallback,
}

#[derive(Default)]
struct SubstrateInner {
    next_key: u64,
    listeners: HashMap<u64, Listener>,
}

/// Deterministic event substrate: tests attach watchers through the
/// [`EventSubstrate`] trait and drive delivery by calling the `emit_*`
/// methods directly.
#[derive(Clone, Default)]
pub struct MockSubstrate {
    inner: Arc<Mutex<SubstrateInner>>,
}

impl std::fmt::Debug for MockSubstrate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSubstrate")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl MockSubstrate {
    /// Fresh substrate with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.lock().map(|i| i.listeners.len()).unwrap_or(0)
    }

    fn attach(&self, el: ElementId, event: &str, callback: ListenerCallback) -> Subscription {
        let key = {
            let Ok(mut inner) = self.inner.lock() else {
                return Subscription::detached();
            };
            let key = inner.next_key;
            inner.next_key += 1;
            inner.listeners.insert(
                key,
                Listener {
                    el,
                    event: event.to_string(),
                    callback,
                },
            );
            key
        };
        let inner = Arc::clone(&self.inner);
        Subscription::new(move || {
            if let Ok(mut guard) = inner.lock() {
                guard.listeners.remove(&key);
            }
        })
    }

    fn matching_plain(&self, el: ElementId, event: &str) -> Vec<EventCallback> {
        let Ok(inner) = self.inner.lock() else {
            return Vec::new();
        };
        inner
            .listeners
            .values()
            .filter(|l| l.el == el && l.event == event)
            .filter_map(|l| match &l.callback {
                ListenerCallback::Plain(cb) => Some(Arc::clone(cb)),
                ListenerCallback::Visibility(_) => None,
            })
            .collect()
    }

    /// Deliver a pointer-enter event.
    pub fn emit_pointer_enter(&self, el: ElementId) {
        for cb in self.matching_plain(el, "pointerenter") {
            cb();
        }
    }

    /// Deliver a click event.
    pub fn emit_click(&self, el: ElementId) {
        for cb in self.matching_plain(el, "click") {
            cb();
        }
    }

    /// Deliver a focus event.
    pub fn emit_focus(&self, el: ElementId) {
        for cb in self.matching_plain(el, "focus") {
            cb();
        }
    }

    /// Deliver a visibility change with the given visible-area ratio.
    pub fn emit_visibility(&self, el: ElementId, ratio: f64) {
        let callbacks: Vec<VisibilityCallback> = {
            let Ok(inner) = self.inner.lock() else {
                return;
            };
            inner
                .listeners
                .values()
                .filter(|l| l.el == el && l.event == "visibility")
                .filter_map(|l| match &l.callback {
                    ListenerCallback::Visibility(cb) => Some(Arc::clone(cb)),
                    ListenerCallback::Plain(_) => None,
                })
                .collect()
        };
        for cb in callbacks {
            cb(ratio);
        }
    }
}

impl EventSubstrate for MockSubstrate {
    fn on_pointer_enter(&self, el: ElementId, callback: EventCallback) -> Subscription {
        self.attach(el, "pointerenter", ListenerCallback::Plain(callback))
    }

    fn on_click(&self, el: ElementId, callback: EventCallback) -> Subscription {
        self.attach(el, "click", ListenerCallback::Plain(callback))
    }

    fn on_focus(&self, el: ElementId, callback: EventCallback) -> Subscription {
        self.attach(el, "focus", ListenerCallback::Plain(callback))
    }

    fn observe_visibility(
        &self,
        el: ElementId,
        _thresholds: &[f64],
        _margin: &str,
        callback: VisibilityCallback,
    ) -> Subscription {
        self.attach(el, "visibility", ListenerCallback::Visibility(callback))
    }
}

/// Canned frame source for pipeline tests.
#[derive(Debug, Clone, Default)]
pub struct MockFrameSource {
    samples: Vec<Sample>,
    properties: HashMap<String, String>,
}

impl MockFrameSource {
    /// Source with a fixed sample sequence.
    #[must_use]
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            properties: HashMap::new(),
        }
    }

    /// Script one resolved property value.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }
}

impl FrameSource for MockFrameSource {
    fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn resolved_property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_mock_dom_tree_reads() {
        let mut dom = MockDom::new();
        let section = dom.add_element(dom.root(), "section");
        let card = dom.add_element(section, "div");
        dom.set_id(card, "card-1");
        dom.add_class(card, "card");

        assert_eq!(dom.tag_name(card), "div");
        assert_eq!(dom.element_id(card).as_deref(), Some("card-1"));
        assert_eq!(dom.parent(card), Some(section));
        assert_eq!(dom.children(section), vec![card]);
        assert_eq!(dom.query_count(".card"), 1);
        assert_eq!(dom.query_count(".missing"), 0);
    }

    #[test]
    fn test_empty_id_reads_as_none() {
        let mut dom = MockDom::new();
        let el = dom.add_element(dom.root(), "div");
        dom.set_id(el, "");
        assert_eq!(dom.element_id(el), None);
    }

    #[test]
    fn test_substrate_delivers_and_detaches() {
        let substrate = MockSubstrate::new();
        let el = ElementId(1);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let sub = substrate.on_click(
            el,
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        substrate.emit_click(el);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(substrate.listener_count(), 1);

        sub.cancel();
        substrate.emit_click(el);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(substrate.listener_count(), 0);
    }

    #[test]
    fn test_substrate_routes_by_element() {
        let substrate = MockSubstrate::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let _sub = substrate.on_focus(
            ElementId(1),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        substrate.emit_focus(ElementId(2));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        substrate.emit_focus(ElementId(1));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
