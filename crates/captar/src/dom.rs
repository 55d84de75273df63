//! Live-environment collaborator seams.
//!
//! The engine never talks to a real document directly. Element reads go
//! through [`DomAdapter`] and event subscriptions through [`EventSubstrate`],
//! so a scripted in-memory double (see [`crate::mock`]) can stand in for the
//! whole substrate. Adapters over a real environment (CDP, a headless
//! renderer, an embedded webview) implement the same two traits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Opaque handle to one element inside an adapter's document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub usize);

/// Read-only view of a document and its elements.
///
/// Every method is a cheap, synchronous read against already-resolved state;
/// adapters over asynchronous substrates snapshot before handing the adapter
/// to the engine.
pub trait DomAdapter {
    /// Root element of the document subtree this adapter exposes.
    fn root(&self) -> ElementId;

    /// Parent element, `None` at the root.
    fn parent(&self, el: ElementId) -> Option<ElementId>;

    /// Child elements in document order.
    fn children(&self, el: ElementId) -> Vec<ElementId>;

    /// Lowercased tag name (`div`, `button`, ...).
    fn tag_name(&self, el: ElementId) -> String;

    /// The `id` attribute, `None` when absent or empty.
    fn element_id(&self, el: ElementId) -> Option<String>;

    /// Class tokens in declaration order.
    fn class_list(&self, el: ElementId) -> Vec<String>;

    /// Arbitrary attribute read.
    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;

    /// Resolved (computed) style value for one property.
    fn resolved_style(&self, el: ElementId, property: &str) -> Option<String>;

    /// Number of elements in the whole document matching a class selector
    /// of the form `.a.b.c`. Used for uniqueness checks when synthesizing
    /// element keys.
    fn query_count(&self, class_selector: &str) -> usize;
}

/// Callback invoked when a watched event fires.
pub type EventCallback = Arc<dyn Fn() + Send + Sync>;

/// Callback invoked with the visible ratio when visibility changes.
pub type VisibilityCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Subscription substrate for the four trigger watchers.
///
/// Each method attaches one listener and returns its canceler. The substrate
/// must deliver callbacks synchronously with respect to its own event loop;
/// the engine layers its own delivery gate on top (see
/// [`crate::trigger::watch`]).
pub trait EventSubstrate {
    /// Subscribe to pointer-enter on one element.
    fn on_pointer_enter(&self, el: ElementId, callback: EventCallback) -> Subscription;

    /// Subscribe to click on one element.
    fn on_click(&self, el: ElementId, callback: EventCallback) -> Subscription;

    /// Subscribe to focus on one element.
    fn on_focus(&self, el: ElementId, callback: EventCallback) -> Subscription;

    /// Observe visibility changes for one element.
    ///
    /// `thresholds` are visible-area ratios at which the substrate should
    /// notify; `margin` is a root-margin string in the substrate's own
    /// syntax (e.g. `"-100px"`).
    fn observe_visibility(
        &self,
        el: ElementId,
        thresholds: &[f64],
        margin: &str,
        callback: VisibilityCallback,
    ) -> Subscription;
}

/// Canceler for one attached listener.
///
/// Calling [`Subscription::cancel`] more than once is a no-op; dropping an
/// uncancelled subscription detaches it as well, so a leaked watcher cannot
/// outlive its owner.
pub struct Subscription {
    canceler: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let attached = self
            .canceler
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false);
        f.debug_struct("Subscription")
            .field("attached", &attached)
            .finish()
    }
}

impl Subscription {
    /// Wrap a detach closure provided by the substrate.
    #[must_use]
    pub fn new(canceler: impl FnOnce() + Send + 'static) -> Self {
        Self {
            canceler: Mutex::new(Some(Box::new(canceler))),
        }
    }

    /// A subscription that was never attached (degenerate substrate case).
    #[must_use]
    pub fn detached() -> Self {
        Self {
            canceler: Mutex::new(None),
        }
    }

    /// Detach the listener. Idempotent.
    pub fn cancel(&self) {
        let canceler = self.canceler.lock().ok().and_then(|mut slot| slot.take());
        if let Some(detach) = canceler {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Delivery gate shared between a watcher bundle and its wrapped callbacks.
///
/// The gate closes before any listener detaches, which makes post-cancel
/// delivery impossible rather than merely unlikely: every wrapped callback
/// checks the gate first, and the close happens-before the detach calls.
#[derive(Debug, Clone, Default)]
pub struct DeliveryGate {
    closed: Arc<AtomicBool>,
}

impl DeliveryGate {
    /// New open gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the gate has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Close the gate. Returns `true` the first time, `false` after.
    pub fn close(&self) -> bool {
        !self.closed.swap(true, Ordering::SeqCst)
    }
}
