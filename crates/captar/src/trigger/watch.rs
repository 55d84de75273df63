//! Active trigger observation.
//!
//! [`watch`] attaches four independent watchers (pointer-enter, visibility,
//! click, focus) and hands back one disposable bundle. The bundle owns every
//! subscription; cancellation closes a shared delivery gate before any
//! listener detaches, so a callback can never run after [`WatchHandle::cancel`]
//! returns. `Load` is never produced here, because loading precedes any
//! subscription.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::dom::{DeliveryGate, ElementId, EventSubstrate, Subscription};

use super::TriggerKind;

/// Visible-area ratios the visibility watcher is configured with.
pub const VISIBILITY_THRESHOLDS: [f64; 4] = [0.1, 0.3, 0.5, 0.75];

/// Root margin for visibility observation.
pub const VISIBILITY_MARGIN: &str = "0px";

/// Minimum visible ratio that counts as "scrolled into view".
const VISIBILITY_FIRE_RATIO: f64 = 0.1;

/// Callback invoked when any watcher fires.
pub type TriggerCallback = Arc<dyn Fn(TriggerKind) + Send + Sync>;

/// Disposable bundle over the four trigger watchers.
///
/// Dropping the handle cancels it; explicit [`WatchHandle::cancel`] is
/// idempotent and detaches all four watchers synchronously.
#[derive(Debug)]
pub struct WatchHandle {
    gate: DeliveryGate,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl WatchHandle {
    /// Detach all watchers. Safe to call more than once.
    ///
    /// The gate closes before the first detach, which makes post-cancellation
    /// delivery impossible rather than merely suppressed.
    pub fn cancel(&self) {
        self.gate.close();
        let drained: Vec<Subscription> = self
            .subscriptions
            .lock()
            .map(|mut subs| subs.drain(..).collect())
            .unwrap_or_default();
        for subscription in &drained {
            subscription.cancel();
        }
    }

    /// True once the handle has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.gate.is_closed()
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Subscribe the four trigger watchers for one element.
///
/// The visibility watcher reports `Scroll` exactly once and then detaches
/// itself from the substrate; the other three report on every firing. Ordering between
/// watchers follows natural event ordering and is otherwise unspecified.
#[must_use]
pub fn watch(
    substrate: &dyn EventSubstrate,
    el: ElementId,
    on_trigger: TriggerCallback,
) -> WatchHandle {
    let gate = DeliveryGate::new();

    let gated = |kind: TriggerKind| -> Arc<dyn Fn() + Send + Sync> {
        let gate = gate.clone();
        let callback = Arc::clone(&on_trigger);
        Arc::new(move || {
            if !gate.is_closed() {
                callback(kind);
            }
        })
    };

    // The visibility subscription lives in a shared slot so the callback can
    // detach itself after its single emission.
    let visibility_slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let visibility = {
        let gate = gate.clone();
        let callback = Arc::clone(&on_trigger);
        let slot = Arc::clone(&visibility_slot);
        let fired = AtomicBool::new(false);
        Arc::new(move |ratio: f64| {
            if gate.is_closed() || ratio < VISIBILITY_FIRE_RATIO {
                return;
            }
            if !fired.swap(true, Ordering::SeqCst) {
                callback(TriggerKind::Scroll);
                let taken = slot.lock().ok().and_then(|mut sub| sub.take());
                if let Some(subscription) = taken {
                    subscription.cancel();
                }
            }
        })
    };

    let visibility_sub =
        substrate.observe_visibility(el, &VISIBILITY_THRESHOLDS, VISIBILITY_MARGIN, visibility);
    if let Ok(mut slot) = visibility_slot.lock() {
        *slot = Some(visibility_sub);
    }
    let slot_canceler = {
        let slot = Arc::clone(&visibility_slot);
        Subscription::new(move || {
            let taken = slot.lock().ok().and_then(|mut sub| sub.take());
            if let Some(subscription) = taken {
                subscription.cancel();
            }
        })
    };

    let subscriptions = vec![
        substrate.on_pointer_enter(el, gated(TriggerKind::Hover)),
        slot_canceler,
        substrate.on_click(el, gated(TriggerKind::Click)),
        substrate.on_focus(el, gated(TriggerKind::Focus)),
    ];
    debug!(element = el.0, "trigger watchers attached");

    WatchHandle {
        gate,
        subscriptions: Mutex::new(subscriptions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSubstrate;
    use std::sync::Mutex as StdMutex;

    fn recorder() -> (TriggerCallback, Arc<StdMutex<Vec<TriggerKind>>>) {
        let seen: Arc<StdMutex<Vec<TriggerKind>>> = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: TriggerCallback = Arc::new(move |kind| {
            if let Ok(mut log) = sink.lock() {
                log.push(kind);
            }
        });
        (callback, seen)
    }

    #[test]
    fn test_watch_attaches_four_subscriptions() {
        let substrate = MockSubstrate::new();
        let (callback, _seen) = recorder();
        let handle = watch(&substrate, ElementId(1), callback);
        assert_eq!(substrate.listener_count(), 4);
        handle.cancel();
        assert_eq!(substrate.listener_count(), 0);
    }

    #[test]
    fn test_each_watcher_reports_its_kind() {
        let substrate = MockSubstrate::new();
        let el = ElementId(1);
        let (callback, seen) = recorder();
        let _handle = watch(&substrate, el, callback);

        substrate.emit_pointer_enter(el);
        substrate.emit_click(el);
        substrate.emit_focus(el);
        substrate.emit_visibility(el, 0.5);

        let log = seen.lock().unwrap();
        assert_eq!(
            *log,
            vec![
                TriggerKind::Hover,
                TriggerKind::Click,
                TriggerKind::Focus,
                TriggerKind::Scroll
            ]
        );
    }

    #[test]
    fn test_visibility_fires_once() {
        let substrate = MockSubstrate::new();
        let el = ElementId(1);
        let (callback, seen) = recorder();
        let _handle = watch(&substrate, el, callback);

        substrate.emit_visibility(el, 0.05); // below the fire ratio
        substrate.emit_visibility(el, 0.3);
        substrate.emit_visibility(el, 0.9);

        assert_eq!(*seen.lock().unwrap(), vec![TriggerKind::Scroll]);
    }

    #[test]
    fn test_visibility_detaches_after_firing() {
        let substrate = MockSubstrate::new();
        let el = ElementId(1);
        let (callback, _seen) = recorder();
        let handle = watch(&substrate, el, callback);
        assert_eq!(substrate.listener_count(), 4);

        substrate.emit_visibility(el, 0.5);
        assert_eq!(substrate.listener_count(), 3);

        handle.cancel();
        assert_eq!(substrate.listener_count(), 0);
    }

    #[test]
    fn test_cancel_is_idempotent_and_silences_delivery() {
        let substrate = MockSubstrate::new();
        let el = ElementId(1);
        let (callback, seen) = recorder();
        let handle = watch(&substrate, el, callback);

        substrate.emit_click(el);
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());

        substrate.emit_click(el);
        substrate.emit_pointer_enter(el);
        substrate.emit_visibility(el, 1.0);
        assert_eq!(*seen.lock().unwrap(), vec![TriggerKind::Click]);
    }

    #[test]
    fn test_drop_detaches_watchers() {
        let substrate = MockSubstrate::new();
        let (callback, _seen) = recorder();
        {
            let _handle = watch(&substrate, ElementId(1), callback);
            assert_eq!(substrate.listener_count(), 4);
        }
        assert_eq!(substrate.listener_count(), 0);
    }

    #[test]
    fn test_independent_elements_do_not_interfere() {
        let substrate = MockSubstrate::new();
        let (callback_a, seen_a) = recorder();
        let (callback_b, seen_b) = recorder();
        let handle_a = watch(&substrate, ElementId(1), callback_a);
        let _handle_b = watch(&substrate, ElementId(2), callback_b);

        handle_a.cancel();
        substrate.emit_click(ElementId(1));
        substrate.emit_click(ElementId(2));

        assert!(seen_a.lock().unwrap().is_empty());
        assert_eq!(*seen_b.lock().unwrap(), vec![TriggerKind::Click]);
    }
}
