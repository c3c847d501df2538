//! Keyboard frame-change notifications and the sheet's observer.
//!
//! The notification center stands in for the platform's keyboard
//! notifications; hosts post into it from their native callbacks. The
//! observer is a scoped resource: subscriptions are acquired with
//! [`KeyboardObserver::start`] and are guaranteed to be released by
//! [`KeyboardObserver::stop`] or, failing that, on drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bottomsheet_animation::Easing;
use indexmap::IndexMap;

/// A keyboard frame-change notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyboardNotification {
    pub kind: KeyboardNotificationKind,
    /// End-frame keyboard height in pixels. Ignored for hide notifications.
    pub keyboard_height: f32,
    /// System animation duration in milliseconds.
    pub duration_ms: u64,
    /// System animation curve.
    pub easing: Easing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyboardNotificationKind {
    WillShow,
    WillHide,
}

impl KeyboardNotification {
    pub fn will_show(keyboard_height: f32, duration_ms: u64) -> Self {
        Self {
            kind: KeyboardNotificationKind::WillShow,
            keyboard_height,
            duration_ms,
            easing: Easing::EaseInOut,
        }
    }

    pub fn will_hide(duration_ms: u64) -> Self {
        Self {
            kind: KeyboardNotificationKind::WillHide,
            keyboard_height: 0.0,
            duration_ms,
            easing: Easing::EaseInOut,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

type SubscriberId = u64;
type Subscriber = Rc<dyn Fn(&KeyboardNotification)>;

#[derive(Default)]
struct CenterInner {
    next_id: Cell<SubscriberId>,
    // Insertion-ordered so delivery matches subscription order.
    subscribers: RefCell<IndexMap<SubscriberId, Subscriber>>,
}

/// In-process fan-out point for keyboard notifications.
#[derive(Clone, Default)]
pub struct KeyboardNotificationCenter {
    inner: Rc<CenterInner>,
}

impl KeyboardNotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&KeyboardNotification) + 'static) -> SubscriberId {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .insert(id, Rc::new(subscriber));
        id
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.inner.subscribers.borrow_mut().shift_remove(&id);
    }

    /// Deliver a notification to every subscriber in subscription order.
    pub fn post(&self, notification: KeyboardNotification) {
        log::trace!("keyboard notification: {notification:?}");
        // Snapshot so subscribers may (un)subscribe while being notified.
        let subscribers: Vec<Subscriber> =
            self.inner.subscribers.borrow().values().cloned().collect();
        for subscriber in subscribers {
            subscriber(&notification);
        }
    }
}

/// Scoped keyboard observer owned by a sheet controller.
///
/// Translates raw notifications into the offset the sheet should apply:
/// `max(0, keyboard_height - safe_area_bottom)` on show, `0` on hide. It
/// performs no geometry mutation itself.
pub struct KeyboardObserver {
    center: KeyboardNotificationCenter,
    token: Cell<Option<SubscriberId>>,
}

impl KeyboardObserver {
    pub fn new(center: KeyboardNotificationCenter) -> Self {
        Self {
            center,
            token: Cell::new(None),
        }
    }

    /// Begin observing. `safe_area_bottom` is read at delivery time so
    /// rotation/inset changes between notifications are honored.
    ///
    /// Redundant starts are absorbed: an already-observing observer keeps
    /// its existing subscription.
    pub fn start(
        &self,
        safe_area_bottom: impl Fn() -> f32 + 'static,
        on_change: impl FnMut(f32, u64, Easing) + 'static,
    ) {
        if self.token.get().is_some() {
            return;
        }
        let on_change = RefCell::new(on_change);
        let id = self.center.subscribe(move |notification| {
            let adjusted = match notification.kind {
                KeyboardNotificationKind::WillShow => {
                    (notification.keyboard_height - safe_area_bottom()).max(0.0)
                }
                KeyboardNotificationKind::WillHide => 0.0,
            };
            (on_change.borrow_mut())(adjusted, notification.duration_ms, notification.easing);
        });
        self.token.set(Some(id));
    }

    /// Stop observing and release the subscription.
    pub fn stop(&self) {
        if let Some(id) = self.token.take() {
            self.center.unsubscribe(id);
        }
    }

    pub fn is_observing(&self) -> bool {
        self.token.get().is_some()
    }
}

impl Drop for KeyboardObserver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded() -> (Rc<RefCell<Vec<f32>>>, impl FnMut(f32, u64, Easing)) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        (log, move |height, _duration, _easing| {
            sink.borrow_mut().push(height)
        })
    }

    #[test]
    fn show_subtracts_safe_area_and_hide_resets() {
        let center = KeyboardNotificationCenter::new();
        let observer = KeyboardObserver::new(center.clone());
        let (log, on_change) = recorded();
        observer.start(|| 34.0, on_change);

        center.post(KeyboardNotification::will_show(336.0, 250));
        center.post(KeyboardNotification::will_hide(250));

        assert_eq!(*log.borrow(), vec![302.0, 0.0]);
    }

    #[test]
    fn short_keyboard_never_reports_negative_offset() {
        let center = KeyboardNotificationCenter::new();
        let observer = KeyboardObserver::new(center.clone());
        let (log, on_change) = recorded();
        observer.start(|| 34.0, on_change);

        center.post(KeyboardNotification::will_show(20.0, 250));
        assert_eq!(*log.borrow(), vec![0.0]);
    }

    #[test]
    fn stop_releases_the_subscription() {
        let center = KeyboardNotificationCenter::new();
        let observer = KeyboardObserver::new(center.clone());
        let (log, on_change) = recorded();
        observer.start(|| 0.0, on_change);
        assert!(observer.is_observing());

        observer.stop();
        assert!(!observer.is_observing());
        center.post(KeyboardNotification::will_show(300.0, 250));
        assert!(log.borrow().is_empty());

        // Stopping twice is harmless.
        observer.stop();
    }

    #[test]
    fn drop_releases_the_subscription() {
        let center = KeyboardNotificationCenter::new();
        let (log, on_change) = recorded();
        {
            let observer = KeyboardObserver::new(center.clone());
            observer.start(|| 0.0, on_change);
        }
        center.post(KeyboardNotification::will_show(300.0, 250));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn redundant_start_keeps_first_subscription() {
        let center = KeyboardNotificationCenter::new();
        let observer = KeyboardObserver::new(center.clone());
        let (log, on_change) = recorded();
        observer.start(|| 0.0, on_change);
        observer.start(|| 0.0, |_h, _d, _e| panic!("second start must be ignored"));

        center.post(KeyboardNotification::will_hide(250));
        assert_eq!(log.borrow().len(), 1);
    }
}
