//! Frame clock: one-shot frame callbacks with cancellable registrations.
//!
//! The host drives the scheduler by calling [`FrameScheduler::drain`] with a
//! monotonically increasing frame timestamp. Callbacks registered during a
//! drain run on the following frame, which is what lets transitions
//! re-register themselves each frame without spinning.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64)>>,
}

#[derive(Default)]
struct SchedulerInner {
    next_id: Cell<FrameCallbackId>,
    callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
}

impl SchedulerInner {
    fn register(&self, callback: Box<dyn FnOnce(u64)>) -> FrameCallbackId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.callbacks.borrow_mut().push_back(FrameCallbackEntry {
            id,
            callback: Some(callback),
        });
        id
    }

    fn cancel(&self, id: FrameCallbackId) {
        let mut callbacks = self.callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }
}

/// Owner of the frame callback queue. One per host container.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    inner: Rc<SchedulerInner>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle animations use to register callbacks. Holds no strong
    /// reference to the scheduler, so a torn-down host drops its queue even
    /// if stray clocks outlive it.
    pub fn clock(&self) -> FrameClock {
        FrameClock {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether any callback is waiting for the next frame.
    pub fn has_pending(&self) -> bool {
        !self.inner.callbacks.borrow().is_empty()
    }

    /// Run every callback registered before this call with the given frame
    /// timestamp. Callbacks registered while draining run on the next drain.
    pub fn drain(&self, frame_time_nanos: u64) {
        let mut callbacks = self.inner.callbacks.borrow_mut();
        let mut pending: SmallVec<[Box<dyn FnOnce(u64)>; 8]> =
            SmallVec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        for callback in pending {
            callback(frame_time_nanos);
        }
    }
}

/// Cheap handle for registering one-shot frame callbacks.
#[derive(Clone)]
pub struct FrameClock {
    inner: Weak<SchedulerInner>,
}

impl FrameClock {
    /// Whether the owning scheduler is still alive. A dead clock accepts
    /// registrations but never runs them.
    pub fn is_live(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Register a callback for the next frame. The registration cancels the
    /// callback when dropped; hold it for as long as the callback should
    /// stay scheduled.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        match self.inner.upgrade() {
            Some(inner) => {
                let id = inner.register(Box::new(callback));
                FrameCallbackRegistration {
                    scheduler: self.inner.clone(),
                    id: Some(id),
                }
            }
            None => {
                log::warn!("frame callback registered after scheduler teardown; dropping");
                FrameCallbackRegistration {
                    scheduler: self.inner.clone(),
                    id: None,
                }
            }
        }
    }
}

/// RAII registration for a pending frame callback.
pub struct FrameCallbackRegistration {
    scheduler: Weak<SchedulerInner>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn cancel(mut self) {
        self.cancel_in_place();
    }

    fn cancel_in_place(&mut self) {
        if let (Some(id), Some(inner)) = (self.id.take(), self.scheduler.upgrade()) {
            inner.cancel(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.cancel_in_place();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_run_in_registration_order() {
        let scheduler = FrameScheduler::new();
        let clock = scheduler.clock();
        let order = Rc::new(RefCell::new(Vec::new()));

        let a = order.clone();
        let _reg_a = clock.with_frame_nanos(move |_| a.borrow_mut().push("a"));
        let b = order.clone();
        let _reg_b = clock.with_frame_nanos(move |_| b.borrow_mut().push("b"));

        scheduler.drain(16_000_000);
        assert_eq!(*order.borrow(), vec!["a", "b"]);
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn dropped_registration_cancels() {
        let scheduler = FrameScheduler::new();
        let clock = scheduler.clock();
        let fired = Rc::new(Cell::new(false));

        let flag = fired.clone();
        let registration = clock.with_frame_nanos(move |_| flag.set(true));
        drop(registration);

        scheduler.drain(16_000_000);
        assert!(!fired.get());
    }

    #[test]
    fn reentrant_registration_runs_next_frame() {
        let scheduler = FrameScheduler::new();
        let clock = scheduler.clock();
        let count = Rc::new(Cell::new(0));

        let keep = Rc::new(RefCell::new(None));
        let inner_count = count.clone();
        let inner_clock = clock.clone();
        let inner_keep = keep.clone();
        let _registration = clock.with_frame_nanos(move |_| {
            inner_count.set(inner_count.get() + 1);
            let inner_count = inner_count.clone();
            let reg = inner_clock.with_frame_nanos(move |_| inner_count.set(inner_count.get() + 1));
            *inner_keep.borrow_mut() = Some(reg);
        });

        scheduler.drain(16_000_000);
        assert_eq!(count.get(), 1);
        scheduler.drain(33_000_000);
        assert_eq!(count.get(), 2);
    }
}
