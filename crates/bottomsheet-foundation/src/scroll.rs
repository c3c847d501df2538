//! Scroll position state for the sheet's embedded scrollable region.
//!
//! This is a pure scroll model: it holds the offset and its bounds and
//! consumes deltas, while gesture interpretation stays with the caller. The
//! sheet pins this state to the top while a sheet-drag owns the touch
//! sequence, which is what prevents double-scrolling.

use std::cell::Cell;
use std::rc::Rc;

use bottomsheet_animation::{AnimationSpec, FrameClock, Transition, TransitionHandle, TweenSpec};

/// State object for scroll position tracking.
#[derive(Clone, Default)]
pub struct ScrollState {
    inner: Rc<ScrollStateInner>,
}

#[derive(Default)]
struct ScrollStateInner {
    /// Current scroll offset in pixels, 0 = content top.
    offset: Cell<f32>,
    /// Maximum scroll offset (content overflow past the viewport).
    max_offset: Cell<f32>,
    /// Whether a pointer currently owns the scroll region.
    tracking: Cell<bool>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scroll offset in pixels.
    pub fn offset(&self) -> f32 {
        self.inner.offset.get()
    }

    pub fn max_offset(&self) -> f32 {
        self.inner.max_offset.get()
    }

    /// Whether the content sits at (or above) its top edge.
    pub fn is_at_top(&self) -> bool {
        self.inner.offset.get() <= 0.0
    }

    /// Scrolls by the given delta, clamped to `[0, max_offset]`. Returns the
    /// amount actually consumed.
    pub fn dispatch_raw_delta(&self, delta: f32) -> f32 {
        let current = self.inner.offset.get();
        let target = (current + delta).clamp(0.0, self.inner.max_offset.get());
        let consumed = target - current;
        if consumed != 0.0 {
            self.inner.offset.set(target);
        }
        consumed
    }

    /// Jumps to the given offset, clamped to the valid range.
    pub fn set_offset(&self, offset: f32) {
        self.inner
            .offset
            .set(offset.clamp(0.0, self.inner.max_offset.get()));
    }

    /// Forces the offset to zero immediately.
    pub fn pin_to_top(&self) {
        self.inner.offset.set(0.0);
    }

    /// Updates the scrollable range. A shrinking range leaves the current
    /// offset alone — over-scrolled content stays put until the owner
    /// resets it (the sheet animates it back to the top).
    pub fn set_max_offset(&self, max_offset: f32) {
        self.inner.max_offset.set(max_offset.max(0.0));
    }

    /// Whether a pointer sequence currently owns the scroll region.
    pub fn is_tracking(&self) -> bool {
        self.inner.tracking.get()
    }

    pub fn set_tracking(&self, tracking: bool) {
        self.inner.tracking.set(tracking);
    }

    /// Animates the offset back to zero.
    pub fn animate_to_top(&self, clock: &FrameClock, spec: TweenSpec) -> TransitionHandle {
        let from = self.inner.offset.get();
        let state = self.clone();
        Transition::run(
            clock,
            AnimationSpec::Tween(spec),
            move |fraction| state.inner.offset.set(from * (1.0 - fraction)),
            || {},
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bottomsheet_animation::{Easing, FrameScheduler};

    #[test]
    fn delta_consumption_is_clamped() {
        let scroll = ScrollState::new();
        scroll.set_max_offset(100.0);

        assert_eq!(scroll.dispatch_raw_delta(60.0), 60.0);
        assert_eq!(scroll.dispatch_raw_delta(60.0), 40.0);
        assert_eq!(scroll.offset(), 100.0);
        assert_eq!(scroll.dispatch_raw_delta(-150.0), -100.0);
        assert!(scroll.is_at_top());
    }

    #[test]
    fn shrinking_range_leaves_offset_for_owner_to_reset() {
        let scroll = ScrollState::new();
        scroll.set_max_offset(200.0);
        scroll.set_offset(180.0);

        scroll.set_max_offset(50.0);
        assert_eq!(scroll.offset(), 180.0);

        // The next consumed delta clamps back into the new range.
        scroll.dispatch_raw_delta(10.0);
        assert_eq!(scroll.offset(), 50.0);
    }

    #[test]
    fn animate_to_top_lands_exactly_at_zero() {
        let scheduler = FrameScheduler::new();
        let scroll = ScrollState::new();
        scroll.set_max_offset(300.0);
        scroll.set_offset(120.0);

        let _handle = scroll.animate_to_top(
            &scheduler.clock(),
            TweenSpec::new(200, Easing::EaseInOut),
        );

        let mut time = 0u64;
        while scheduler.has_pending() {
            time += 16_666_667;
            scheduler.drain(time);
        }
        assert_eq!(scroll.offset(), 0.0);
    }
}
