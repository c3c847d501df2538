//! Frame-driven transitions emitting a normalized fraction.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{AnimationSpec, FrameCallbackRegistration, FrameClock, SpringSimulation, TweenSpec};

/// A running transition.
///
/// Each frame the transition emits a fraction to its `on_frame` callback:
/// 0.0 at release, 1.0 exactly at completion, possibly above 1.0 mid-flight
/// for under-damped springs. After the final frame the completion callback
/// runs exactly once.
///
/// Transitions keep themselves alive through their frame registrations;
/// dropping the returned [`TransitionHandle`] does not stop them. Use
/// [`TransitionHandle::cancel`] to stop one early — a cancelled transition
/// never invokes its completion.
pub struct Transition;

enum TransitionMode {
    Tween(TweenSpec),
    Spring(SpringSimulation),
}

struct TransitionState {
    clock: FrameClock,
    mode: TransitionMode,
    start_time_nanos: Cell<Option<u64>>,
    finished: Cell<bool>,
    on_frame: RefCell<Box<dyn FnMut(f32)>>,
    on_complete: RefCell<Option<Box<dyn FnOnce()>>>,
    registration: RefCell<Option<FrameCallbackRegistration>>,
}

impl Transition {
    pub fn run(
        clock: &FrameClock,
        spec: AnimationSpec,
        on_frame: impl FnMut(f32) + 'static,
        on_complete: impl FnOnce() + 'static,
    ) -> TransitionHandle {
        let mode = match spec {
            AnimationSpec::Tween(tween) => TransitionMode::Tween(tween),
            AnimationSpec::Spring(spring) => {
                TransitionMode::Spring(SpringSimulation::new(&spring))
            }
        };

        if !clock.is_live() {
            // No frames will ever be delivered; settle synchronously.
            let mut on_frame = on_frame;
            on_frame(1.0);
            on_complete();
            return TransitionHandle {
                state: Rc::new(TransitionState {
                    clock: clock.clone(),
                    mode,
                    start_time_nanos: Cell::new(None),
                    finished: Cell::new(true),
                    on_frame: RefCell::new(Box::new(on_frame)),
                    on_complete: RefCell::new(None),
                    registration: RefCell::new(None),
                }),
            };
        }

        let state = Rc::new(TransitionState {
            clock: clock.clone(),
            mode,
            start_time_nanos: Cell::new(None),
            finished: Cell::new(false),
            on_frame: RefCell::new(Box::new(on_frame)),
            on_complete: RefCell::new(Some(Box::new(on_complete))),
            registration: RefCell::new(None),
        });
        Self::schedule(&state);
        TransitionHandle { state }
    }

    fn schedule(state: &Rc<TransitionState>) {
        let step_state = Rc::clone(state);
        let registration = state
            .clock
            .with_frame_nanos(move |time| Self::step(&step_state, time));
        *state.registration.borrow_mut() = Some(registration);
    }

    fn step(state: &Rc<TransitionState>, frame_time_nanos: u64) {
        if state.finished.get() {
            return;
        }

        let start = match state.start_time_nanos.get() {
            Some(start) => start,
            None => {
                state.start_time_nanos.set(Some(frame_time_nanos));
                frame_time_nanos
            }
        };
        let elapsed_nanos = frame_time_nanos.saturating_sub(start);

        let (fraction, done) = match &state.mode {
            TransitionMode::Tween(tween) => {
                let elapsed_ms = elapsed_nanos / 1_000_000;
                if elapsed_ms < tween.delay_ms {
                    (0.0, false)
                } else if tween.duration_ms == 0 {
                    (1.0, true)
                } else {
                    let active_ms = elapsed_ms - tween.delay_ms;
                    if active_ms >= tween.duration_ms {
                        (1.0, true)
                    } else {
                        let linear = active_ms as f32 / tween.duration_ms as f32;
                        (tween.easing.transform(linear), false)
                    }
                }
            }
            TransitionMode::Spring(sim) => {
                let t_secs = elapsed_nanos as f32 / 1_000_000_000.0;
                if sim.is_settled(t_secs) {
                    (1.0, true)
                } else {
                    (sim.fraction(t_secs), false)
                }
            }
        };

        (state.on_frame.borrow_mut())(fraction);

        if done {
            state.finished.set(true);
            state.registration.borrow_mut().take();
            if let Some(on_complete) = state.on_complete.borrow_mut().take() {
                on_complete();
            }
        } else {
            Self::schedule(state);
        }
    }
}

/// Control handle for a running transition.
pub struct TransitionHandle {
    state: Rc<TransitionState>,
}

impl TransitionHandle {
    /// Stop the transition without running its completion callback.
    pub fn cancel(&self) {
        self.state.finished.set(true);
        self.state.registration.borrow_mut().take();
        self.state.on_complete.borrow_mut().take();
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished.get()
    }
}

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod tests;
