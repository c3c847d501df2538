//! The sheet controller: lifecycle state machine and orchestration.
//!
//! `Hidden → Appearing → Visible → (Dragging) → Dismissing → destroyed`.
//! The controller owns the sheet state, measures hosted content, sequences
//! show/dismiss transitions, applies keyboard offsets, and receives drag
//! outcomes from the gesture interpreter. Dismissal is guarded by a one-way
//! latch set synchronously before any animation starts, so the caller's
//! dismissal callback fires at most once per controller instance no matter
//! how dismissal triggers interleave.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use bottomsheet_animation::{
    AnimationSpec, Easing, FrameCallbackRegistration, FrameClock, FrameScheduler, SpringSpec,
    TransitionHandle, TweenSpec,
};
use bottomsheet_foundation::{
    HostedContent, KeyboardNotificationCenter, KeyboardObserver, PanSample,
};
use bottomsheet_ui_graphics::{EdgeInsets, Point, Rect};
use smallvec::SmallVec;

use crate::animator::SheetAnimator;
use crate::config::SheetConfiguration;
use crate::consts;
use crate::gesture::{DragOutcomeSink, SheetGestureInterpreter};
use crate::layout::{LayoutDriver, LayoutInputs, LayoutStrategy};
use crate::state::SheetState;
use crate::views::SheetViewTree;

/// Host-provided services and geometry a controller presents into.
#[derive(Clone)]
pub struct SheetEnvironment {
    pub container_bounds: Rect,
    pub safe_area: EdgeInsets,
    pub scheduler: FrameScheduler,
    pub keyboard: KeyboardNotificationCenter,
}

pub struct SheetController {
    config: SheetConfiguration,
    content: HostedContent,
    views: Rc<SheetViewTree>,
    layout: Rc<dyn LayoutDriver>,
    animator: SheetAnimator,
    gesture: SheetGestureInterpreter,
    keyboard_observer: KeyboardObserver,
    clock: FrameClock,
    state: SheetState,
    did_initial_layout: Cell<bool>,
    weak_self: RefCell<Weak<SheetController>>,
    on_dismiss: RefCell<Option<Box<dyn FnOnce()>>>,
    drag_progress_listener: RefCell<Option<Box<dyn FnMut(f32, bool)>>>,
    pending_frame_tasks: RefCell<SmallVec<[FrameCallbackRegistration; 2]>>,
    scroll_reset: RefCell<Option<TransitionHandle>>,
}

impl SheetController {
    pub fn new(
        config: SheetConfiguration,
        content: HostedContent,
        environment: SheetEnvironment,
        layout_strategy: LayoutStrategy,
        on_dismiss: impl FnOnce() + 'static,
    ) -> Rc<Self> {
        let views = SheetViewTree::new(
            environment.container_bounds,
            environment.safe_area,
            config.corner_radius,
        );
        let clock = environment.scheduler.clock();
        let animator = SheetAnimator::new(Rc::downgrade(&views), clock.clone(), config);
        let gesture = SheetGestureInterpreter::new(
            Rc::downgrade(&views),
            config,
            consts::DEFAULT_SHEET_HEIGHT,
        );
        let keyboard_observer = KeyboardObserver::new(environment.keyboard);

        let controller = Rc::new(Self {
            config,
            content,
            views,
            layout: layout_strategy.driver(),
            animator,
            gesture,
            keyboard_observer,
            clock,
            state: SheetState::default(),
            did_initial_layout: Cell::new(false),
            weak_self: RefCell::new(Weak::new()),
            on_dismiss: RefCell::new(Some(Box::new(on_dismiss))),
            drag_progress_listener: RefCell::new(None),
            pending_frame_tasks: RefCell::new(SmallVec::new()),
            scroll_reset: RefCell::new(None),
        });
        *controller.weak_self.borrow_mut() = Rc::downgrade(&controller);
        controller
            .gesture
            .set_sink(Rc::downgrade(&controller) as Weak<dyn DragOutcomeSink>);
        controller
    }

    /// `(progress, animated)` for the dim overlay; progress is in [0, 1].
    pub fn set_drag_progress_listener(&self, listener: impl FnMut(f32, bool) + 'static) {
        *self.drag_progress_listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn state(&self) -> &SheetState {
        &self.state
    }

    pub fn views(&self) -> &Rc<SheetViewTree> {
        &self.views
    }

    /// Presents the sheet: initial off-screen layout, content measurement,
    /// then the spring show transition. Redundant calls are ignored.
    pub fn present(&self) {
        if self.state.is_visible.get() || self.state.is_dismissing.get() {
            return;
        }

        let bounds = self.views.container_bounds();
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            log::error!("bottom sheet present abandoned: no usable host container");
            return;
        }

        log::debug!("presenting sheet into {bounds:?}");

        // Off-screen layout first, then measurement, so the show transition
        // starts from the container's bottom edge at the measured height.
        self.perform_layout_snapped();
        self.update_sheet_height();
        self.state.is_visible.set(true);
        self.report_drag_progress(0.0, false);

        if self.config.avoids_keyboard {
            self.start_keyboard_observer();
        }

        let layout_self = self.weak_self.borrow().clone();
        let completion_self = self.weak_self.borrow().clone();
        self.animator.animate_spring_layout(
            move || {
                if let Some(controller) = layout_self.upgrade() {
                    controller.run_layout_pass();
                }
            },
            move || {
                // Hosted content can settle late; measure once more on the
                // next frame after the show transition.
                if let Some(controller) = completion_self.upgrade() {
                    controller.schedule_deferred_height_update();
                }
            },
        );
    }

    /// Dismisses the sheet. Idempotent: the first call latches
    /// `is_dismissing`, every later call is absorbed.
    pub fn dismiss(&self) {
        if self.state.is_dismissing.get() {
            return;
        }
        self.state.is_dismissing.set(true);
        self.state.is_visible.set(false);
        log::debug!("dismissing sheet (drag-down/programmatic path)");
        self.report_drag_progress(1.0, true);

        let layout_self = self.weak_self.borrow().clone();
        let completion_self = self.weak_self.borrow().clone();
        self.animator.animate_ease_out_layout(
            move || {
                if let Some(controller) = layout_self.upgrade() {
                    controller.run_layout_pass();
                }
            },
            move || {
                if let Some(controller) = completion_self.upgrade() {
                    controller.finish_dismissal();
                }
            },
        );
    }

    /// The single accessibility escape action: dismiss and report handled.
    pub fn perform_accessibility_escape(&self) -> bool {
        self.dismiss();
        true
    }

    /// Recomputes header and content heights and commits the resulting
    /// sheet height. Skipped while a drag session owns the sheet's position
    /// and while a measurement is degenerate ("not ready yet").
    pub fn update_sheet_height(&self) {
        if self.gesture.is_sheet_being_dragged() || self.views.scroll().is_tracking() {
            return;
        }

        let bounds = self.views.container_bounds();
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }

        let body_size = self.content.measure_body(bounds.width);
        if body_size.is_degenerate() {
            log::warn!("sheet content reported no intrinsic size; skipping height update");
            return;
        }
        let header_height = self.content.measure_header_height(bounds.width);
        self.state.current_header_height.set(header_height);

        let safe_bottom = self.views.safe_area().bottom;
        let max_height = bounds.height * self.config.max_height_ratio;
        let calculated_height = header_height + body_size.height + safe_bottom;
        let final_height = calculated_height.min(max_height);

        let height_changed = self.state.current_height.get() != final_height;
        if height_changed {
            self.state.current_height.set(final_height);
            self.gesture.update_sheet_height(final_height);
        }

        let previous_needs_scroll = self.state.needs_scroll.get();
        self.state.needs_scroll.set(calculated_height > max_height);
        self.views
            .scroll()
            .set_max_offset((calculated_height - final_height).max(0.0));

        // Animate resizes only when visible and past the first layout pass;
        // everything else is a jump cut on purpose.
        let should_animate =
            height_changed && self.state.is_visible.get() && self.did_initial_layout.get();
        if should_animate {
            let layout_self = self.weak_self.borrow().clone();
            self.animator.animate_layout_change(
                AnimationSpec::Spring(SpringSpec::with_duration_and_damping(
                    self.config.snap_back_duration_ms,
                    self.config.spring_damping,
                )),
                move || {
                    if let Some(controller) = layout_self.upgrade() {
                        controller.run_layout_pass();
                    }
                },
                || {},
            );
        } else {
            self.perform_layout_snapped();
        }
        self.did_initial_layout.set(true);

        if previous_needs_scroll
            && !self.state.needs_scroll.get()
            && self.views.scroll().offset() > 0.0
        {
            let handle = self.views.scroll().animate_to_top(
                &self.clock,
                TweenSpec::new(consts::SCROLL_RESET_ANIMATION_MS, Easing::EaseInOut),
            );
            *self.scroll_reset.borrow_mut() = Some(handle);
        }
    }

    /// Applies a keyboard-induced offset with the system-supplied timing.
    pub fn handle_keyboard_change(&self, height: f32, duration_ms: u64, easing: Easing) {
        self.state.keyboard_offset.set(height.max(0.0));
        let layout_self = self.weak_self.borrow().clone();
        self.animator.animate_layout_change(
            AnimationSpec::Tween(TweenSpec::new(duration_ms, easing)),
            move || {
                if let Some(controller) = layout_self.upgrade() {
                    controller.run_layout_pass();
                }
            },
            || {},
        );
    }

    /// The host container changed size (rotation, window resize).
    pub fn handle_container_resize(&self, bounds: Rect, safe_area: EdgeInsets) {
        self.views.set_container_bounds(bounds);
        self.views.set_safe_area(safe_area);
        self.perform_layout_snapped();
        self.update_sheet_height();
    }

    /// Background tap: dismisses only when the tap lands outside the
    /// sheet's frame.
    pub fn handle_background_tap(&self, location: Point) {
        if self.views.point_is_outside_sheet(location) {
            self.dismiss();
        }
    }

    /// Pan samples from the embedded scroll region.
    pub fn handle_scroll_pan(&self, sample: &PanSample) {
        self.gesture.handle_scroll_pan(sample);
    }

    /// Pan samples from the header; ignored for header-less sheets, which
    /// install no header recognizer.
    pub fn handle_header_pan(&self, sample: &PanSample) {
        if !self.content.has_header() {
            return;
        }
        self.gesture.handle_header_pan(sample);
    }

    /// Pan samples from the left screen edge.
    pub fn handle_edge_swipe(&self, sample: &PanSample) {
        self.gesture.handle_edge_swipe(sample);
    }

    fn run_layout_pass(&self) {
        let inputs = LayoutInputs {
            sheet_height: self.state.current_height.get(),
            header_height: self.state.current_header_height.get(),
            keyboard_offset: self.state.keyboard_offset.get(),
            is_visible: self.state.is_visible.get(),
        };
        self.layout.apply_height(inputs.sheet_height);
        self.layout.apply_bottom_offset(inputs.bottom_offset());
        self.layout.perform_layout_pass(&self.views, &inputs);
    }

    fn perform_layout_snapped(&self) {
        self.run_layout_pass();
        self.views.snap_presentation();
    }

    fn start_keyboard_observer(&self) {
        let views = Rc::downgrade(&self.views);
        let weak = self.weak_self.borrow().clone();
        self.keyboard_observer.start(
            move || {
                views
                    .upgrade()
                    .map(|views| views.safe_area().bottom)
                    .unwrap_or(0.0)
            },
            move |height, duration_ms, easing| {
                if let Some(controller) = weak.upgrade() {
                    controller.handle_keyboard_change(height, duration_ms, easing);
                }
            },
        );
    }

    fn schedule_deferred_height_update(&self) {
        let weak = self.weak_self.borrow().clone();
        let registration = self.clock.with_frame_nanos(move |_| {
            if let Some(controller) = weak.upgrade() {
                controller.update_sheet_height();
            }
        });
        self.pending_frame_tasks.borrow_mut().push(registration);
    }

    fn finish_dismissal(&self) {
        self.keyboard_observer.stop();
        self.pending_frame_tasks.borrow_mut().clear();
        log::debug!("sheet dismissal complete");
        // The callback reference is cleared as it is taken; a second
        // invocation has nothing left to call.
        if let Some(on_dismiss) = self.on_dismiss.borrow_mut().take() {
            on_dismiss();
        }
    }

    fn report_drag_progress(&self, progress: f32, animated: bool) {
        if let Some(listener) = self.drag_progress_listener.borrow_mut().as_mut() {
            listener(progress.clamp(0.0, 1.0), animated);
        }
    }
}

impl DragOutcomeSink for SheetController {
    fn request_dismiss(&self) {
        self.dismiss();
    }

    fn request_slide_out_right(&self) {
        if self.state.is_dismissing.get() {
            return;
        }
        self.state.is_dismissing.set(true);
        log::debug!("dismissing sheet (slide-out-right path)");
        self.report_drag_progress(1.0, true);

        let completion_self = self.weak_self.borrow().clone();
        self.animator.animate_slide_out_right(move || {
            if let Some(controller) = completion_self.upgrade() {
                controller.finish_dismissal();
            }
        });
    }

    fn request_snap_back(&self) {
        self.animator.animate_snap_back(|| {});
    }

    fn report_progress(&self, progress: f32, animated: bool) {
        self.report_drag_progress(progress, animated);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
