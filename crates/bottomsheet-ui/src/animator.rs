//! Sheet transition animator.
//!
//! Stateless beyond weak view references and the handles of in-flight
//! transitions. Every operation takes a layout-mutation closure and a
//! completion: the closure commits target geometry synchronously, the
//! animator converges the presented geometry over frames, and the
//! completion runs exactly once after the transition settles — always
//! asynchronously relative to the call. Starting a new transition on the
//! same channel cancels the previous one without running its completion.

use std::cell::RefCell;
use std::rc::Weak;

use bottomsheet_animation::{
    AnimationSpec, FrameClock, SpringSpec, Transition, TransitionHandle, TweenSpec,
};
use bottomsheet_ui_graphics::{Rect, Translation};

use crate::config::SheetConfiguration;
use crate::views::SheetViewTree;

pub struct SheetAnimator {
    views: Weak<SheetViewTree>,
    clock: FrameClock,
    config: SheetConfiguration,
    layout_transition: RefCell<Option<TransitionHandle>>,
    transform_transition: RefCell<Option<TransitionHandle>>,
}

impl SheetAnimator {
    pub fn new(views: Weak<SheetViewTree>, clock: FrameClock, config: SheetConfiguration) -> Self {
        Self {
            views,
            clock,
            config,
            layout_transition: RefCell::new(None),
            transform_transition: RefCell::new(None),
        }
    }

    /// Spring layout transition used when the sheet appears and when its
    /// height changes while visible.
    pub fn animate_spring_layout(
        &self,
        layout: impl FnOnce(),
        completion: impl FnOnce() + 'static,
    ) {
        self.animate_layout_change(
            AnimationSpec::Spring(SpringSpec::with_duration_and_damping(
                self.config.show_duration_ms,
                self.config.spring_damping,
            )),
            layout,
            completion,
        );
    }

    /// Ease-out layout transition used for dismissal.
    pub fn animate_ease_out_layout(
        &self,
        layout: impl FnOnce(),
        completion: impl FnOnce() + 'static,
    ) {
        self.animate_layout_change(
            AnimationSpec::Tween(TweenSpec::ease_out(self.config.hide_duration_ms)),
            layout,
            completion,
        );
    }

    /// Generic layout transition; the keyboard path supplies the
    /// system-provided duration and curve through this.
    pub fn animate_layout_change(
        &self,
        spec: AnimationSpec,
        layout: impl FnOnce(),
        completion: impl FnOnce() + 'static,
    ) {
        let Some(views) = self.views.upgrade() else {
            completion();
            return;
        };

        if let Some(previous) = self.layout_transition.borrow_mut().take() {
            previous.cancel();
        }

        let start = views.sheet().presented_frame();
        layout();

        let frame_views = self.views.clone();
        let handle = Transition::run(
            &self.clock,
            spec,
            move |fraction| {
                if let Some(views) = frame_views.upgrade() {
                    // Target is re-read each frame so a layout pass that
                    // lands mid-transition retargets instead of being
                    // overwritten.
                    let target = views.sheet().frame();
                    views
                        .sheet()
                        .set_presented_frame(Rect::lerp(start, target, fraction));
                }
            },
            completion,
        );
        *self.layout_transition.borrow_mut() = Some(handle);
    }

    /// Animates the drag transform back to identity with the snap-back
    /// spring. Visibility and dismissal state are untouched.
    pub fn animate_snap_back(&self, completion: impl FnOnce() + 'static) {
        let Some(views) = self.views.upgrade() else {
            completion();
            return;
        };

        if let Some(previous) = self.transform_transition.borrow_mut().take() {
            previous.cancel();
        }

        let start = views.sheet().transform();
        let frame_views = self.views.clone();
        let handle = Transition::run(
            &self.clock,
            AnimationSpec::Spring(SpringSpec::with_duration_and_damping(
                self.config.snap_back_duration_ms,
                self.config.spring_damping,
            )),
            move |fraction| {
                if let Some(views) = frame_views.upgrade() {
                    views
                        .sheet()
                        .set_transform(Translation::lerp(start, Translation::IDENTITY, fraction));
                }
            },
            completion,
        );
        *self.transform_transition.borrow_mut() = Some(handle);
    }

    /// Slides the sheet fully off the right edge — the edge-swipe-back
    /// terminal path, visually distinct from the drag-down dismissal.
    pub fn animate_slide_out_right(&self, completion: impl FnOnce() + 'static) {
        let Some(views) = self.views.upgrade() else {
            completion();
            return;
        };

        if let Some(previous) = self.transform_transition.borrow_mut().take() {
            previous.cancel();
        }

        let start = views.sheet().transform();
        let target = Translation::new(views.sheet().frame().width, 0.0);
        let frame_views = self.views.clone();
        let handle = Transition::run(
            &self.clock,
            AnimationSpec::Tween(TweenSpec::ease_out(self.config.hide_duration_ms)),
            move |fraction| {
                if let Some(views) = frame_views.upgrade() {
                    views
                        .sheet()
                        .set_transform(Translation::lerp(start, target, fraction));
                }
            },
            completion,
        );
        *self.transform_transition.borrow_mut() = Some(handle);
    }
}
