//! Gesture interpretation for the sheet.
//!
//! Three physical gestures — the embedded scroll region's pan, the header
//! pan, and the left-edge swipe — funnel into one logical outcome sink, so
//! the controller only ever sees dismiss / slide-out / snap-back / progress.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use bottomsheet_foundation::{PanPhase, PanSample};
use bottomsheet_ui_graphics::Translation;

use crate::config::SheetConfiguration;
use crate::consts;
use crate::views::SheetViewTree;

/// Logical outcomes a gesture can resolve to.
///
/// The controller implements this; the interpreter never knows which
/// physical gesture produced a transition, only the outcome.
pub trait DragOutcomeSink {
    fn request_dismiss(&self);
    fn request_slide_out_right(&self);
    fn request_snap_back(&self);
    /// `progress` is clamped to [0, 1]; `animated` is true for resets.
    fn report_progress(&self, progress: f32, animated: bool);
}

/// Axis a header pan locks to, decided once per gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragAxis {
    Horizontal,
    Vertical,
}

/// Per-gesture state, created at gesture begin and discarded at end/cancel.
#[derive(Default)]
struct DragSession {
    locked_axis: Option<DragAxis>,
    started_with_scroll: bool,
    dragging_sheet: bool,
}

/// Classifies pan samples into drag outcomes.
pub struct SheetGestureInterpreter {
    views: Weak<SheetViewTree>,
    sink: RefCell<Weak<dyn DragOutcomeSink>>,
    config: SheetConfiguration,
    sheet_height: Cell<f32>,
    session: RefCell<DragSession>,
}

impl SheetGestureInterpreter {
    pub fn new(views: Weak<SheetViewTree>, config: SheetConfiguration, sheet_height: f32) -> Self {
        Self {
            views,
            sink: RefCell::new(Weak::<NullSink>::new() as Weak<dyn DragOutcomeSink>),
            config,
            sheet_height: Cell::new(sheet_height),
            session: RefCell::new(DragSession::default()),
        }
    }

    pub fn set_sink(&self, sink: Weak<dyn DragOutcomeSink>) {
        *self.sink.borrow_mut() = sink;
    }

    /// Keeps progress-to-distance conversion correct across height changes.
    pub fn update_sheet_height(&self, height: f32) {
        self.sheet_height.set(height);
    }

    /// True only while a drag gesture is actively controlling the sheet's
    /// position. Layout's write path is gated on this.
    pub fn is_sheet_being_dragged(&self) -> bool {
        self.session.borrow().dragging_sheet
    }

    /// Pan gesture of the embedded scroll region.
    ///
    /// Control hands over from inner scrolling to sheet dragging only when
    /// the content is at its top, the translation points down, and the
    /// gesture did not start mid-scroll. Once handed over, the session stays
    /// in sheet-drag mode for the rest of the gesture.
    pub fn handle_scroll_pan(&self, sample: &PanSample) {
        let Some(views) = self.views.upgrade() else {
            return;
        };
        let scroll = views.scroll();

        match sample.phase {
            PanPhase::Began => {
                scroll.set_tracking(true);
                self.session.borrow_mut().started_with_scroll = scroll.offset() > 0.0;
            }
            PanPhase::Changed => {
                if scroll.offset() > 0.0 {
                    self.session.borrow_mut().started_with_scroll = true;
                }

                let hands_over = {
                    let session = self.session.borrow();
                    scroll.is_at_top() && sample.translation.y > 0.0 && !session.started_with_scroll
                };
                if hands_over {
                    self.session.borrow_mut().dragging_sheet = true;
                    views
                        .sheet()
                        .set_transform(Translation::new(0.0, sample.translation.y));
                    scroll.pin_to_top();
                    self.report_progress(sample.translation.y / self.effective_height(), false);
                } else if self.session.borrow().dragging_sheet {
                    let clamped_y = sample.translation.y.max(0.0);
                    views.sheet().set_transform(Translation::new(0.0, clamped_y));
                    scroll.pin_to_top();
                    self.report_progress(clamped_y / self.effective_height(), false);
                }
            }
            PanPhase::Ended => {
                scroll.set_tracking(false);
                if self.session.borrow().dragging_sheet {
                    let drag_y = views.sheet().transform().y;
                    if drag_y > self.config.dismiss_threshold
                        || sample.velocity.y > self.config.velocity_threshold
                    {
                        self.with_sink(|sink| sink.request_dismiss());
                    } else {
                        self.snap_back();
                    }
                }
                self.reset_session();
            }
            PanPhase::Cancelled => {
                scroll.set_tracking(false);
                if self.session.borrow().dragging_sheet {
                    self.snap_back();
                }
                self.reset_session();
            }
        }
    }

    /// Pan gesture of the header / drag handle.
    ///
    /// The axis is undecided until movement leaves the deadzone, then locks
    /// for the remainder of the gesture — horizontal only when edge-swipe
    /// dismissal is enabled and the motion is dominantly rightward.
    pub fn handle_header_pan(&self, sample: &PanSample) {
        let Some(views) = self.views.upgrade() else {
            return;
        };

        match sample.phase {
            PanPhase::Began => {}
            PanPhase::Changed => {
                if self.session.borrow().locked_axis.is_none() {
                    let translation = sample.translation;
                    if translation.x.abs().max(translation.y.abs()) <= consts::AXIS_LOCK_DEADZONE {
                        return;
                    }
                    let axis = if self.config.edge_swipe_back_to_dismiss
                        && translation.x.abs() > translation.y.abs()
                        && translation.x > 0.0
                    {
                        DragAxis::Horizontal
                    } else {
                        DragAxis::Vertical
                    };
                    let mut session = self.session.borrow_mut();
                    session.locked_axis = Some(axis);
                    session.dragging_sheet = true;
                }

                match self.session.borrow().locked_axis {
                    Some(DragAxis::Horizontal) => {
                        self.apply_horizontal_drag(&views, sample.location.x);
                    }
                    Some(DragAxis::Vertical) => {
                        let clamped_y = sample.translation.y.max(0.0);
                        views.sheet().set_transform(Translation::new(0.0, clamped_y));
                        self.report_progress(clamped_y / self.effective_height(), false);
                    }
                    None => {}
                }
            }
            PanPhase::Ended => {
                let transform = views.sheet().transform();
                let horizontal =
                    self.session.borrow().locked_axis == Some(DragAxis::Horizontal);
                if horizontal && transform.x > 0.0 {
                    if transform.x > self.config.edge_swipe_dismiss_threshold
                        || sample.velocity.x > self.config.velocity_threshold
                    {
                        self.with_sink(|sink| sink.request_slide_out_right());
                    } else {
                        self.snap_back();
                    }
                } else if transform.y > self.config.dismiss_threshold
                    || sample.velocity.y > self.config.velocity_threshold
                {
                    self.with_sink(|sink| sink.request_dismiss());
                } else {
                    self.snap_back();
                }
                self.reset_session();
            }
            PanPhase::Cancelled => {
                self.snap_back();
                self.reset_session();
            }
        }
    }

    /// Left screen-edge pan; active only when edge-swipe dismissal is
    /// enabled.
    pub fn handle_edge_swipe(&self, sample: &PanSample) {
        if !self.config.edge_swipe_back_to_dismiss {
            return;
        }
        let Some(views) = self.views.upgrade() else {
            return;
        };

        match sample.phase {
            PanPhase::Began => {
                self.session.borrow_mut().dragging_sheet = true;
            }
            PanPhase::Changed => {
                self.apply_horizontal_drag(&views, sample.location.x);
            }
            PanPhase::Ended => {
                let drag_x = views.sheet().transform().x;
                if drag_x > self.config.edge_swipe_dismiss_threshold
                    || sample.velocity.x > self.config.velocity_threshold
                {
                    self.with_sink(|sink| sink.request_slide_out_right());
                } else {
                    self.snap_back();
                }
                self.reset_session();
            }
            PanPhase::Cancelled => {
                self.snap_back();
                self.reset_session();
            }
        }
    }

    /// Horizontal drags move at a fraction of finger speed; the rubber-band
    /// resistance signals a commit gesture rather than a reposition.
    fn apply_horizontal_drag(&self, views: &Rc<SheetViewTree>, location_x: f32) {
        let clamped_x = (location_x * self.config.horizontal_drag_resistance).max(0.0);
        views.sheet().set_transform(Translation::new(clamped_x, 0.0));

        let sheet_width = views.sheet().frame().width;
        if sheet_width > 0.0 {
            self.report_progress(clamped_x / sheet_width, false);
        }
    }

    fn effective_height(&self) -> f32 {
        let height = self.sheet_height.get();
        if height > 0.0 {
            height
        } else {
            consts::DEFAULT_SHEET_HEIGHT
        }
    }

    fn snap_back(&self) {
        self.with_sink(|sink| {
            sink.request_snap_back();
            sink.report_progress(0.0, true);
        });
    }

    fn report_progress(&self, progress: f32, animated: bool) {
        self.with_sink(|sink| sink.report_progress(progress.clamp(0.0, 1.0), animated));
    }

    fn with_sink(&self, f: impl FnOnce(&dyn DragOutcomeSink)) {
        if let Some(sink) = self.sink.borrow().upgrade() {
            f(sink.as_ref());
        }
    }

    fn reset_session(&self) {
        *self.session.borrow_mut() = DragSession::default();
    }
}

/// Placeholder sink used before the controller wires itself in.
struct NullSink;

impl DragOutcomeSink for NullSink {
    fn request_dismiss(&self) {}
    fn request_slide_out_right(&self) {}
    fn request_snap_back(&self) {}
    fn report_progress(&self, _progress: f32, _animated: bool) {}
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
