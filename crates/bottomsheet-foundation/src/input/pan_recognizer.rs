//! Pan gesture recognition over raw pointer events.

use bottomsheet_ui_graphics::Point;

use crate::gesture_constants::{MAX_TRACKED_VELOCITY, TOUCH_SLOP};
use crate::input::{PanPhase, PanSample, PointerEvent, PointerEventKind, VelocityTracker2D};

/// Width of the screen-edge activation region for edge-swipe recognizers.
pub const EDGE_ACTIVATION_WIDTH: f32 = 16.0;

/// Turns a raw pointer stream into pan samples.
///
/// Movement inside the touch slop is swallowed; once the slop is passed the
/// recognizer emits `Began` with a translation re-based to zero, then
/// `Changed` samples, and finally `Ended`/`Cancelled` carrying the tracked
/// velocity. A press that never passes the slop produces no samples at all
/// (it is a tap, not a pan).
///
/// Hosts whose platform already provides recognized pan gestures can skip
/// this type and build [`PanSample`]s directly.
pub struct PanRecognizer {
    edge_activation_width: Option<f32>,
    start_position: Option<Point>,
    slop_passed: bool,
    failed: bool,
    tracker: VelocityTracker2D,
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PanRecognizer {
    pub fn new() -> Self {
        Self {
            edge_activation_width: None,
            start_position: None,
            slop_passed: false,
            failed: false,
            tracker: VelocityTracker2D::new(),
        }
    }

    /// A recognizer that only engages when the press lands within
    /// `activation_width` of the container's left edge.
    pub fn left_edge(activation_width: f32) -> Self {
        Self {
            edge_activation_width: Some(activation_width),
            ..Self::new()
        }
    }

    /// Feed one pointer event; returns a pan sample when the gesture state
    /// advances.
    pub fn handle_event(&mut self, event: &PointerEvent) -> Option<PanSample> {
        match event.kind {
            PointerEventKind::Down => {
                self.reset();
                if let Some(width) = self.edge_activation_width {
                    if event.position.x > width {
                        self.failed = true;
                        return None;
                    }
                }
                self.start_position = Some(event.position);
                self.tracker.add_position(event.time_ms, event.position);
                None
            }
            PointerEventKind::Move => {
                if self.failed {
                    return None;
                }
                let start = self.start_position?;
                self.tracker.add_position(event.time_ms, event.position);

                if !self.slop_passed {
                    let offset = event.position - start;
                    if offset.x.abs().max(offset.y.abs()) <= TOUCH_SLOP {
                        return None;
                    }
                    // Translation is re-based to the recognition point so the
                    // slop distance never leaks into drag math.
                    self.slop_passed = true;
                    self.start_position = Some(event.position);
                    return Some(PanSample::new(
                        PanPhase::Began,
                        Point::ZERO,
                        event.position,
                        Point::ZERO,
                    ));
                }

                Some(PanSample::new(
                    PanPhase::Changed,
                    event.position - start,
                    event.position,
                    self.tracker.calculate_velocity(MAX_TRACKED_VELOCITY),
                ))
            }
            PointerEventKind::Up => {
                let sample = self.final_sample(PanPhase::Ended, event);
                self.reset();
                sample
            }
            PointerEventKind::Cancel => {
                let sample = self.final_sample(PanPhase::Cancelled, event);
                self.reset();
                sample
            }
        }
    }

    fn final_sample(&mut self, phase: PanPhase, event: &PointerEvent) -> Option<PanSample> {
        if self.failed || !self.slop_passed {
            return None;
        }
        let start = self.start_position?;
        self.tracker.add_position(event.time_ms, event.position);
        Some(PanSample::new(
            phase,
            event.position - start,
            event.position,
            self.tracker.calculate_velocity(MAX_TRACKED_VELOCITY),
        ))
    }

    fn reset(&mut self) {
        self.start_position = None;
        self.slop_passed = false;
        self.failed = false;
        self.tracker.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f32, y: f32, t: i64) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Down, Point::new(x, y), t)
    }

    fn mv(x: f32, y: f32, t: i64) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Move, Point::new(x, y), t)
    }

    fn up(x: f32, y: f32, t: i64) -> PointerEvent {
        PointerEvent::new(PointerEventKind::Up, Point::new(x, y), t)
    }

    #[test]
    fn movement_inside_slop_is_swallowed() {
        let mut recognizer = PanRecognizer::new();
        assert!(recognizer.handle_event(&down(100.0, 100.0, 0)).is_none());
        assert!(recognizer.handle_event(&mv(104.0, 100.0, 10)).is_none());
        // Releasing without passing the slop is a tap, not a pan.
        assert!(recognizer.handle_event(&up(104.0, 100.0, 20)).is_none());
    }

    #[test]
    fn slop_pass_rebases_translation() {
        let mut recognizer = PanRecognizer::new();
        recognizer.handle_event(&down(100.0, 100.0, 0));

        let began = recognizer
            .handle_event(&mv(100.0, 112.0, 10))
            .expect("slop passed");
        assert_eq!(began.phase, PanPhase::Began);
        assert_eq!(began.translation, Point::ZERO);

        let changed = recognizer
            .handle_event(&mv(100.0, 162.0, 20))
            .expect("changed");
        assert_eq!(changed.phase, PanPhase::Changed);
        assert_eq!(changed.translation, Point::new(0.0, 50.0));
    }

    #[test]
    fn ended_sample_carries_velocity() {
        let mut recognizer = PanRecognizer::new();
        recognizer.handle_event(&down(100.0, 0.0, 0));
        recognizer.handle_event(&mv(100.0, 50.0, 10));
        recognizer.handle_event(&mv(100.0, 100.0, 20));
        recognizer.handle_event(&mv(100.0, 150.0, 30));

        let ended = recognizer
            .handle_event(&up(100.0, 200.0, 40))
            .expect("ended");
        assert_eq!(ended.phase, PanPhase::Ended);
        assert!(ended.velocity.y > 1_000.0, "got {}", ended.velocity.y);
    }

    #[test]
    fn edge_recognizer_rejects_interior_presses() {
        let mut recognizer = PanRecognizer::left_edge(EDGE_ACTIVATION_WIDTH);
        assert!(recognizer.handle_event(&down(200.0, 300.0, 0)).is_none());
        assert!(recognizer.handle_event(&mv(260.0, 300.0, 10)).is_none());
        assert!(recognizer.handle_event(&up(260.0, 300.0, 20)).is_none());

        recognizer.handle_event(&down(4.0, 300.0, 100));
        let began = recognizer.handle_event(&mv(24.0, 300.0, 110));
        assert_eq!(began.map(|s| s.phase), Some(PanPhase::Began));
    }

    #[test]
    fn cancel_after_recognition_reports_cancelled() {
        let mut recognizer = PanRecognizer::new();
        recognizer.handle_event(&down(100.0, 100.0, 0));
        recognizer.handle_event(&mv(100.0, 120.0, 10));

        let cancelled = recognizer.handle_event(&PointerEvent::new(
            PointerEventKind::Cancel,
            Point::new(100.0, 130.0),
            20,
        ));
        assert_eq!(cancelled.map(|s| s.phase), Some(PanPhase::Cancelled));
    }
}
