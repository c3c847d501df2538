//! Input event types.

use bottomsheet_ui_graphics::Point;

/// Raw pointer event as delivered by the host platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Position in container coordinates.
    pub position: Point,
    /// Event timestamp in milliseconds.
    pub time_ms: i64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, time_ms: i64) -> Self {
        Self {
            kind,
            position,
            time_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Lifecycle phase of a recognized pan gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One recognized pan gesture sample.
///
/// Hosts with native gesture recognizers can construct these directly;
/// hosts with raw pointer streams go through [`PanRecognizer`] which adds
/// touch-slop filtering and velocity tracking.
///
/// [`PanRecognizer`]: crate::input::PanRecognizer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSample {
    pub phase: PanPhase,
    /// Accumulated translation since the gesture began, in container
    /// coordinates.
    pub translation: Point,
    /// Current pointer location in container coordinates.
    pub location: Point,
    /// Instantaneous velocity in pixels per second.
    pub velocity: Point,
}

impl PanSample {
    pub fn new(phase: PanPhase, translation: Point, location: Point, velocity: Point) -> Self {
        Self {
            phase,
            translation,
            location,
            velocity,
        }
    }
}
