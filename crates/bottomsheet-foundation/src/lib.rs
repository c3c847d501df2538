//! Foundation elements for the bottom sheet
//!
//! Pan-gesture input types and recognition, velocity tracking, scroll
//! position state, content measurement, and keyboard notification plumbing.
//! Everything here is rendering-agnostic; the ui crate composes these into
//! the sheet itself.

mod gesture_constants;
pub mod input;
mod keyboard;
mod measure;
mod scroll;

pub use gesture_constants::*;
pub use input::{
    PanPhase, PanRecognizer, PanSample, PointerEvent, PointerEventKind, VelocityTracker1D,
    VelocityTracker2D, EDGE_ACTIVATION_WIDTH,
};
pub use keyboard::*;
pub use measure::*;
pub use scroll::*;

pub mod prelude {
    pub use crate::input::{PanPhase, PanRecognizer, PanSample, PointerEvent, PointerEventKind};
    pub use crate::keyboard::{KeyboardNotificationCenter, KeyboardObserver};
    pub use crate::measure::{HostedContent, MeasurableContent};
    pub use crate::scroll::ScrollState;
}
