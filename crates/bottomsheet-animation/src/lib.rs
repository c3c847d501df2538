//! Animation system for the bottom sheet
//!
//! Provides time-based transitions with easing curves and spring physics,
//! driven by an explicit frame clock. Nothing in this crate reads wall-clock
//! time: hosts (and tests) feed frame timestamps through
//! [`FrameScheduler::drain`], which keeps every animation deterministic.

mod easing;
mod frame_clock;
mod spec;
mod spring;
mod transition;

pub use easing::*;
pub use frame_clock::*;
pub use spec::*;
pub use spring::*;
pub use transition::*;

pub mod prelude {
    pub use crate::easing::Easing;
    pub use crate::frame_clock::{FrameClock, FrameScheduler};
    pub use crate::spec::{AnimationSpec, SpringSpec, TweenSpec};
    pub use crate::transition::{Transition, TransitionHandle};
}
