//! Pointer and pan-gesture input.

mod pan_recognizer;
mod types;
mod velocity_tracker;

pub use pan_recognizer::*;
pub use types::*;
pub use velocity_tracker::*;
