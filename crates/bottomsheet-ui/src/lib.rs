//! Drag-dismissible bottom sheet component
//!
//! A panel that slides up from the bottom of a container, measures its own
//! height from hosted content, coordinates with the on-screen keyboard, and
//! dismisses via drag-down, left-edge swipe, background tap, or
//! programmatic request.
//!
//! The crate is layered the way the gestures flow: [`SheetGestureInterpreter`]
//! classifies pan samples into drag outcomes, [`SheetController`] turns
//! outcomes into state transitions, [`SheetAnimator`] converges on-screen
//! geometry, and [`SheetPresenter`] maps bindings onto controller
//! lifecycles.

mod animator;
mod config;
pub mod consts;
mod controller;
mod error;
mod gesture;
mod layout;
mod presenter;
mod state;
mod views;

pub use animator::SheetAnimator;
pub use config::SheetConfiguration;
pub use controller::{SheetController, SheetEnvironment};
pub use error::PresentError;
pub use gesture::{DragOutcomeSink, SheetGestureInterpreter};
pub use layout::{
    ConstraintLayoutDriver, FrameLayoutDriver, LayoutDriver, LayoutInputs, LayoutStrategy,
};
pub use presenter::{HostContext, ItemBinding, PresentationStyle, SheetBinding, SheetPresenter};
pub use state::SheetState;
pub use views::{SheetNode, SheetViewTree};

pub mod prelude {
    pub use crate::config::SheetConfiguration;
    pub use crate::controller::{SheetController, SheetEnvironment};
    pub use crate::error::PresentError;
    pub use crate::presenter::{
        HostContext, ItemBinding, PresentationStyle, SheetBinding, SheetPresenter,
    };
}
