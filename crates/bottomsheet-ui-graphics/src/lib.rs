//! Pure math/data for sheet geometry
//!
//! This crate contains the geometry primitives shared by the animation,
//! foundation, and ui crates. No logic beyond coordinate arithmetic lives
//! here.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size, Translation};
}
