//! Internal constants for the bottom sheet.

/// Corner radius applied to the sheet's top corners.
pub const CORNER_RADIUS: f32 = 16.0;

/// Fraction of the container height the sheet may grow to.
pub const MAX_HEIGHT_RATIO: f32 = 0.9;

/// Base opacity of the dim overlay behind a fully presented sheet.
pub const DIM_OPACITY: f32 = 0.4;

/// Show transition duration in milliseconds.
pub const SHOW_ANIMATION_MS: u64 = 350;

/// Hide / slide-out transition duration in milliseconds.
pub const HIDE_ANIMATION_MS: u64 = 250;

/// Snap-back transition duration in milliseconds.
pub const SNAP_BACK_ANIMATION_MS: u64 = 300;

/// Duration of the scroll-offset reset when content stops overflowing.
pub const SCROLL_RESET_ANIMATION_MS: u64 = 200;

/// Spring damping ratio for show / snap-back transitions.
pub const SPRING_DAMPING: f32 = 0.85;

/// Downward drag distance past which release commits to dismissal.
pub const DISMISS_THRESHOLD: f32 = 200.0;

/// Release velocity (px/s, either axis) past which release commits.
pub const VELOCITY_THRESHOLD: f32 = 500.0;

/// Height used before the first successful content measurement.
pub const DEFAULT_SHEET_HEIGHT: f32 = 300.0;

/// Fraction of finger speed the sheet follows during horizontal drags.
pub const HORIZONTAL_DRAG_RESISTANCE: f32 = 0.4;

/// Horizontal offset past which an edge swipe commits to slide-out.
pub const EDGE_SWIPE_DISMISS_THRESHOLD: f32 = 50.0;

/// Movement below this never locks a header pan to an axis.
pub const AXIS_LOCK_DEADZONE: f32 = 6.0;
