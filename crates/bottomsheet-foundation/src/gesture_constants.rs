//! Shared gesture constants for consistent touch/pointer handling.
//!
//! These values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's DPI factor.

/// Drag threshold in logical pixels.
///
/// A pan recognizer does not report movement until the pointer travels more
/// than this distance from the initial press position. Large enough to
/// ignore finger jitter, small enough to feel responsive, and in line with
/// common platform conventions (~8dp touch slop).
pub const TOUCH_SLOP: f32 = 8.0;

/// Maximum velocity in logical pixels per second reported by the tracker.
///
/// Matches the platform default maximum gesture velocity on a baseline
/// density. Velocities above this are clamped before threshold comparisons.
pub const MAX_TRACKED_VELOCITY: f32 = 8_000.0;
