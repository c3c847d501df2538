//! Sheet configuration.

use crate::consts;

/// Immutable configuration supplied when a sheet is created.
///
/// Defaults mirror the stock sheet behavior; builder methods override
/// individual knobs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetConfiguration {
    /// Fraction of the container height the sheet may grow to, in (0, 1].
    pub max_height_ratio: f32,
    /// Whether the sheet rides up above the on-screen keyboard.
    pub avoids_keyboard: bool,
    /// Whether a left-edge swipe can dismiss by sliding the sheet right.
    pub edge_swipe_back_to_dismiss: bool,
    /// Top corner radius.
    pub corner_radius: f32,
    /// Show transition duration in milliseconds.
    pub show_duration_ms: u64,
    /// Hide / slide-out transition duration in milliseconds.
    pub hide_duration_ms: u64,
    /// Snap-back transition duration in milliseconds.
    pub snap_back_duration_ms: u64,
    /// Spring damping ratio for show / snap-back transitions.
    pub spring_damping: f32,
    /// Downward drag distance past which release dismisses.
    pub dismiss_threshold: f32,
    /// Release velocity (px/s) past which release commits either gesture.
    pub velocity_threshold: f32,
    /// Fraction of finger speed the sheet follows during horizontal drags.
    pub horizontal_drag_resistance: f32,
    /// Horizontal offset past which an edge swipe commits to slide-out.
    pub edge_swipe_dismiss_threshold: f32,
}

impl Default for SheetConfiguration {
    fn default() -> Self {
        Self {
            max_height_ratio: consts::MAX_HEIGHT_RATIO,
            avoids_keyboard: true,
            edge_swipe_back_to_dismiss: true,
            corner_radius: consts::CORNER_RADIUS,
            show_duration_ms: consts::SHOW_ANIMATION_MS,
            hide_duration_ms: consts::HIDE_ANIMATION_MS,
            snap_back_duration_ms: consts::SNAP_BACK_ANIMATION_MS,
            spring_damping: consts::SPRING_DAMPING,
            dismiss_threshold: consts::DISMISS_THRESHOLD,
            velocity_threshold: consts::VELOCITY_THRESHOLD,
            horizontal_drag_resistance: consts::HORIZONTAL_DRAG_RESISTANCE,
            edge_swipe_dismiss_threshold: consts::EDGE_SWIPE_DISMISS_THRESHOLD,
        }
    }
}

impl SheetConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the maximum-height ratio, clamped to the valid (0, 1]
    /// range.
    pub fn with_max_height_ratio(mut self, ratio: f32) -> Self {
        self.max_height_ratio = ratio.clamp(f32::EPSILON, 1.0);
        self
    }

    pub fn with_avoids_keyboard(mut self, avoids_keyboard: bool) -> Self {
        self.avoids_keyboard = avoids_keyboard;
        self
    }

    pub fn with_edge_swipe_back_to_dismiss(mut self, enabled: bool) -> Self {
        self.edge_swipe_back_to_dismiss = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = SheetConfiguration::default();
        assert_eq!(config.max_height_ratio, 0.9);
        assert_eq!(config.dismiss_threshold, 200.0);
        assert_eq!(config.velocity_threshold, 500.0);
        assert_eq!(config.horizontal_drag_resistance, 0.4);
        assert!(config.avoids_keyboard);
        assert!(config.edge_swipe_back_to_dismiss);
    }

    #[test]
    fn max_height_ratio_is_clamped_to_valid_range() {
        let config = SheetConfiguration::new().with_max_height_ratio(1.7);
        assert_eq!(config.max_height_ratio, 1.0);

        let config = SheetConfiguration::new().with_max_height_ratio(-0.2);
        assert!(config.max_height_ratio > 0.0);
    }
}
