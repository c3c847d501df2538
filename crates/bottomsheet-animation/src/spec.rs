//! Animation specifications: tween and spring parameters.

use crate::Easing;

/// Timed animation with a fixed duration and easing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting in milliseconds.
    pub delay_ms: u64,
}

impl TweenSpec {
    pub fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            delay_ms: 0,
        }
    }

    pub fn linear(duration_ms: u64) -> Self {
        Self::new(duration_ms, Easing::Linear)
    }

    pub fn ease_out(duration_ms: u64) -> Self {
        Self::new(duration_ms, Easing::EaseOut)
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(300, Easing::EaseInOut)
    }
}

/// Spring animation configuration.
///
/// Parameterized the way the sheet's call sites express springs: a response
/// duration plus a damping ratio. The angular frequency is derived as
/// `2π / response`, so a 0.85-damped 350 ms spring settles in roughly its
/// response duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Response duration in milliseconds.
    pub response_ms: u64,
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy),
    /// > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Initial velocity in fraction units per second.
    pub initial_velocity: f32,
    /// Position threshold (fraction units) to stop the animation.
    pub position_threshold: f32,
    /// Velocity threshold (fraction units per second) to stop the animation.
    pub velocity_threshold: f32,
}

impl SpringSpec {
    pub fn with_duration_and_damping(response_ms: u64, damping_ratio: f32) -> Self {
        Self {
            response_ms,
            damping_ratio,
            initial_velocity: 0.0,
            position_threshold: 0.001,
            velocity_threshold: 0.01,
        }
    }

    pub fn with_initial_velocity(mut self, initial_velocity: f32) -> Self {
        self.initial_velocity = initial_velocity;
        self
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::with_duration_and_damping(300, 1.0)
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationSpec {
    /// Time-based tween animation.
    Tween(TweenSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
}

impl Default for AnimationSpec {
    fn default() -> Self {
        AnimationSpec::Tween(TweenSpec::default())
    }
}

impl From<TweenSpec> for AnimationSpec {
    fn from(spec: TweenSpec) -> Self {
        AnimationSpec::Tween(spec)
    }
}

impl From<SpringSpec> for AnimationSpec {
    fn from(spec: SpringSpec) -> Self {
        AnimationSpec::Spring(spec)
    }
}
