//! Damped harmonic oscillator used by spring transitions.

use crate::SpringSpec;

/// Analytic solution of a damped spring moving a normalized fraction from
/// 0.0 to 1.0.
///
/// Positions are expressed as displacement from the target, so the returned
/// fraction is `1.0 + displacement(t)`. Under-damped springs overshoot past
/// 1.0 before settling; callers interpolating with the fraction get the
/// bounce for free.
#[derive(Debug, Clone, Copy)]
pub struct SpringSimulation {
    omega: f32,
    zeta: f32,
    x0: f32,
    v0: f32,
    position_threshold: f32,
    velocity_threshold: f32,
}

impl SpringSimulation {
    pub fn new(spec: &SpringSpec) -> Self {
        let response_secs = (spec.response_ms.max(1) as f32) / 1000.0;
        Self {
            omega: core::f32::consts::TAU / response_secs,
            zeta: spec.damping_ratio.max(0.0),
            // Start displaced one whole fraction unit below the target.
            x0: -1.0,
            v0: spec.initial_velocity,
            position_threshold: spec.position_threshold,
            velocity_threshold: spec.velocity_threshold,
        }
    }

    /// Fraction value at `t` seconds since the spring was released.
    pub fn fraction(&self, t: f32) -> f32 {
        1.0 + self.displacement(t).0
    }

    /// Whether the spring has settled at `t` seconds.
    pub fn is_settled(&self, t: f32) -> bool {
        let (x, v) = self.displacement(t);
        x.abs() < self.position_threshold && v.abs() < self.velocity_threshold
    }

    /// Displacement from target and velocity at `t` seconds.
    fn displacement(&self, t: f32) -> (f32, f32) {
        let omega = self.omega;
        let zeta = self.zeta;
        let x0 = self.x0;
        let v0 = self.v0;

        if zeta < 1.0 {
            // Under-damped: decaying oscillation.
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * t).exp();
            let a = x0;
            let b = (v0 + zeta * omega * x0) / omega_d;
            let (sin, cos) = (omega_d * t).sin_cos();
            let x = decay * (a * cos + b * sin);
            let dx = decay
                * ((b * omega_d - a * zeta * omega) * cos - (a * omega_d + b * zeta * omega) * sin);
            (x, dx)
        } else if (zeta - 1.0).abs() < f32::EPSILON {
            // Critically damped.
            let c1 = x0;
            let c2 = v0 + omega * x0;
            let decay = (-omega * t).exp();
            let x = (c1 + c2 * t) * decay;
            let dx = (c2 - omega * (c1 + c2 * t)) * decay;
            (x, dx)
        } else {
            // Over-damped: two real decay rates.
            let disc = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - disc);
            let r2 = -omega * (zeta + disc);
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let x = c1 * (r1 * t).exp() + c2 * (r2 * t).exp();
            let dx = c1 * r1 * (r1 * t).exp() + c2 * r2 * (r2 * t).exp();
            (x, dx)
        }
    }
}
