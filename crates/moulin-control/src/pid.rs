// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — PID
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Velocity PID for the damped descent.
//!
//! The controller outputs a velocity increment, not a velocity. Integral
//! accumulates the raw error before the gain is applied and is never
//! clamped. The rate term is the negated current velocity, a damping proxy
//! in place of the error derivative; downstream series depend on this exact
//! recurrence.

use moulin_types::config::PidGains;
use moulin_types::state::{AxisState, ControllerState};

/// One axis of the recurrence. Returns `(velocity_new, integral_new)`.
///
/// ```text
/// integral_new = integral_old + error
/// control      = kp * error + ki * integral_new - kd * velocity_old
/// velocity_new = velocity_old + control
/// ```
pub fn pid_update(error: f64, velocity_old: f64, integral_old: f64, gains: &PidGains) -> (f64, f64) {
    let integral_new = integral_old + error;
    let derivative = -velocity_old;
    let control = gains.kp * error + gains.ki * integral_new + gains.kd * derivative;
    (velocity_old + control, integral_new)
}

/// Two-axis velocity controller. Each damped trajectory owns one.
#[derive(Debug, Clone)]
pub struct VelocityPid {
    pub gains: PidGains,
    state: ControllerState,
}

impl VelocityPid {
    pub fn new(gains: PidGains) -> Self {
        VelocityPid {
            gains,
            state: ControllerState::default(),
        }
    }

    /// One PID step on both axes. Returns the updated velocity `(vx, vy)`.
    pub fn step(&mut self, error_x: f64, error_y: f64) -> (f64, f64) {
        self.state.x = self.step_axis(self.state.x, error_x);
        self.state.y = self.step_axis(self.state.y, error_y);
        self.state.velocity()
    }

    fn step_axis(&self, axis: AxisState, error: f64) -> AxisState {
        let (velocity, integral) = pid_update(error, axis.velocity, axis.integral, &self.gains);
        AxisState { velocity, integral }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Reset velocity and accumulated error to zero.
    pub fn reset(&mut self) {
        self.state = ControllerState::default();
    }
}
