// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — Constrained Integrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Point-mass descent under additive velocity updates, clipped to the walls.
//!
//! ```text
//! raw   = p[i-1] + v + noise
//! p[i]  = clip(raw, left[i] + margin, right[i] - margin)
//! ```
//!
//! The open-loop runner uses the velocity from before the step and then
//! adds the step noise to it. The damped runner first updates its velocity
//! through the PID, fed `reference[i] - p[i-1]`, and moves with the new
//! velocity. A saturated step does not roll back velocity, so a runner can
//! keep pushing against a wall over many steps. A velocity or raw position
//! that is no longer finite ends the run with an error instead of being
//! clipped onto a wall.

use crate::constraints::Corridor;
use crate::pid::VelocityPid;
use moulin_types::config::PidGains;
use moulin_types::error::{MoulinError, MoulinResult};
use moulin_types::state::{ControllerState, TrajectoryRecord};

/// How a runner updates its velocity.
#[derive(Debug, Clone)]
pub enum Drive {
    /// v += noise after each move.
    OpenLoop { state: ControllerState },
    /// v from the PID before each move.
    Damped { pid: VelocityPid },
}

/// Owns one trajectory: its controller state and its position record.
/// Steps are written in order, 1 through N-1, each exactly once.
#[derive(Debug, Clone)]
pub struct TrajectoryRunner {
    drive: Drive,
    record: TrajectoryRecord,
    next: usize,
    wall_contacts: usize,
}

impl TrajectoryRunner {
    /// Noise-only baseline over `n` steps, starting at rest at the origin.
    pub fn open_loop(n: usize) -> Self {
        Self::with_drive(
            n,
            Drive::OpenLoop {
                state: ControllerState::default(),
            },
        )
    }

    /// PID-damped trajectory over `n` steps, starting at rest at the origin.
    pub fn damped(n: usize, gains: PidGains) -> Self {
        Self::with_drive(
            n,
            Drive::Damped {
                pid: VelocityPid::new(gains),
            },
        )
    }

    fn with_drive(n: usize, drive: Drive) -> Self {
        TrajectoryRunner {
            drive,
            record: TrajectoryRecord::new(n),
            next: 1,
            wall_contacts: 0,
        }
    }

    /// Last written position.
    pub fn position(&self) -> (f64, f64) {
        self.record.point(self.next - 1)
    }

    /// Index the next `advance` writes.
    pub fn next_step(&self) -> usize {
        self.next
    }

    pub fn is_complete(&self) -> bool {
        self.next >= self.record.len()
    }

    /// Number of steps on which clipping changed the raw position.
    pub fn wall_contacts(&self) -> usize {
        self.wall_contacts
    }

    pub fn controller_state(&self) -> &ControllerState {
        match &self.drive {
            Drive::OpenLoop { state } => state,
            Drive::Damped { pid } => pid.state(),
        }
    }

    /// Advance one step and return the new position.
    ///
    /// `target` is the reference point for this step; the open-loop runner
    /// ignores it. Fails once the record is complete, or when the velocity
    /// or the unclipped position has diverged to a non-finite value.
    pub fn advance(
        &mut self,
        corridor: &Corridor,
        noise: (f64, f64),
        target: (f64, f64),
    ) -> MoulinResult<(f64, f64)> {
        if self.is_complete() {
            return Err(MoulinError::InvalidConfiguration(format!(
                "trajectory record already complete at {} steps",
                self.record.len()
            )));
        }
        let i = self.next;
        let (px, py) = self.position();
        let (noise_x, noise_y) = noise;

        let (vx, vy) = match &mut self.drive {
            Drive::OpenLoop { state } => {
                let v = state.velocity();
                state.x.velocity += noise_x;
                state.y.velocity += noise_y;
                v
            }
            Drive::Damped { pid } => pid.step(target.0 - px, target.1 - py),
        };

        let raw_x = px + vx + noise_x;
        let raw_y = py + vy + noise_y;
        if ![vx, vy, raw_x, raw_y].iter().all(|v| v.is_finite()) {
            return Err(MoulinError::InvalidConfiguration(format!(
                "{} trajectory diverged at step {i}: velocity=({vx}, {vy}), raw position=({raw_x}, {raw_y})",
                self.kind()
            )));
        }

        let x = corridor.enforce(raw_x);
        let y = corridor.enforce(raw_y);
        if x != raw_x || y != raw_y {
            self.wall_contacts += 1;
        }

        self.record.x[i] = x;
        self.record.y[i] = y;
        self.next += 1;
        Ok((x, y))
    }

    fn kind(&self) -> &'static str {
        match self.drive {
            Drive::OpenLoop { .. } => "undamped",
            Drive::Damped { .. } => "damped",
        }
    }

    pub fn record(&self) -> &TrajectoryRecord {
        &self.record
    }

    pub fn into_record(self) -> TrajectoryRecord {
        self.record
    }
}
