// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{MoulinError, MoulinResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Left/right wall positions for every step along the shaft.
/// Invariant: `left[i] < right[i]` for every i.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryProfile {
    pub left: Array1<f64>,  // [N]
    pub right: Array1<f64>, // [N]
}

impl BoundaryProfile {
    /// Build a profile from caller data, rejecting empty or inverted corridors.
    pub fn new(left: Array1<f64>, right: Array1<f64>) -> MoulinResult<Self> {
        if left.len() != right.len() {
            return Err(MoulinError::InvalidConfiguration(format!(
                "boundary length mismatch: left={}, right={}",
                left.len(),
                right.len()
            )));
        }
        let profile = BoundaryProfile { left, right };
        profile.check_ordering()?;
        Ok(profile)
    }

    /// Constant corridor `[left, right]` over `n` steps.
    pub fn flat(n: usize, left: f64, right: f64) -> MoulinResult<Self> {
        Self::new(Array1::from_elem(n, left), Array1::from_elem(n, right))
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Verify `left[i] < right[i]` with both walls finite.
    pub fn check_ordering(&self) -> MoulinResult<()> {
        for (i, (&l, &r)) in self.left.iter().zip(self.right.iter()).enumerate() {
            if !l.is_finite() || !r.is_finite() {
                return Err(MoulinError::InvalidConfiguration(format!(
                    "non-finite wall at step {i}: left={l}, right={r}"
                )));
            }
            if !(l < r) {
                return Err(MoulinError::InvalidConfiguration(format!(
                    "inverted corridor at step {i}: left={l}, right={r}"
                )));
            }
        }
        Ok(())
    }

    /// Verify the margin-inset corridor stays non-empty: `right[i] - left[i] > 2 * margin`.
    pub fn check_clearance(&self, margin: f64) -> MoulinResult<()> {
        if margin <= 0.0 {
            return Ok(());
        }
        for (i, (&l, &r)) in self.left.iter().zip(self.right.iter()).enumerate() {
            let width = r - l;
            if width <= 2.0 * margin {
                return Err(MoulinError::DegenerateCorridor {
                    step: i,
                    width,
                    margin,
                });
            }
        }
        Ok(())
    }

    /// Distance from the axis to the nearer wall at step `i`.
    pub fn narrowest_half_width(&self, i: usize) -> f64 {
        self.left[i].abs().min(self.right[i].abs())
    }

    pub fn width(&self, i: usize) -> f64 {
        self.right[i] - self.left[i]
    }
}

/// Target positions for the damped trajectory.
/// `radius` is present only for the depth-adaptive shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePath {
    pub x: Array1<f64>, // [N]
    pub y: Array1<f64>, // [N]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<Array1<f64>>, // [N]
}

impl ReferencePath {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, i: usize) -> (f64, f64) {
        (self.x[i], self.y[i])
    }

    /// Reject NaN or infinite targets, e.g. from walls whose scale overflowed.
    pub fn check_finite(&self) -> MoulinResult<()> {
        if let Some(i) = self
            .x
            .iter()
            .zip(self.y.iter())
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(MoulinError::InvalidConfiguration(format!(
                "non-finite reference target at step {i}: ({}, {})",
                self.x[i], self.y[i]
            )));
        }
        if let Some(radius) = &self.radius {
            if let Some(i) = radius.iter().position(|r| !r.is_finite()) {
                return Err(MoulinError::InvalidConfiguration(format!(
                    "non-finite reference radius at step {i}"
                )));
            }
        }
        Ok(())
    }

    /// Target radius at step `i`, if the path was built from one.
    pub fn radius_at(&self, i: usize) -> Option<f64> {
        self.radius.as_ref().map(|r| r[i])
    }
}

/// Velocity and accumulated error on one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisState {
    pub velocity: f64,
    pub integral: f64,
}

/// Per-trajectory controller state. Owned by exactly one trajectory runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    pub x: AxisState,
    pub y: AxisState,
}

impl ControllerState {
    pub fn velocity(&self) -> (f64, f64) {
        (self.x.velocity, self.y.velocity)
    }

    pub fn integral(&self) -> (f64, f64) {
        (self.x.integral, self.y.integral)
    }
}

/// Position series of one trajectory. Step 0 is the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    pub x: Array1<f64>, // [N]
    pub y: Array1<f64>, // [N]
}

impl TrajectoryRecord {
    /// `n` steps, all at the origin.
    pub fn new(n: usize) -> Self {
        TrajectoryRecord {
            x: Array1::zeros(n),
            y: Array1::zeros(n),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, i: usize) -> (f64, f64) {
        (self.x[i], self.y[i])
    }
}

/// Per-step derived series. One entry per integration step, none for step 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub error_pct: Array1<f64>,      // [N-1]
    pub wall_proximity: Array1<f64>, // [N-1]
}

impl MetricsRecord {
    pub fn len(&self) -> usize {
        self.error_pct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.error_pct.is_empty()
    }
}
