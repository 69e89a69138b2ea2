// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — Descent Telemetry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Per-step tracking error and wall proximity of the damped trajectory.
//! One entry per integration step; step 0 has none.

use moulin_types::config::ErrorMode;
use moulin_types::constants::ERROR_EPSILON;
use moulin_types::state::{BoundaryProfile, MetricsRecord, ReferencePath};
use ndarray::Array1;

/// ‖position − compared‖ / (scale + ε) × 100. Always >= 0 and finite for finite input.
pub fn tracking_error_pct(position: (f64, f64), compared: (f64, f64), scale: f64) -> f64 {
    let distance = (position.0 - compared.0).hypot(position.1 - compared.1);
    distance / (scale.abs() + ERROR_EPSILON) * 100.0
}

/// Signed distance from `x` to the nearer wall. Negative means outside; reported as is.
pub fn wall_proximity(x: f64, left: f64, right: f64) -> f64 {
    (x - left).min(right - x)
}

/// Collects both metric channels during the integration pass.
#[derive(Debug, Clone)]
pub struct TelemetrySuite {
    mode: ErrorMode,
    error_pct: Vec<f64>,
    wall_proximity: Vec<f64>,
}

impl TelemetrySuite {
    pub fn new(mode: ErrorMode, capacity: usize) -> Self {
        Self {
            mode,
            error_pct: Vec::with_capacity(capacity),
            wall_proximity: Vec::with_capacity(capacity),
        }
    }

    pub fn mode(&self) -> ErrorMode {
        self.mode
    }

    /// Record step `i` from the positions just written for that step.
    ///
    /// In reference-tracking mode the scale is the path's target radius.
    /// A path built without one (an explicit curve handed to a tracking
    /// suite) is scaled by the norm of its target point instead.
    pub fn record(
        &mut self,
        i: usize,
        damped: (f64, f64),
        undamped: (f64, f64),
        reference: &ReferencePath,
        boundary: &BoundaryProfile,
    ) {
        let error = match self.mode {
            ErrorMode::TrajectoryComparison => {
                tracking_error_pct(damped, undamped, undamped.0.hypot(undamped.1))
            }
            ErrorMode::ReferenceTracking => {
                let scale = reference
                    .radius_at(i)
                    .unwrap_or_else(|| reference.x[i].hypot(reference.y[i]));
                tracking_error_pct(damped, reference.point(i), scale)
            }
        };
        self.error_pct.push(error);
        self.wall_proximity
            .push(wall_proximity(damped.0, boundary.left[i], boundary.right[i]));
    }

    pub fn len(&self) -> usize {
        self.error_pct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.error_pct.is_empty()
    }

    pub fn latest_error(&self) -> Option<f64> {
        self.error_pct.last().copied()
    }

    pub fn finish(self) -> MetricsRecord {
        MetricsRecord {
            error_pct: Array1::from_vec(self.error_pct),
            wall_proximity: Array1::from_vec(self.wall_proximity),
        }
    }
}
