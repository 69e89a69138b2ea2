// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — Wall Constraints
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Hard position limits derived from the wall profile.
//! Clipping saturates position only; velocity is left untouched.

use moulin_types::state::BoundaryProfile;

/// Admissible interval for one coordinate at one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corridor {
    pub lower: f64,
    pub upper: f64,
}

impl Corridor {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Corridor at step `i`, inset by `margin` from each wall.
    pub fn at_step(boundary: &BoundaryProfile, i: usize, margin: f64) -> Self {
        Self::new(boundary.left[i] + margin, boundary.right[i] - margin)
    }

    /// Saturate `requested` to the corridor. Never panics: a NaN request
    /// lands on the lower edge.
    pub fn enforce(&self, requested: f64) -> f64 {
        requested.max(self.lower).min(self.upper)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}
