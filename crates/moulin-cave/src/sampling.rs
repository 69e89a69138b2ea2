// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — Step Axes
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Depth and angle samples indexed by step.

use ndarray::Array1;

/// Depth of each step [m]: linspace(0, -cave_length, n).
pub fn depth_axis(n: usize, cave_length: f64) -> Array1<f64> {
    Array1::linspace(0.0, -cave_length, n)
}

/// Spiral angle of each step [rad]: linspace(0, theta_max, n).
pub fn angle_axis(n: usize, theta_max: f64) -> Array1<f64> {
    Array1::linspace(0.0, theta_max, n)
}
