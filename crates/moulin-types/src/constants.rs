// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::f64::consts::PI;

/// Guard added to every error-percentage denominator.
pub const ERROR_EPSILON: f64 = 1e-6;

/// Number of simulated steps along the shaft.
pub const NUM_POINTS: usize = 500;

/// Depth of the shaft [m].
pub const CAVE_LENGTH: f64 = 1000.0;

/// Angular span of the spiral descent [rad], five turns.
pub const THETA_MAX: f64 = 10.0 * PI;

/// Per-step noise amplitude [m].
pub const NOISE_AMPLITUDE: f64 = 0.07;

/// Default PID gains.
pub const KP: f64 = 1.0;
pub const KI: f64 = 0.1;
pub const KD: f64 = 0.5;

/// Uniform wall jitter: half-width = base * (offset + U[0,1) * spread).
/// Narrowest half-width is 1.2 m, so an 80 % radius target always fits.
pub const UNIFORM_BASE: f64 = 1.5;
pub const UNIFORM_OFFSET: f64 = 0.8;
pub const UNIFORM_SPREAD: f64 = 0.4;

/// Fraction of the narrowest half-width used as the target radius.
pub const RADIUS_FRACTION: f64 = 0.8;

/// Elliptical run: 1000 steps over a 100 m shaft, ten turns.
pub const ELLIPSE_NUM_POINTS: usize = 1000;
pub const ELLIPSE_CAVE_LENGTH: f64 = 100.0;
pub const ELLIPSE_THETA_MAX: f64 = 20.0 * PI;
pub const ELLIPSE_NOISE_AMPLITUDE: f64 = 0.02;

/// Semi-axes of the elliptical reference [m].
pub const ELLIPSE_A: f64 = 1.5;
pub const ELLIPSE_B: f64 = 1.0;

/// Gains tuned for the elliptical run.
pub const ELLIPSE_KP: f64 = 0.8;
pub const ELLIPSE_KI: f64 = 0.05;
pub const ELLIPSE_KD: f64 = 0.4;

/// Gaussian wall jitter: half-width = base * (offset + |N(0,1)| * spread).
pub const GAUSSIAN_BASE: f64 = 1.0;
pub const GAUSSIAN_OFFSET: f64 = 0.5;
pub const GAUSSIAN_SPREAD: f64 = 0.2;

/// Inset from each wall under the collision-avoidance policy [m].
pub const COLLISION_MARGIN: f64 = 0.1;

/// Seed used by the elliptical preset.
pub const ELLIPSE_SEED: u64 = 42;
