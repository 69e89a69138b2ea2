// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::*;
use crate::error::{MoulinError, MoulinResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level simulation configuration.
/// Maps 1:1 to the JSON presets under `configs/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of steps N along the shaft, including the fixed origin at step 0.
    #[serde(default = "default_num_points")]
    pub num_points: usize,
    /// Depth extent of the shaft [m]. Step 0 sits at z = 0, step N-1 at z = -cave_length.
    #[serde(default = "default_cave_length")]
    pub cave_length: f64,
    /// Angular span swept by the reference path [rad].
    #[serde(default = "default_theta_max")]
    pub theta_max: f64,
    /// Amplitude of the zero-mean Gaussian noise added each step.
    #[serde(default = "default_noise_amplitude")]
    pub noise_amplitude: f64,
    #[serde(default)]
    pub gains: PidGains,
    #[serde(default)]
    pub wall: WallPolicy,
    #[serde(default)]
    pub boundary: BoundaryPolicy,
    #[serde(default)]
    pub reference: ReferencePolicy,
    /// Seed for the run's random source. `None` draws from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_num_points() -> usize {
    NUM_POINTS
}
fn default_cave_length() -> f64 {
    CAVE_LENGTH
}
fn default_theta_max() -> f64 {
    THETA_MAX
}
fn default_noise_amplitude() -> f64 {
    NOISE_AMPLITUDE
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            num_points: NUM_POINTS,
            cave_length: CAVE_LENGTH,
            theta_max: THETA_MAX,
            noise_amplitude: NOISE_AMPLITUDE,
            gains: PidGains::default(),
            wall: WallPolicy::default(),
            boundary: BoundaryPolicy::default(),
            reference: ReferencePolicy::default(),
            seed: None,
        }
    }
}

/// PID gains, applied identically on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        PidGains { kp, ki, kd }
    }

    /// All gains zero: the controller never changes velocity.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite()
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self::new(KP, KI, KD)
    }
}

/// How positions are clipped against the walls.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WallPolicy {
    /// Clip to the raw wall position.
    #[default]
    Contact,
    /// Clip to the wall inset by `margin` on each side.
    Margin { margin: f64 },
}

impl WallPolicy {
    pub fn margin(&self) -> f64 {
        match *self {
            WallPolicy::Contact => 0.0,
            WallPolicy::Margin { margin } => margin,
        }
    }
}

/// Wall generation policy. Half-widths are sampled independently per step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// half-width = base * (offset + |N(0,1)| * spread)
    Gaussian { base: f64, offset: f64, spread: f64 },
    /// half-width = base * (offset + U[0,1) * spread)
    Uniform { base: f64, offset: f64, spread: f64 },
    /// Constant walls; draws nothing from the random source.
    Flat { left: f64, right: f64 },
}

impl BoundaryPolicy {
    pub fn gaussian() -> Self {
        BoundaryPolicy::Gaussian {
            base: GAUSSIAN_BASE,
            offset: GAUSSIAN_OFFSET,
            spread: GAUSSIAN_SPREAD,
        }
    }

    pub fn uniform() -> Self {
        BoundaryPolicy::Uniform {
            base: UNIFORM_BASE,
            offset: UNIFORM_OFFSET,
            spread: UNIFORM_SPREAD,
        }
    }

    fn params(&self) -> [f64; 3] {
        match *self {
            BoundaryPolicy::Gaussian { base, offset, spread }
            | BoundaryPolicy::Uniform { base, offset, spread } => [base, offset, spread],
            BoundaryPolicy::Flat { left, right } => [left, right, 0.0],
        }
    }
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Reference path the damped trajectory is steered toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// (A cos θ, B sin θ) plus per-coordinate noise.
    Ellipse { semi_major: f64, semi_minor: f64 },
    /// r(θ) = radius * (1 + amplitude * sin(lobes * θ)) plus per-coordinate noise.
    LobedCircle {
        radius: f64,
        amplitude: f64,
        lobes: u32,
    },
    /// r[i] = fraction * min(|left[i]|, |right[i]|), tracked along θ[i].
    DepthAdaptive { fraction: f64 },
}

impl ReferencePolicy {
    pub fn ellipse() -> Self {
        ReferencePolicy::Ellipse {
            semi_major: ELLIPSE_A,
            semi_minor: ELLIPSE_B,
        }
    }

    /// Error metric implied by the reference shape.
    pub fn error_mode(&self) -> ErrorMode {
        match self {
            ReferencePolicy::Ellipse { .. } | ReferencePolicy::LobedCircle { .. } => {
                ErrorMode::TrajectoryComparison
            }
            ReferencePolicy::DepthAdaptive { .. } => ErrorMode::ReferenceTracking,
        }
    }
}

impl Default for ReferencePolicy {
    fn default() -> Self {
        ReferencePolicy::DepthAdaptive {
            fraction: RADIUS_FRACTION,
        }
    }
}

/// What the tracking-error percentage compares the damped position against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// ‖damped − undamped‖ / (‖undamped‖ + ε)
    TrajectoryComparison,
    /// ‖damped − reference‖ / (r_ref + ε)
    ReferenceTracking,
}

impl SimulationConfig {
    /// Parameter set of the elliptical, collision-avoiding run.
    pub fn elliptical() -> Self {
        SimulationConfig {
            num_points: ELLIPSE_NUM_POINTS,
            cave_length: ELLIPSE_CAVE_LENGTH,
            theta_max: ELLIPSE_THETA_MAX,
            noise_amplitude: ELLIPSE_NOISE_AMPLITUDE,
            gains: PidGains::new(ELLIPSE_KP, ELLIPSE_KI, ELLIPSE_KD),
            wall: WallPolicy::Margin {
                margin: COLLISION_MARGIN,
            },
            boundary: BoundaryPolicy::gaussian(),
            reference: ReferencePolicy::ellipse(),
            seed: Some(ELLIPSE_SEED),
        }
    }

    /// Load from JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> MoulinResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter that can be rejected before any sampling.
    pub fn validate(&self) -> MoulinResult<()> {
        if self.num_points < 2 {
            return Err(invalid(format!(
                "num_points must be >= 2, got {}",
                self.num_points
            )));
        }
        if !self.gains.is_finite() {
            return Err(invalid(format!("PID gains must be finite: {:?}", self.gains)));
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(invalid(format!(
                "noise_amplitude must be finite and >= 0, got {}",
                self.noise_amplitude
            )));
        }
        if !self.cave_length.is_finite() || !self.theta_max.is_finite() {
            return Err(invalid("cave_length and theta_max must be finite".to_string()));
        }
        let margin = self.wall.margin();
        if !margin.is_finite() || margin < 0.0 {
            return Err(invalid(format!(
                "collision margin must be finite and >= 0, got {margin}"
            )));
        }
        if self.boundary.params().iter().any(|p| !p.is_finite()) {
            return Err(invalid(format!(
                "boundary parameters must be finite: {:?}",
                self.boundary
            )));
        }
        match self.reference {
            ReferencePolicy::Ellipse {
                semi_major,
                semi_minor,
            } => {
                if !semi_major.is_finite() || !semi_minor.is_finite() {
                    return Err(invalid("ellipse semi-axes must be finite".to_string()));
                }
            }
            ReferencePolicy::LobedCircle {
                radius, amplitude, ..
            } => {
                if !radius.is_finite() || !amplitude.is_finite() {
                    return Err(invalid(
                        "lobed circle radius and amplitude must be finite".to_string(),
                    ));
                }
            }
            ReferencePolicy::DepthAdaptive { fraction } => {
                if !(fraction > 0.0 && fraction <= 1.0) {
                    return Err(invalid(format!(
                        "radius fraction must lie in (0, 1], got {fraction}"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn invalid(msg: String) -> MoulinError {
    MoulinError::InvalidConfiguration(msg)
}
