// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — Reference Paths
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Target positions for the damped trajectory, one per step.
//!
//! Explicit curves (ellipse, lobed circle) are evaluated at θ[i] and get
//! independent zero-mean noise on each coordinate: all x noise is drawn
//! before all y noise. The depth-adaptive shape follows 80 % (or the
//! configured fraction) of the narrowest half-width and draws nothing.

use moulin_types::config::ReferencePolicy;
use moulin_types::state::{BoundaryProfile, ReferencePath};
use ndarray::{Array1, Zip};
use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

/// Build the reference path for every step of `theta`.
///
/// `boundary` is only read by the depth-adaptive shape; a changed profile
/// requires regenerating that path.
pub fn generate_reference<R: Rng + ?Sized>(
    policy: &ReferencePolicy,
    theta: &Array1<f64>,
    boundary: &BoundaryProfile,
    noise_amplitude: f64,
    rng: &mut R,
) -> ReferencePath {
    let path = match *policy {
        ReferencePolicy::Ellipse {
            semi_major,
            semi_minor,
        } => {
            let x = theta.mapv(|t| semi_major * t.cos());
            let y = theta.mapv(|t| semi_minor * t.sin());
            noisy_path(x, y, noise_amplitude, rng)
        }
        ReferencePolicy::LobedCircle {
            radius,
            amplitude,
            lobes,
        } => {
            let r = lobed_radius(theta, radius, amplitude, lobes);
            let x = &r * &theta.mapv(f64::cos);
            let y = &r * &theta.mapv(f64::sin);
            noisy_path(x, y, noise_amplitude, rng)
        }
        ReferencePolicy::DepthAdaptive { fraction } => {
            depth_adaptive_path(theta, boundary, fraction)
        }
    };

    debug!(
        steps = path.len(),
        adaptive = path.radius.is_some(),
        "Generated reference path"
    );
    path
}

/// r(θ) = radius * (1 + amplitude * sin(lobes * θ))
pub fn lobed_radius(theta: &Array1<f64>, radius: f64, amplitude: f64, lobes: u32) -> Array1<f64> {
    let m = lobes as f64;
    theta.mapv(|t| radius * (1.0 + amplitude * (m * t).sin()))
}

/// desired_radius[i] = fraction * min(|left[i]|, |right[i]|), placed at θ[i].
pub fn depth_adaptive_path(
    theta: &Array1<f64>,
    boundary: &BoundaryProfile,
    fraction: f64,
) -> ReferencePath {
    let radius = Zip::from(&boundary.left)
        .and(&boundary.right)
        .map_collect(|&l, &r| fraction * l.abs().min(r.abs()));
    let x = &radius * &theta.mapv(f64::cos);
    let y = &radius * &theta.mapv(f64::sin);
    ReferencePath {
        x,
        y,
        radius: Some(radius),
    }
}

fn noisy_path<R: Rng + ?Sized>(
    mut x: Array1<f64>,
    mut y: Array1<f64>,
    noise_amplitude: f64,
    rng: &mut R,
) -> ReferencePath {
    x.mapv_inplace(|v| v + noise_amplitude * rng.sample::<f64, _>(StandardNormal));
    y.mapv_inplace(|v| v + noise_amplitude * rng.sample::<f64, _>(StandardNormal));
    ReferencePath { x, y, radius: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    fn flat(n: usize, half_width: f64) -> BoundaryProfile {
        BoundaryProfile::flat(n, -half_width, half_width).unwrap()
    }

    fn theta(n: usize, max: f64) -> Array1<f64> {
        Array1::linspace(0.0, max, n)
    }

    #[test]
    fn test_noiseless_ellipse_on_curve() {
        let th = theta(64, 2.0 * PI);
        let mut rng = StdRng::seed_from_u64(0);
        let path = generate_reference(
            &ReferencePolicy::Ellipse {
                semi_major: 1.5,
                semi_minor: 1.0,
            },
            &th,
            &flat(64, 2.0),
            0.0,
            &mut rng,
        );
        assert_eq!(path.len(), 64);
        assert!(path.radius.is_none());
        for i in 0..64 {
            let (x, y) = path.point(i);
            let on_curve = (x / 1.5).powi(2) + (y / 1.0).powi(2);
            assert!((on_curve - 1.0).abs() < 1e-12, "step {i}: {on_curve}");
        }
    }

    #[test]
    fn test_ellipse_noise_is_zero_mean() {
        let n = 20_000;
        let th = theta(n, 20.0 * PI);
        let mut rng = StdRng::seed_from_u64(42);
        let path = generate_reference(
            &ReferencePolicy::ellipse(),
            &th,
            &flat(n, 2.0),
            0.02,
            &mut rng,
        );
        let dx: f64 = (0..n).map(|i| path.x[i] - 1.5 * th[i].cos()).sum::<f64>() / n as f64;
        let dy: f64 = (0..n).map(|i| path.y[i] - th[i].sin()).sum::<f64>() / n as f64;
        assert!(dx.abs() < 1e-3, "mean x noise: {dx}");
        assert!(dy.abs() < 1e-3, "mean y noise: {dy}");
    }

    #[test]
    fn test_lobed_radius_extremes() {
        let th = theta(1001, 2.0 * PI);
        let r = lobed_radius(&th, 1.0, 0.25, 4);
        let max = r.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = r.iter().cloned().fold(f64::INFINITY, f64::min);
        assert!((max - 1.25).abs() < 1e-3, "max radius: {max}");
        assert!((min - 0.75).abs() < 1e-3, "min radius: {min}");
    }

    #[test]
    fn test_lobed_circle_zero_amplitude_is_circle() {
        let th = theta(32, 2.0 * PI);
        let mut rng = StdRng::seed_from_u64(5);
        let path = generate_reference(
            &ReferencePolicy::LobedCircle {
                radius: 0.7,
                amplitude: 0.0,
                lobes: 3,
            },
            &th,
            &flat(32, 1.0),
            0.0,
            &mut rng,
        );
        for i in 0..32 {
            let (x, y) = path.point(i);
            assert!(((x * x + y * y).sqrt() - 0.7).abs() < 1e-12);
        }
    }

    #[test]
    fn test_depth_adaptive_uses_narrower_wall() {
        let left = Array1::from_vec(vec![-1.0, -0.5, -2.0]);
        let right = Array1::from_vec(vec![2.0, 1.0, 0.25]);
        let boundary = BoundaryProfile::new(left, right).unwrap();
        let th = Array1::from_vec(vec![0.0, 0.5 * PI, PI]);
        let path = depth_adaptive_path(&th, &boundary, 0.8);
        let radius = path.radius.as_ref().unwrap();
        assert!((radius[0] - 0.8).abs() < 1e-12);
        assert!((radius[1] - 0.4).abs() < 1e-12);
        assert!((radius[2] - 0.2).abs() < 1e-12);
        assert!((path.x[0] - 0.8).abs() < 1e-12 && path.y[0].abs() < 1e-12);
        assert!(path.x[1].abs() < 1e-12 && (path.y[1] - 0.4).abs() < 1e-12);
        assert!((path.x[2] + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_depth_adaptive_draws_nothing() {
        let th = theta(10, PI);
        let mut rng_a = StdRng::seed_from_u64(8);
        let mut rng_b = StdRng::seed_from_u64(8);
        generate_reference(
            &ReferencePolicy::default(),
            &th,
            &flat(10, 1.0),
            0.5,
            &mut rng_a,
        );
        assert_eq!(rng_a.gen::<u64>(), rng_b.gen::<u64>());
    }
}
