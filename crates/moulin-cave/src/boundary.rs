// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — Wall Profiles
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Random left/right wall positions along the shaft.
//!
//! Each step's half-width is sampled independently, with no spatial
//! correlation between neighbouring steps. The whole left series is drawn
//! before the right series.

use moulin_types::config::BoundaryPolicy;
use moulin_types::state::BoundaryProfile;
use ndarray::Array1;
use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

/// Generate walls for `n` steps. Never fails; ordering is checked by the caller.
pub fn generate_boundary<R: Rng + ?Sized>(
    policy: &BoundaryPolicy,
    n: usize,
    rng: &mut R,
) -> BoundaryProfile {
    let profile = match *policy {
        BoundaryPolicy::Gaussian {
            base,
            offset,
            spread,
        } => {
            let left = -base * jitter(n, offset, spread, rng, gaussian_magnitude);
            let right = base * jitter(n, offset, spread, rng, gaussian_magnitude);
            BoundaryProfile { left, right }
        }
        BoundaryPolicy::Uniform {
            base,
            offset,
            spread,
        } => {
            let left = -base * jitter(n, offset, spread, rng, unit_uniform);
            let right = base * jitter(n, offset, spread, rng, unit_uniform);
            BoundaryProfile { left, right }
        }
        BoundaryPolicy::Flat { left, right } => BoundaryProfile {
            left: Array1::from_elem(n, left),
            right: Array1::from_elem(n, right),
        },
    };

    if n > 0 {
        debug!(
            steps = n,
            min_width = (0..n).map(|i| profile.width(i)).fold(f64::INFINITY, f64::min),
            "Generated wall profile"
        );
    }
    profile
}

/// offset + sample * spread, one sample per step.
fn jitter<R: Rng + ?Sized>(
    n: usize,
    offset: f64,
    spread: f64,
    rng: &mut R,
    sample: fn(&mut R) -> f64,
) -> Array1<f64> {
    Array1::from_shape_fn(n, |_| offset + sample(&mut *rng) * spread)
}

fn gaussian_magnitude<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.sample::<f64, _>(StandardNormal).abs()
}

fn unit_uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gaussian_walls_ordered() {
        let mut rng = StdRng::seed_from_u64(42);
        let profile = generate_boundary(&BoundaryPolicy::gaussian(), 1000, &mut rng);
        assert_eq!(profile.len(), 1000);
        assert!(profile.check_ordering().is_ok());
        // |N(0,1)| >= 0, so every half-width is at least base * offset
        for i in 0..1000 {
            assert!(profile.left[i] <= -0.5 + 1e-12, "left[{i}] = {}", profile.left[i]);
            assert!(profile.right[i] >= 0.5 - 1e-12, "right[{i}] = {}", profile.right[i]);
        }
    }

    #[test]
    fn test_uniform_walls_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let profile = generate_boundary(&BoundaryPolicy::uniform(), 500, &mut rng);
        // base 1.5 * [0.8, 1.2) → [1.2, 1.8)
        for i in 0..500 {
            let hw = profile.narrowest_half_width(i);
            assert!((1.2 - 1e-12..=1.8 + 1e-12).contains(&hw), "half-width {hw} at {i}");
        }
    }

    #[test]
    fn test_walls_not_symmetric() {
        let mut rng = StdRng::seed_from_u64(3);
        let profile = generate_boundary(&BoundaryPolicy::uniform(), 50, &mut rng);
        let asymmetric = (0..50).any(|i| (profile.left[i] + profile.right[i]).abs() > 1e-9);
        assert!(asymmetric, "left and right must be sampled independently");
    }

    #[test]
    fn test_flat_draws_nothing() {
        let mut rng_a = StdRng::seed_from_u64(11);
        let mut rng_b = StdRng::seed_from_u64(11);
        let profile = generate_boundary(
            &BoundaryPolicy::Flat {
                left: -1.0,
                right: 1.0,
            },
            5,
            &mut rng_a,
        );
        assert!(profile.left.iter().all(|&l| l == -1.0));
        assert!(profile.right.iter().all(|&r| r == 1.0));
        assert_eq!(rng_a.gen::<u64>(), rng_b.gen::<u64>());
    }

    #[test]
    fn test_same_seed_same_walls() {
        let policy = BoundaryPolicy::gaussian();
        let a = generate_boundary(&policy, 200, &mut StdRng::seed_from_u64(99));
        let b = generate_boundary(&policy, 200, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_base_inverts() {
        let policy = BoundaryPolicy::Uniform {
            base: -1.0,
            offset: 0.5,
            spread: 0.1,
        };
        let profile = generate_boundary(&policy, 4, &mut StdRng::seed_from_u64(1));
        assert!(profile.check_ordering().is_err());
    }
}
