// ─────────────────────────────────────────────────────────────────────
// Moulin Sim — Property-Based Tests (proptest) for moulin-control
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for moulin-control using proptest.
//!
//! Covers: corridor containment under adversarial noise, non-negative
//! tracking error, seeded reproducibility, PID recurrence order.

use moulin_control::pid::pid_update;
use moulin_control::simulation::Simulation;
use moulin_control::telemetry::tracking_error_pct;
use moulin_types::config::{
    BoundaryPolicy, PidGains, ReferencePolicy, SimulationConfig, WallPolicy,
};
use proptest::prelude::*;

fn any_reference() -> impl Strategy<Value = ReferencePolicy> {
    prop_oneof![
        Just(ReferencePolicy::ellipse()),
        (0.2f64..1.5, 0.0f64..0.5, 1u32..6).prop_map(|(radius, amplitude, lobes)| {
            ReferencePolicy::LobedCircle {
                radius,
                amplitude,
                lobes,
            }
        }),
        (0.1f64..=1.0).prop_map(|fraction| ReferencePolicy::DepthAdaptive { fraction }),
    ]
}

fn any_boundary() -> impl Strategy<Value = BoundaryPolicy> {
    prop_oneof![
        Just(BoundaryPolicy::gaussian()),
        Just(BoundaryPolicy::uniform()),
        (0.35f64..2.0).prop_map(|hw| BoundaryPolicy::Flat {
            left: -hw,
            right: hw
        }),
    ]
}

// ── Corridor Containment ─────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// left[i] + margin <= x[i], y[i] <= right[i] - margin for both trajectories,
    /// whatever the noise amplitude.
    #[test]
    fn positions_stay_in_margin_corridor(
        n in 2usize..300,
        noise in prop_oneof![0.0f64..0.2, 1.0f64..1e3],
        kp in 0.0f64..2.0,
        ki in 0.0f64..0.5,
        kd in 0.0f64..1.0,
        margin in 0.0f64..0.15,
        boundary in any_boundary(),
        reference in any_reference(),
        seed in any::<u64>(),
    ) {
        let cfg = SimulationConfig {
            num_points: n,
            noise_amplitude: noise,
            gains: PidGains::new(kp, ki, kd),
            wall: WallPolicy::Margin { margin },
            boundary,
            reference,
            seed: Some(seed),
            ..SimulationConfig::default()
        };
        let result = Simulation::new(cfg).unwrap().run().unwrap();
        let b = &result.boundary;
        for i in 0..n {
            let lo = b.left[i] + margin;
            let hi = b.right[i] - margin;
            for traj in [&result.damped, &result.undamped] {
                let (x, y) = traj.point(i);
                prop_assert!(x >= lo && x <= hi, "x={} outside [{}, {}] at {}", x, lo, hi, i);
                prop_assert!(y >= lo && y <= hi, "y={} outside [{}, {}] at {}", y, lo, hi, i);
            }
        }
    }

    /// Tracking error is never negative or NaN, and proximity never negative
    /// once positions are clipped.
    #[test]
    fn metrics_well_formed(
        n in 2usize..300,
        noise in 0.0f64..0.5,
        reference in any_reference(),
        seed in any::<u64>(),
    ) {
        let cfg = SimulationConfig {
            num_points: n,
            noise_amplitude: noise,
            reference,
            seed: Some(seed),
            ..SimulationConfig::default()
        };
        let result = Simulation::new(cfg).unwrap().run().unwrap();
        prop_assert_eq!(result.metrics.len(), n - 1);
        for &e in result.metrics.error_pct.iter() {
            prop_assert!(e >= 0.0 && e.is_finite(), "bad error {}", e);
        }
        for &p in result.metrics.wall_proximity.iter() {
            prop_assert!(p >= 0.0, "clipped position outside walls: {}", p);
        }
    }

    /// Same configuration and seed → identical series.
    #[test]
    fn seeded_runs_reproducible(
        n in 2usize..400,
        boundary in any_boundary(),
        reference in any_reference(),
        seed in any::<u64>(),
    ) {
        let cfg = SimulationConfig {
            num_points: n,
            boundary,
            reference,
            seed: Some(seed),
            ..SimulationConfig::elliptical()
        };
        let a = Simulation::new(cfg.clone()).unwrap().run().unwrap();
        let b = Simulation::new(cfg).unwrap().run().unwrap();
        prop_assert_eq!(&a.boundary, &b.boundary);
        prop_assert_eq!(&a.reference, &b.reference);
        prop_assert_eq!(&a.damped, &b.damped);
        prop_assert_eq!(&a.undamped, &b.undamped);
        prop_assert_eq!(&a.metrics, &b.metrics);
    }
}

// ── Metric and PID Laws ──────────────────────────────────────────────

proptest! {
    /// Error is zero exactly when the compared points coincide.
    #[test]
    fn error_zero_iff_coincident(
        x in -5.0f64..5.0,
        y in -5.0f64..5.0,
        dx in -1.0f64..1.0,
        dy in -1.0f64..1.0,
        scale in 0.0f64..3.0,
    ) {
        let e = tracking_error_pct((x + dx, y + dy), (x, y), scale);
        prop_assert!(e >= 0.0);
        prop_assert_eq!(e == 0.0, x + dx == x && y + dy == y);
    }

    /// The integral always absorbs the raw error, whatever the gains.
    #[test]
    fn pid_integral_independent_of_gains(
        error in -10.0f64..10.0,
        velocity in -10.0f64..10.0,
        integral in -100.0f64..100.0,
        kp in -5.0f64..5.0,
        ki in -5.0f64..5.0,
        kd in -5.0f64..5.0,
    ) {
        let gains = PidGains::new(kp, ki, kd);
        let (v, i) = pid_update(error, velocity, integral, &gains);
        prop_assert_eq!(i, integral + error);
        let expected = velocity + kp * error + ki * (integral + error) + kd * (-velocity);
        prop_assert!((v - expected).abs() <= 1e-12 * (1.0 + expected.abs()));
    }
}
