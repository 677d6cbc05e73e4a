use float_eq::assert_float_eq;
use scurve::prelude::*;

use rand_core::SeedableRng;
use rand_distr::{Distribution, Uniform};
use rand_pcg::Pcg64Mcg;

fn synthesized(
    settings: &SCurveSettings,
    distance: f32,
    v_initial: f32,
    v_final: f32,
    v_max: f32,
    acceleration: f32,
    jerk: f32,
    optimize_tail: bool,
) -> SCurveProfile {
    let mut profile = SCurveProfile::default();
    profile
        .synthesize(
            settings,
            distance,
            v_initial,
            v_final,
            v_max,
            acceleration,
            jerk,
            optimize_tail,
        )
        .expect("profile should synthesize");
    profile
}

/// Invariant checks from the kernel contract: bounded velocity and
/// acceleration, monotone distance, and distance as the integral of
/// velocity (trapezoidal rule, 10^3 samples).
fn check_invariants(profile: &SCurveProfile) {
    assert!(profile.valid);

    let duration = profile.duration();
    let v_bound = profile
        .initial_velocity
        .max(profile.max_velocity)
        .max(profile.final_velocity)
        + 1e-2;
    let a_bound = profile.acceleration + 1e-2;

    let samples = 1000;
    let step = duration / samples as f32;
    let mut trapezoid = 0.0f64;
    let mut previous_velocity = profile.velocity_at(0.0);
    let mut previous_distance = profile.distance_at(0.0);
    assert_float_eq!(previous_distance, 0.0, abs <= 1e-5);

    for k in 1..=samples {
        let time = step * k as f32;
        let velocity = profile.velocity_at(time);
        let acceleration = profile.acceleration_at(time);
        let distance = profile.distance_at(time);

        assert!(velocity >= -1e-3, "negative velocity {velocity} at {time}");
        assert!(velocity <= v_bound, "velocity {velocity} over bound at {time}");
        assert!(
            acceleration.abs() <= a_bound,
            "acceleration {acceleration} over bound at {time}"
        );
        assert!(
            distance >= previous_distance - 1e-4,
            "distance not monotone at {time}"
        );

        trapezoid += 0.5 * (previous_velocity + velocity) as f64 * step as f64;
        assert!(
            (trapezoid - distance as f64).abs() < 1e-2,
            "integral of velocity drifts from distance at {time}: {trapezoid} vs {distance}"
        );

        previous_velocity = velocity;
        previous_distance = distance;
    }

    assert_float_eq!(profile.distance_at(duration), profile.distance, abs <= 1e-3);
}

/// Velocity and distance stay continuous across every phase boundary.
fn check_boundary_continuity(profile: &SCurveProfile) {
    let eps = 1e-6f32;
    for &edge in profile.t_sum.iter().take(6) {
        let v_before = profile.velocity_at(edge - eps);
        let v_after = profile.velocity_at(edge + eps);
        assert!(
            (v_before - v_after).abs() < 1e-2,
            "velocity jump at boundary {edge}: {v_before} vs {v_after}"
        );

        let d_before = profile.distance_at(edge - eps);
        let d_after = profile.distance_at(edge + eps);
        assert!(
            (d_before - d_after).abs() < 1e-2,
            "distance jump at boundary {edge}: {d_before} vs {d_after}"
        );
    }
}

#[test]
// S1: long move from rest to rest with a comfortable cruise.
fn full_profile_with_cruise() {
    let settings = SCurveSettings::default();
    let profile = synthesized(&settings, 100.0, 0.0, 0.0, 50.0, 500.0, 5000.0, false);

    assert!(profile.valid);
    assert_float_eq!(profile.t[0], 0.1, abs <= 1e-5);
    assert_float_eq!(profile.t[2], 0.1, abs <= 1e-5);
    assert_float_eq!(profile.t[4], 0.1, abs <= 1e-5);
    assert_float_eq!(profile.t[6], 0.1, abs <= 1e-5);
    assert!(profile.t[3] > 0.0, "expected a cruise phase");
    assert_float_eq!(profile.duration(), 2.2, abs <= 1e-4);

    // Jerk phase: v = v0 + j t² / 2, a = j t.
    assert_float_eq!(profile.velocity_at(0.05), 6.25, abs <= 1e-3);
    assert_float_eq!(profile.acceleration_at(0.05), 250.0, abs <= 1e-2);
    assert_float_eq!(profile.velocity_at(1.0), 50.0, abs <= 1e-3);
    assert_float_eq!(profile.acceleration_at(1.0), 0.0, abs <= 1e-3);
    assert_float_eq!(profile.velocity_at(profile.duration()), 0.0, abs <= 1e-3);

    check_invariants(&profile);
    check_boundary_continuity(&profile);
}

#[test]
// S2: too short for the symmetric envelope at these limits.
fn short_move_is_infeasible() {
    let settings = SCurveSettings::default();
    let mut profile = SCurveProfile::default();
    let result = profile.synthesize(&settings, 0.5, 0.0, 0.0, 50.0, 500.0, 5000.0, false);

    assert!(matches!(
        result,
        Err(SCurveError::InfeasibleMove { .. })
    ));
    assert!(!profile.valid);
}

#[test]
fn rejects_non_positive_inputs() {
    let settings = SCurveSettings::default();
    let mut profile = SCurveProfile::default();

    for (d, a, j) in [
        (0.0, 500.0, 5000.0),
        (-1.0, 500.0, 5000.0),
        (10.0, 0.0, 5000.0),
        (10.0, 500.0, -3.0),
    ] {
        let result = profile.synthesize(&settings, d, 0.0, 0.0, 50.0, a, j, false);
        assert!(matches!(result, Err(SCurveError::InvalidInput { .. })));
        assert!(!profile.valid);
        assert_float_eq!(profile.velocity_at(0.0), 0.0, abs <= 0.0);
    }
}

#[test]
// S3: stop-optimized tail pinned inside the stop threshold window.
fn tail_optimized_stop_within_threshold_window() {
    let mut settings = SCurveSettings::default();
    settings.set(Param::MinStopVelocity, 60.0).unwrap();

    let profile = synthesized(&settings, 20.0, 30.0, 0.0, 50.0, 500.0, 5000.0, true);

    assert!(profile.valid);
    // The boosted tail uses shorter jerk phases than the symmetric mirror
    // would.
    assert!(profile.t[4] < profile.t[0]);
    assert!(profile.t[4] < profile.acceleration / profile.jerk);
    assert!(profile.decel_jerk > profile.jerk);
    assert!(profile.decel_acceleration <= profile.acceleration + 1e-2);
    // The move genuinely ends at rest and still closes on the commanded
    // distance.
    assert_float_eq!(profile.velocity_at(profile.duration()), 0.0, abs <= 1e-3);
    assert_float_eq!(profile.distance_at(profile.duration()), 20.0, abs <= 1e-3);

    // Deceleration is monotonic: no positive acceleration after cruise.
    let decel_start = profile.t_sum[3];
    let span = profile.duration() - decel_start;
    for k in 0..100 {
        let time = decel_start + span * k as f32 / 100.0;
        assert!(profile.acceleration_at(time) <= 1e-3);
    }

    check_invariants(&profile);
    check_boundary_continuity(&profile);
}

#[test]
fn tail_optimized_stop_without_threshold_window() {
    let mut settings = SCurveSettings::default();
    settings.set(Param::MinStopVelocity, 60.0).unwrap();
    settings.set(Param::StopThresholdDistance, 0.0).unwrap();

    let profile = synthesized(&settings, 20.0, 30.0, 0.0, 50.0, 500.0, 5000.0, true);

    assert!(profile.valid);
    // Whole deceleration shortened directly at the boosted jerk.
    assert_float_eq!(profile.t[4], 0.05, abs <= 1e-5);
    assert_float_eq!(profile.t[5], 0.05, abs <= 1e-5);
    assert_float_eq!(profile.t[6], 0.05, abs <= 1e-5);
    assert_float_eq!(profile.velocity_at(profile.duration()), 0.0, abs <= 1e-3);

    check_invariants(&profile);
}

#[test]
fn tail_optimization_needs_low_final_velocity() {
    let settings = SCurveSettings::default();
    // Final velocity above min_stop_velocity: tail stays symmetric even with
    // the flag raised.
    let profile = synthesized(&settings, 100.0, 40.0, 40.0, 50.0, 500.0, 5000.0, true);
    assert_float_eq!(profile.t[4], profile.t[0], abs <= 1e-6);
    assert_float_eq!(profile.t[5], profile.t[1], abs <= 1e-6);
    assert_float_eq!(profile.decel_jerk, profile.jerk, abs <= 0.0);
}

#[test]
// A common firmware mistake writes the jerk-up distance with a 0.25
// coefficient; the correct term for constant jerk is j·t³/6.
fn jerk_up_distance_uses_one_sixth_coefficient() {
    let settings = SCurveSettings::default();
    let profile = synthesized(&settings, 100.0, 0.0, 0.0, 50.0, 500.0, 5000.0, false);

    let t1 = profile.t[0];
    let correct = profile.initial_velocity * t1 + profile.jerk * t1 * t1 * t1 / 6.0;
    let buggy = profile.initial_velocity * t1 + 0.25 * profile.jerk * t1 * t1 * t1;
    assert_float_eq!(profile.d[0], correct, abs <= 1e-4);
    assert!((profile.d[0] - buggy).abs() > 0.1);

    // Same for a profile entering with speed.
    let mut settings = SCurveSettings::default();
    settings.set(Param::MinStopVelocity, 60.0).unwrap();
    let profile = synthesized(&settings, 20.0, 30.0, 0.0, 50.0, 500.0, 5000.0, true);
    let t1 = profile.t[0];
    let correct = profile.initial_velocity * t1 + profile.jerk * t1 * t1 * t1 / 6.0;
    assert_float_eq!(profile.d[0], correct, abs <= 1e-4);
}

#[test]
// The distance query must cover all seven phases, not stop at cruise.
fn distance_covers_deceleration_phases() {
    let settings = SCurveSettings::default();
    let profile = synthesized(&settings, 100.0, 0.0, 0.0, 50.0, 500.0, 5000.0, false);

    let decel_start = profile.t_sum[3];
    let d_at_decel_start = profile.distance_at(decel_start);
    assert!(d_at_decel_start < profile.distance - 1.0);

    // Distance keeps growing through phases 5-7.
    let mid_decel = decel_start + (profile.duration() - decel_start) / 2.0;
    assert!(profile.distance_at(mid_decel) > d_at_decel_start);
    assert_float_eq!(
        profile.distance_at(profile.duration()),
        profile.distance,
        abs <= 1e-3
    );
    // Clamped past the end.
    assert_float_eq!(
        profile.distance_at(profile.duration() + 1.0),
        profile.distance,
        abs <= 0.0
    );
}

#[test]
fn phase_tags_follow_cumulative_durations() {
    let settings = SCurveSettings::default();
    let profile = synthesized(&settings, 100.0, 0.0, 0.0, 50.0, 500.0, 5000.0, false);

    let phases = [
        SCurvePhase::JerkUp,
        SCurvePhase::AccelConst,
        SCurvePhase::JerkDown,
        SCurvePhase::Cruise,
        SCurvePhase::DecelJerkUp,
        SCurvePhase::DecelConst,
        SCurvePhase::DecelJerkDown,
    ];

    let samples = 500;
    for k in 0..=samples {
        let time = profile.duration() * k as f32 / samples as f32;
        let expected = profile
            .t_sum
            .iter()
            .position(|&edge| time <= edge)
            .map(|i| phases[i])
            .unwrap_or(SCurvePhase::Complete);
        assert_eq!(profile.phase_at(time), expected, "at {time}");
    }

    assert_eq!(profile.phase_at(0.05), SCurvePhase::JerkUp);
    assert_eq!(profile.phase_at(1.0), SCurvePhase::Cruise);
    assert_eq!(
        profile.phase_at(profile.duration() + 0.1),
        SCurvePhase::Complete
    );
    assert_eq!(profile.phase_at(-1.0), SCurvePhase::Complete);
}

#[test]
fn beyond_profile_returns_final_state() {
    let settings = SCurveSettings::default();
    let profile = synthesized(&settings, 100.0, 0.0, 10.0, 50.0, 500.0, 5000.0, false);

    let after = profile.duration() + 0.5;
    assert_float_eq!(profile.velocity_at(after), 10.0, abs <= 0.0);
    assert_float_eq!(profile.acceleration_at(after), 0.0, abs <= 0.0);
    assert_float_eq!(profile.distance_at(after), 100.0, abs <= 0.0);
}

#[test]
fn clamped_jerk_phases_top_out_at_cruise_velocity() {
    let settings = SCurveSettings::default();
    // Entry fast enough that a full jerk ramp would overshoot v_max.
    let profile = synthesized(&settings, 40.0, 10.0, 10.0, 30.0, 300.0, 2000.0, false);

    assert!(profile.valid);
    assert!(profile.t[0] < profile.acceleration / profile.jerk);
    assert_float_eq!(profile.t[1], 0.0, abs <= 0.0);
    // Velocity peaks exactly at the cruise velocity.
    let cruise_mid = profile.t_sum[2] + profile.t[3] / 2.0;
    assert_float_eq!(profile.velocity_at(cruise_mid), 30.0, abs <= 1e-3);

    check_invariants(&profile);
    check_boundary_continuity(&profile);
}

#[test]
fn invariants_hold_across_profile_grid() {
    let settings = SCurveSettings::default();
    let cases: [(f32, f32, f32, f32, f32, f32); 4] = [
        (100.0, 0.0, 0.0, 50.0, 500.0, 5000.0),
        (40.0, 10.0, 10.0, 30.0, 300.0, 2000.0),
        (200.0, 20.0, 20.0, 100.0, 1000.0, 8000.0),
        (60.0, 0.0, 0.0, 20.0, 200.0, 1000.0),
    ];

    for (d, vi, vf, vmax, a, j) in cases {
        let profile = synthesized(&settings, d, vi, vf, vmax, a, j, false);
        check_invariants(&profile);
        check_boundary_continuity(&profile);
    }
}

#[test]
fn randomized_profiles_hold_invariants() {
    let mut rng = Pcg64Mcg::seed_from_u64(42);
    let dist_d = Uniform::new(1.0f32, 200.0);
    let dist_v = Uniform::new(5.0f32, 100.0);
    let dist_a = Uniform::new(50.0f32, 2000.0);
    let dist_j = Uniform::new(500.0f32, 20000.0);

    let settings = SCurveSettings::default();
    let mut profile = SCurveProfile::default();
    let mut valid_count = 0usize;

    for _ in 0..500 {
        let d = dist_d.sample(&mut rng);
        let vmax = dist_v.sample(&mut rng);
        let a = dist_a.sample(&mut rng);
        let j = dist_j.sample(&mut rng);

        match profile.synthesize(&settings, d, 0.0, 0.0, vmax, a, j, false) {
            Ok(()) => {
                valid_count += 1;
                let duration = profile.duration();
                for k in 0..=100 {
                    let time = duration * k as f32 / 100.0;
                    let velocity = profile.velocity_at(time);
                    assert!(velocity >= -1e-3);
                    assert!(velocity <= vmax + 1e-2);
                    assert!(profile.acceleration_at(time).abs() <= a + 1e-2);
                }
                assert_float_eq!(profile.distance_at(duration), d, abs <= 1e-3);
            }
            Err(SCurveError::InfeasibleMove { .. }) | Err(SCurveError::ClosureFailure { .. }) => {
                assert!(!profile.valid);
            }
            Err(other) => panic!("unexpected synthesis error: {other:?}"),
        }
    }

    assert!(valid_count > 100, "sweep produced too few valid profiles");
}

#[test]
fn evaluators_are_safe_for_concurrent_readers() {
    let settings = SCurveSettings::default();
    let profile = synthesized(&settings, 100.0, 0.0, 0.0, 50.0, 500.0, 5000.0, false);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let duration = profile.duration();
                for k in 0..=1000 {
                    let time = duration * k as f32 / 1000.0;
                    let velocity = profile.velocity_at(time);
                    let distance = profile.distance_at(time);
                    assert!(velocity >= -1e-3);
                    assert!(distance <= profile.distance + 1e-3);
                }
            });
        }
    });
}
