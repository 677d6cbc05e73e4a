//! Seven-phase profile record and synthesis.
//!
//! A profile splits a linear move into jerk-up, constant acceleration,
//! jerk-down, cruise, and the three mirrored deceleration phases. Position,
//! velocity, and acceleration stay continuous across phase boundaries; jerk
//! is piecewise constant in {+j, 0, −j}. Synthesis is closed form, never
//! iterates, and never allocates; the record is caller-owned and read-only
//! once synthesized.

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::error::SCurveError;
use crate::settings::SCurveSettings;
use crate::util::{integrate, pow2};

/// Distance closure tolerance (mm).
pub const DISTANCE_TOLERANCE: f32 = 1e-3;

/// Phases of the seven-phase profile, in execution order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SCurvePhase {
    /// Acceleration increasing at +j.
    #[default]
    JerkUp,
    /// Constant acceleration.
    AccelConst,
    /// Acceleration decreasing at −j.
    JerkDown,
    /// Constant velocity.
    Cruise,
    /// Deceleration increasing in magnitude.
    DecelJerkUp,
    /// Constant deceleration.
    DecelConst,
    /// Deceleration decreasing in magnitude.
    DecelJerkDown,
    /// Motion complete.
    Complete,
}

/// A synthesized seven-phase motion profile for a single move.
///
/// `t`, `d` hold the per-phase durations and distances; `t_sum` the
/// cumulative phase edges. `j`, `a`, `v`, `p` hold the signed jerk per phase
/// and the kinematic state at every phase boundary, produced by forward
/// integration so the evaluators can sample any phase in constant time.
#[derive(Debug, Clone, Default)]
pub struct SCurveProfile {
    /// Acceleration-side jerk magnitude (mm/s³).
    pub jerk: f32,
    /// Peak acceleration limit (mm/s²).
    pub acceleration: f32,
    /// Cruise velocity (mm/s).
    pub max_velocity: f32,
    /// Commanded distance (mm).
    pub distance: f32,
    /// Entry velocity (mm/s).
    pub initial_velocity: f32,
    /// Requested exit velocity (mm/s).
    pub final_velocity: f32,

    /// Deceleration-side jerk magnitude; exceeds `jerk` when the tail is
    /// optimized for a final stop.
    pub decel_jerk: f32,
    /// Peak deceleration magnitude reached in phases 5-7 (mm/s²).
    pub decel_acceleration: f32,

    /// Phase durations t1..t7 (s).
    pub t: [f32; 7],
    /// Cumulative phase edges (s).
    pub t_sum: [f32; 7],
    /// Signed jerk per phase (mm/s³).
    pub j: [f32; 7],
    /// Acceleration at each phase boundary (mm/s²).
    pub a: [f32; 8],
    /// Velocity at each phase boundary (mm/s).
    pub v: [f32; 8],
    /// Traveled distance at each phase boundary (mm).
    pub p: [f32; 8],
    /// Phase distances d1..d7 (mm).
    pub d: [f32; 7],

    /// Phase the consumer is currently executing.
    pub current_phase: SCurvePhase,
    /// Time spent in the current phase (s).
    pub time_in_phase: f32,
    /// Raised when the phase distances close on the commanded distance.
    pub valid: bool,
}

impl SCurveProfile {
    /// Total motion duration (s).
    #[inline]
    pub fn duration(&self) -> f32 {
        self.t_sum[6]
    }

    /// Synthesize the seven-phase profile for one move.
    ///
    /// Rejects a non-positive `distance`, `acceleration`, or `jerk` without
    /// touching the record beyond clearing `valid`. Moves too short for the
    /// accel/decel envelope, and profiles whose phase distances do not close
    /// on `distance` within [`DISTANCE_TOLERANCE`], leave `valid` false; the
    /// caller decides whether to re-plan with relaxed limits.
    ///
    /// With `optimize_tail` set and `final_velocity` below the settings'
    /// `min_stop_velocity`, the deceleration phases run at a boosted jerk so
    /// the move reaches rest sooner; see [`SCurveSettings`] for the tuning
    /// knobs.
    #[allow(clippy::too_many_arguments)]
    pub fn synthesize(
        &mut self,
        settings: &SCurveSettings,
        distance: f32,
        initial_velocity: f32,
        final_velocity: f32,
        max_velocity: f32,
        acceleration: f32,
        jerk: f32,
        optimize_tail: bool,
    ) -> Result<(), SCurveError> {
        if distance <= 0.0 || acceleration <= 0.0 || jerk <= 0.0 {
            self.valid = false;
            return Err(SCurveError::InvalidInput {
                distance,
                acceleration,
                jerk,
            });
        }

        *self = Self::default();
        self.jerk = jerk;
        self.acceleration = acceleration;
        self.max_velocity = max_velocity;
        self.distance = distance;
        self.initial_velocity = initial_velocity;
        self.final_velocity = final_velocity;
        self.decel_jerk = jerk;
        self.decel_acceleration = acceleration;
        self.current_phase = SCurvePhase::JerkUp;
        self.time_in_phase = 0.0;

        // Time to reach peak acceleration. When the velocity headroom is too
        // small for the full jerk ramp, shorten both jerk phases so the climb
        // tops out exactly at the cruise velocity instead of overshooting it.
        let mut t_jerk = acceleration / jerk;
        let climb = (max_velocity - initial_velocity).max(0.0);
        if jerk * pow2(t_jerk) > climb {
            t_jerk = (climb / jerk).sqrt();
        }
        self.t[0] = t_jerk;
        self.t[2] = t_jerk;

        // Both jerk phases together add j·t² of velocity; the constant
        // acceleration phase covers the rest of the climb.
        let v_after_jerk_up = initial_velocity + 0.5 * jerk * pow2(t_jerk);
        self.t[1] = if t_jerk < acceleration / jerk {
            0.0
        } else {
            ((max_velocity - v_after_jerk_up - 0.5 * jerk * pow2(t_jerk)) / acceleration).max(0.0)
        };

        // Acceleration envelope distance, closed form.
        let (d1, v_a, a_a) = integrate(self.t[0], initial_velocity, 0.0, jerk);
        let (d2, v_b, a_b) = integrate(self.t[1], v_a, a_a, 0.0);
        let (d3, _, _) = integrate(self.t[2], v_b, a_b, -jerk);
        let d_accel = d1 + d2 + d3;

        let d_decel = if optimize_tail && final_velocity < settings.min_stop_velocity {
            self.plan_tail(settings, distance - d_accel)
        } else {
            // Mirror of the acceleration envelope.
            self.t[4] = self.t[0];
            self.t[5] = self.t[1];
            self.t[6] = self.t[2];
            self.decel_acceleration = jerk * t_jerk;
            d_accel
        };

        let d_cruise = distance - d_accel - d_decel;
        if d_cruise < 0.0 {
            return Err(SCurveError::InfeasibleMove {
                commanded: distance,
                envelope: d_accel + d_decel,
            });
        }
        self.t[3] = if max_velocity > 0.0 {
            d_cruise / max_velocity
        } else {
            0.0
        };

        // Forward-integrate the boundary state through all seven phases.
        // Continuity of velocity and acceleration holds by construction.
        self.j = [
            jerk,
            0.0,
            -jerk,
            0.0,
            -self.decel_jerk,
            0.0,
            self.decel_jerk,
        ];
        self.v[0] = initial_velocity;
        for i in 0..7 {
            let (dp, v_next, a_next) = integrate(self.t[i], self.v[i], self.a[i], self.j[i]);
            self.d[i] = dp;
            self.p[i + 1] = self.p[i] + dp;
            self.v[i + 1] = v_next;
            self.a[i + 1] = a_next;
            self.t_sum[i] = if i == 0 {
                self.t[0]
            } else {
                self.t_sum[i - 1] + self.t[i]
            };
        }

        let total = self.p[7];
        self.valid = (total - distance).abs() < DISTANCE_TOLERANCE;
        if !self.valid {
            return Err(SCurveError::ClosureFailure {
                total,
                commanded: distance,
            });
        }
        Ok(())
    }

    /// Shape the deceleration tail for a move ending at or near rest.
    /// Returns the tail distance. `d_remaining` is what is left of the move
    /// after the acceleration envelope.
    fn plan_tail(&mut self, settings: &SCurveSettings, d_remaining: f32) -> f32 {
        let boosted = self.jerk * settings.final_decel_jerk_multiplier;
        let dv = (self.max_velocity - self.final_velocity).max(0.0);
        let threshold = settings.stop_threshold_distance;

        // Pin the tail inside the stop window when one is configured and the
        // move has room to cruise up to it. A jerk-symmetric tail travels at
        // the mean of its end velocities, so its duration follows from the
        // window length alone; the jerk-phase length then falls out of the
        // velocity-drop quadratic.
        if threshold > 0.0
            && d_remaining > threshold
            && self.max_velocity + self.final_velocity > 0.0
        {
            let t_total = 2.0 * threshold / (self.max_velocity + self.final_velocity);
            let disc = pow2(t_total) - 4.0 * dv / boosted;
            if disc >= 0.0 {
                let t_j = 0.5 * (t_total - disc.sqrt());
                let t_const = t_total - 2.0 * t_j;
                if t_j > 0.0 && t_const >= 0.0 && boosted * t_j <= self.acceleration {
                    return self.set_tail(boosted, t_j, t_const);
                }
            }
            // Window too tight for the jerk budget; shorten directly below.
        }

        // Shorten the whole deceleration at the boosted jerk.
        let mut t_j = self.acceleration / boosted;
        if boosted * pow2(t_j) > dv {
            // The two jerk phases alone would overshoot the velocity drop.
            t_j = (dv / boosted).sqrt();
        }
        let peak = boosted * t_j;
        let t_const = if peak > 0.0 {
            ((dv - boosted * pow2(t_j)) / peak).max(0.0)
        } else {
            0.0
        };
        self.set_tail(boosted, t_j, t_const)
    }

    fn set_tail(&mut self, jerk: f32, t_j: f32, t_const: f32) -> f32 {
        self.decel_jerk = jerk;
        self.decel_acceleration = jerk * t_j;
        self.t[4] = t_j;
        self.t[5] = t_const;
        self.t[6] = t_j;

        // Closed-form tail distance from the cruise velocity down.
        let (d5, v5, a5) = integrate(t_j, self.max_velocity, 0.0, -jerk);
        let (d6, v6, _) = integrate(t_const, v5, a5, 0.0);
        let (d7, _, _) = integrate(t_j, v6, a5, jerk);
        d5 + d6 + d7
    }
}
