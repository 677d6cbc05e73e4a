//! Point-wise profile queries.
//!
//! All four evaluators are pure reads over a synthesized [`SCurveProfile`]:
//! they touch nothing else, run in constant time, and are safe to call from
//! any number of readers concurrently. Queries on an invalid profile or at
//! negative times return the rest state; queries past the end of the profile
//! return the requested final state.

use crate::profile::{SCurvePhase, SCurveProfile};
use crate::util::integrate;

const PHASES: [SCurvePhase; 7] = [
    SCurvePhase::JerkUp,
    SCurvePhase::AccelConst,
    SCurvePhase::JerkDown,
    SCurvePhase::Cruise,
    SCurvePhase::DecelJerkUp,
    SCurvePhase::DecelConst,
    SCurvePhase::DecelJerkDown,
];

impl SCurveProfile {
    /// Index of the phase containing `time`, or `None` past the profile end.
    #[inline]
    fn phase_index(&self, time: f32) -> Option<usize> {
        self.t_sum.iter().position(|&edge| time <= edge)
    }

    /// Time elapsed within phase `i` at absolute time `time`.
    #[inline]
    fn time_in(&self, i: usize, time: f32) -> f32 {
        if i == 0 {
            time
        } else {
            time - self.t_sum[i - 1]
        }
    }

    /// Velocity at `time` (mm/s). Past the profile this is the requested
    /// final velocity.
    pub fn velocity_at(&self, time: f32) -> f32 {
        if !self.valid || time < 0.0 {
            return 0.0;
        }
        match self.phase_index(time) {
            Some(i) => {
                let (_, velocity, _) = integrate(self.time_in(i, time), self.v[i], self.a[i], self.j[i]);
                velocity
            }
            None => self.final_velocity,
        }
    }

    /// Signed acceleration at `time` (mm/s²); negative while decelerating.
    /// Zero past the profile.
    pub fn acceleration_at(&self, time: f32) -> f32 {
        if !self.valid || time < 0.0 {
            return 0.0;
        }
        match self.phase_index(time) {
            Some(i) => self.a[i] + self.time_in(i, time) * self.j[i],
            None => 0.0,
        }
    }

    /// Distance traveled by `time` (mm), monotone non-decreasing and clamped
    /// to the commanded distance.
    pub fn distance_at(&self, time: f32) -> f32 {
        if !self.valid || time < 0.0 {
            return 0.0;
        }
        match self.phase_index(time) {
            Some(i) => {
                let (dp, _, _) = integrate(self.time_in(i, time), self.v[i], self.a[i], self.j[i]);
                (self.p[i] + dp).min(self.distance)
            }
            None => self.distance,
        }
    }

    /// Active phase at `time`; [`SCurvePhase::Complete`] past the end or on
    /// an invalid profile.
    pub fn phase_at(&self, time: f32) -> SCurvePhase {
        if !self.valid || time < 0.0 {
            return SCurvePhase::Complete;
        }
        match self.phase_index(time) {
            Some(i) => PHASES[i],
            None => SCurvePhase::Complete,
        }
    }
}
