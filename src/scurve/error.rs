//! Error types for the motion-profile kernel.
//!
//! All errors are local and non-exceptional: the failing call leaves the
//! touched record unchanged (or flagged invalid) and the caller decides
//! whether to re-plan with relaxed limits or stop motion. The kernel never
//! aborts and never retries.

use thiserror::Error;

/// Errors reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SCurveError {
    /// Distance, acceleration, or jerk was zero or negative at synthesis.
    #[error("invalid kinematic input: distance {distance} mm, acceleration {acceleration} mm/s^2, jerk {jerk} mm/s^3")]
    InvalidInput {
        distance: f32,
        acceleration: f32,
        jerk: f32,
    },

    /// A settings write fell outside the declared range for its parameter.
    /// The stored value is retained.
    #[error("value {value} outside the accepted range [{min}, {max}]")]
    OutOfRange { value: f32, min: f32, max: f32 },

    /// Synthesized phase distances do not sum to the commanded distance
    /// within tolerance.
    #[error("phase distances close to {total} mm, commanded {commanded} mm")]
    ClosureFailure { total: f32, commanded: f32 },

    /// The commanded distance is too short to fit the acceleration and
    /// deceleration envelopes at the given limits.
    #[error("distance {commanded} mm shorter than the {envelope} mm accel/decel envelope")]
    InfeasibleMove { commanded: f32, envelope: f32 },

    /// A lookahead operation was invoked on a window holding no moves.
    #[error("lookahead window holds no moves")]
    EmptyWindow,

    /// The lookahead window is already at capacity.
    #[error("lookahead window is full")]
    WindowFull,
}
