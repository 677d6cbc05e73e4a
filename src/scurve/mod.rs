/*!
# scurve

Seven-phase jerk-limited motion profiles for CNC and 3D-printer motion
controllers.

Given a commanded linear move (distance plus velocity, acceleration, and jerk
limits), the kernel synthesizes a time-parameterized trajectory across seven
phases (jerk-up, constant acceleration, jerk-down, cruise, and the three
mirrored deceleration phases) with continuous position, velocity, and
acceleration and piecewise-constant jerk. Point-wise evaluators sample
velocity, acceleration, traveled distance, and the active phase at any query
time. A junction optimizer derives a jerk-aware cornering velocity (and
optionally a path-blending radius) between consecutive moves, and a lookahead
analyzer tunes per-junction jerk limits over a short window of queued moves.

## Core components

- [`SCurveProfile`](profile::SCurveProfile): the per-move profile record and
  its synthesizer
- [`SCurveSettings`](settings::SCurveSettings): the process-wide tuning
  record with a typed, bounds-checked get/set surface
- [`optimize_junction`](junction::optimize_junction): cornering velocity and
  blend sizing between two queued moves
- [`LookaheadWindow`](lookahead::LookaheadWindow): windowed analysis over up
  to 16 queued moves

## Getting started

```
use scurve::prelude::*;

let settings = SCurveSettings::default();
let mut profile = SCurveProfile::default();

// 100 mm from rest to rest: 50 mm/s, 500 mm/s², 5000 mm/s³.
profile
    .synthesize(&settings, 100.0, 0.0, 0.0, 50.0, 500.0, 5000.0, false)
    .unwrap();

assert!(profile.valid);
let mid = profile.duration() / 2.0;
assert!(profile.velocity_at(mid) > 0.0);
```

## Design constraints

The kernel is built for a no-heap real-time context: no operation blocks,
sleeps, allocates, or performs I/O, and every call is bounded by a small
constant independent of the move. All records are caller-owned; the settings
record is the only long-lived state and is threaded through every entry point
as an explicit handle. Arithmetic is single-precision and closed form, with
no iterative solvers.
*/

#![cfg_attr(not(feature = "std"), no_std)]

pub mod block;
pub mod error;
pub mod evaluate;
pub mod junction;
pub mod lookahead;
pub mod profile;
pub mod settings;
pub mod util;

/// Re-exports of the most commonly used types.
pub mod prelude {
    pub use crate::block::PlanBlock;
    pub use crate::error::SCurveError;
    pub use crate::junction::{
        adaptive_jerk_limit, blend_radius, junction_velocity_limit, optimize_junction,
        validate_transition, Junction,
    };
    pub use crate::lookahead::{BlendSettings, LookaheadWindow, WINDOW_CAPACITY};
    pub use crate::profile::{SCurvePhase, SCurveProfile, DISTANCE_TOLERANCE};
    pub use crate::settings::{Axis, Param, SCurveSettings};
}
