//! Junction velocity optimization and path-blend sizing.
//!
//! A junction is the transition between two consecutive queued moves. Its
//! interior angle (π meaning collinear) is supplied by the planner, which
//! owns the move-direction geometry; the kernel derives a jerk-aware
//! cornering velocity from it and, when enabled, a blend-arc radius.

#[cfg(not(feature = "std"))]
use num_traits::Float;

use core::f32::consts::FRAC_PI_4;

use crate::block::PlanBlock;
use crate::profile::SCurveProfile;
use crate::settings::SCurveSettings;
use crate::util::pow2;

/// Jerk scale applied when either adjoining move is shorter than
/// [`SHORT_MOVE_LIMIT`].
pub const SHORT_MOVE_JERK_SCALE: f32 = 0.7;
/// Jerk scale applied when both moves are long and the corner is smooth.
pub const LONG_MOVE_JERK_SCALE: f32 = 1.3;
/// Length below which a move counts as short (mm).
pub const SHORT_MOVE_LIMIT: f32 = 1.0;
/// Length above which a move counts as long (mm).
pub const LONG_MOVE_LIMIT: f32 = 5.0;
/// Cornering velocity floor when the advanced feature set is disabled
/// (mm/s).
pub const BASIC_VELOCITY_FLOOR: f32 = 5.0;
/// Fraction of the shorter adjoining segment a blend arc may occupy.
pub const BLEND_SEGMENT_FRACTION: f32 = 0.25;
/// Smallest usable blend radius (mm).
pub const MIN_BLEND_RADIUS: f32 = 1e-3;
/// Corners at or below this interior angle are too sharp to blend (rad).
pub const BLEND_MIN_ANGLE: f32 = FRAC_PI_4;
/// Window over which neighboring accelerations must transition (s).
pub const TRANSITION_WINDOW: f32 = 0.1;

/// State of one junction between two queued moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Junction<'p> {
    /// Interior angle between the moves (rad, π = collinear).
    pub angle: f32,
    /// Entry-side velocity (mm/s).
    pub entry_velocity: f32,
    /// Exit-side velocity bound (mm/s).
    pub exit_velocity: f32,
    /// Computed maximum safe cornering velocity (mm/s).
    pub optimal_velocity: f32,
    /// Per-junction jerk limit (mm/s³).
    pub jerk_limit: f32,
    /// Blend-arc radius, zero when blending is off (mm).
    pub blend_radius: f32,
    /// Whether this junction gets a blend arc.
    pub blending_enabled: bool,
    /// Profiles of the adjoining moves, when the caller has synthesized them.
    pub entry_profile: Option<&'p SCurveProfile>,
    pub exit_profile: Option<&'p SCurveProfile>,
}

impl<'p> Junction<'p> {
    pub fn new(angle: f32) -> Self {
        Self {
            angle,
            ..Self::default()
        }
    }
}

/// Per-junction jerk limit with the adaptive move-length scaling and the
/// global multiplier applied.
pub fn adaptive_jerk_limit(
    settings: &SCurveSettings,
    angle: f32,
    current: &PlanBlock,
    next: &PlanBlock,
) -> f32 {
    let mut base = settings.jerk_xy;
    if settings.adaptive_enable {
        if current.millimeters < SHORT_MOVE_LIMIT || next.millimeters < SHORT_MOVE_LIMIT {
            base *= SHORT_MOVE_JERK_SCALE;
        } else if current.millimeters > LONG_MOVE_LIMIT
            && next.millimeters > LONG_MOVE_LIMIT
            && angle > settings.junction_angle_threshold
        {
            base *= LONG_MOVE_JERK_SCALE;
        }
    }
    base * settings.jerk_multiplier
}

/// Maximum safe cornering velocity for a junction.
///
/// Starts from min(v_in, v_out) scaled by the junction velocity factor,
/// tapers it for corners below the smooth threshold, caps it by the jerk
/// budget, and floors the result.
pub fn junction_velocity_limit(
    settings: &SCurveSettings,
    angle: f32,
    entry_velocity: f32,
    exit_velocity: f32,
    jerk_limit: f32,
) -> f32 {
    let mut limit = entry_velocity.min(exit_velocity) * settings.junction_velocity_factor;
    if angle < settings.junction_angle_threshold {
        limit *= 0.5 + 0.5 * angle / settings.junction_angle_threshold;
    }

    let jerk_cap = (jerk_limit
        * settings.junction_jerk_multiplier
        * settings.path_blending_tolerance)
        .sqrt();
    limit = limit.min(jerk_cap);

    let floor = if settings.advanced_enable {
        settings.min_jerk_velocity
    } else {
        BASIC_VELOCITY_FLOOR
    };
    limit.max(floor)
}

/// Blend-arc radius: the tightest of the geometric, jerk, chord-deviation,
/// and configured caps.
pub fn blend_radius(
    settings: &SCurveSettings,
    optimal_velocity: f32,
    angle: f32,
    current_len: f32,
    next_len: f32,
) -> f32 {
    let geometric = BLEND_SEGMENT_FRACTION * current_len.min(next_len);
    let blend_jerk = settings.jerk_xy * settings.path_blending_jerk_factor;
    let jerk_bound = pow2(optimal_velocity) / blend_jerk;
    let half_sin = (angle / 2.0).sin();
    let deviation_bound = if half_sin > 0.0 {
        settings.path_blending_tolerance / half_sin
    } else {
        settings.path_blending_radius
    };
    geometric
        .min(jerk_bound)
        .min(deviation_bound)
        .min(settings.path_blending_radius)
}

/// Whether two neighboring accelerations can hand over within the jerk
/// budget, assuming the transition happens across [`TRANSITION_WINDOW`].
pub fn validate_transition(
    current_acceleration: f32,
    next_acceleration: f32,
    jerk_limit: f32,
) -> bool {
    (next_acceleration - current_acceleration).abs() / TRANSITION_WINDOW <= jerk_limit
}

/// Fill a junction record from the two adjoining moves.
///
/// Reads `junction.angle` (planner-supplied) and the moves' entry/max-entry
/// speeds; writes the jerk limit, optimal velocity, and blending decision.
pub fn optimize_junction(
    junction: &mut Junction<'_>,
    settings: &SCurveSettings,
    current: &PlanBlock,
    next: &PlanBlock,
) {
    let jerk_limit = adaptive_jerk_limit(settings, junction.angle, current, next);
    let entry_velocity = current.entry_speed_sqr.max(0.0).sqrt();
    let exit_velocity = next.max_entry_speed_sqr.max(0.0).sqrt();
    let optimal = junction_velocity_limit(
        settings,
        junction.angle,
        entry_velocity,
        exit_velocity,
        jerk_limit,
    );

    junction.entry_velocity = entry_velocity;
    junction.exit_velocity = exit_velocity;
    junction.jerk_limit = jerk_limit;
    junction.optimal_velocity = optimal;

    junction.blending_enabled = false;
    junction.blend_radius = 0.0;
    if settings.path_blending_enable
        && optimal >= settings.path_blending_min_velocity
        && junction.angle > BLEND_MIN_ANGLE
    {
        let radius = blend_radius(
            settings,
            optimal,
            junction.angle,
            current.millimeters,
            next.millimeters,
        );
        if radius > MIN_BLEND_RADIUS {
            junction.blend_radius = radius;
            junction.blending_enabled = true;
        }
    }
}
