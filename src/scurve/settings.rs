//! Runtime-adjustable kernel configuration.
//!
//! One record per process, passed as an explicit handle to every entry point
//! so the kernel stays testable in parallel. The expected deployment is a
//! single writer (the command handler) and many readers (the motion tick);
//! every field is a scalar, so no multi-field transaction is required.
//!
//! All writes go through [`SCurveSettings::set`] or
//! [`SCurveSettings::update_axis_jerk`], which enforce the per-parameter
//! ranges. An out-of-range write is rejected and the stored value retained.

use crate::error::SCurveError;

/// Largest accepted per-axis jerk limit (mm/s³).
pub const JERK_MAX: f32 = 10000.0;

/// Axis groups sharing a jerk limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
    E,
}

/// Parameter tags for the typed get/set surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    JerkXY,
    JerkZ,
    JerkE,
    JerkMultiplier,
    CornerFactor,
    AdaptiveEnable,
    MinJerkVelocity,
    AdvancedEnable,
    JunctionVelocityFactor,
    JunctionJerkMultiplier,
    SmoothJunctionAngle,
    EnablePathBlending,
    BlendTolerance,
    MaxBlendRadius,
    MinBlendVelocity,
    BlendJerkFactor,
    LookaheadBlocks,
    MinStopVelocity,
    FinalDecelJerkMultiplier,
    StopThresholdDistance,
}

/// Runtime S-curve settings.
///
/// Units are kernel-internal: mm, mm/s, mm/s³, rad. Conversions to and from
/// operator units (mm/min, degrees) happen at the boundary, see
/// [`crate::util`].
#[derive(Debug, Clone, PartialEq)]
pub struct SCurveSettings {
    /// XY axis-group jerk limit (mm/s³).
    pub jerk_xy: f32,
    /// Z axis jerk limit (mm/s³).
    pub jerk_z: f32,
    /// E (extruder/rotary) axis jerk limit (mm/s³).
    pub jerk_e: f32,
    /// Global jerk scale.
    pub jerk_multiplier: f32,
    /// Jerk scale for corners sharper than 90°.
    pub corner_factor: f32,
    /// Enables per-move jerk scaling in the junction optimizer.
    pub adaptive_enable: bool,
    /// Velocity floor for jerk limiting (mm/s).
    pub min_jerk_velocity: f32,
    /// Enables the advanced junction/blending feature set. When disabled the
    /// junction optimizer falls back to a fixed 5 mm/s velocity floor.
    pub advanced_enable: bool,

    /// Multiplier on min(v_in, v_out) at a junction.
    pub junction_velocity_factor: f32,
    /// Jerk scale applied at junctions.
    pub junction_jerk_multiplier: f32,
    /// Interior angle at and above which a corner counts as smooth (rad).
    pub junction_angle_threshold: f32,

    /// Enables path blending.
    pub path_blending_enable: bool,
    /// Maximum chord deviation of a blend arc (mm).
    pub path_blending_tolerance: f32,
    /// Blend radius cap (mm).
    pub path_blending_radius: f32,
    /// Velocity floor below which blending stays off (mm/s).
    pub path_blending_min_velocity: f32,
    /// Jerk scale for blended paths.
    pub path_blending_jerk_factor: f32,
    /// Lookahead window size in blocks.
    pub path_blending_lookahead: u8,

    /// Final velocities below this count as "ending at rest" (mm/s).
    pub min_stop_velocity: f32,
    /// Jerk boost applied to the deceleration tail of a final stop.
    pub final_decel_jerk_multiplier: f32,
    /// Tail distance that receives the rapid-stop treatment (mm).
    pub stop_threshold_distance: f32,
}

impl Default for SCurveSettings {
    fn default() -> Self {
        Self {
            jerk_xy: 150.0,
            jerk_z: 80.0,
            jerk_e: 120.0,
            jerk_multiplier: 1.0,
            corner_factor: 0.7,
            adaptive_enable: true,
            min_jerk_velocity: 5.0,
            advanced_enable: true,

            junction_velocity_factor: 1.2,
            junction_jerk_multiplier: 0.8,
            junction_angle_threshold: 2.617, // 150 degrees

            path_blending_enable: true,
            path_blending_tolerance: 0.02,
            path_blending_radius: 2.0,
            path_blending_min_velocity: 10.0,
            path_blending_jerk_factor: 0.6,
            path_blending_lookahead: 8,

            min_stop_velocity: 30.0,
            final_decel_jerk_multiplier: 2.0,
            stop_threshold_distance: 5.0,
        }
    }
}

fn in_range(value: f32, min: f32, max: f32) -> Result<f32, SCurveError> {
    if value >= min && value <= max {
        Ok(value)
    } else {
        Err(SCurveError::OutOfRange { value, min, max })
    }
}

fn positive_up_to(value: f32, max: f32) -> Result<f32, SCurveError> {
    if value > 0.0 && value <= max {
        Ok(value)
    } else {
        Err(SCurveError::OutOfRange {
            value,
            min: 0.0,
            max,
        })
    }
}

impl SCurveSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the documented defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Bounds-checked tagged write. Booleans accept any value and treat
    /// values above zero as true, matching the operator-facing convention.
    pub fn set(&mut self, param: Param, value: f32) -> Result<(), SCurveError> {
        match param {
            Param::JerkXY => self.jerk_xy = positive_up_to(value, JERK_MAX)?,
            Param::JerkZ => self.jerk_z = positive_up_to(value, JERK_MAX)?,
            Param::JerkE => self.jerk_e = positive_up_to(value, JERK_MAX)?,
            Param::JerkMultiplier => self.jerk_multiplier = in_range(value, 0.1, 5.0)?,
            Param::CornerFactor => self.corner_factor = in_range(value, 0.1, 1.0)?,
            Param::AdaptiveEnable => self.adaptive_enable = value > 0.0,
            Param::MinJerkVelocity => {
                self.min_jerk_velocity = in_range(value, 0.0, f32::INFINITY)?
            }
            Param::AdvancedEnable => self.advanced_enable = value > 0.0,
            Param::JunctionVelocityFactor => {
                self.junction_velocity_factor = in_range(value, 0.5, 2.0)?
            }
            Param::JunctionJerkMultiplier => {
                self.junction_jerk_multiplier = in_range(value, 0.1, 2.0)?
            }
            Param::SmoothJunctionAngle => {
                self.junction_angle_threshold = in_range(value, 0.0, core::f32::consts::PI)?
            }
            Param::EnablePathBlending => self.path_blending_enable = value > 0.0,
            Param::BlendTolerance => self.path_blending_tolerance = in_range(value, 0.001, 1.0)?,
            Param::MaxBlendRadius => self.path_blending_radius = in_range(value, 0.1, 10.0)?,
            Param::MinBlendVelocity => {
                self.path_blending_min_velocity = in_range(value, 1.0, 100.0)?
            }
            Param::BlendJerkFactor => self.path_blending_jerk_factor = in_range(value, 0.1, 1.0)?,
            Param::LookaheadBlocks => {
                self.path_blending_lookahead = in_range(value, 3.0, 16.0)? as u8
            }
            Param::MinStopVelocity => self.min_stop_velocity = in_range(value, 0.1, 1000.0)?,
            Param::FinalDecelJerkMultiplier => {
                self.final_decel_jerk_multiplier = in_range(value, 0.1, 5.0)?
            }
            Param::StopThresholdDistance => {
                self.stop_threshold_distance = in_range(value, 0.0, 50.0)?
            }
        }
        Ok(())
    }

    /// Tagged read. Booleans map to 1.0/0.0.
    pub fn get(&self, param: Param) -> f32 {
        match param {
            Param::JerkXY => self.jerk_xy,
            Param::JerkZ => self.jerk_z,
            Param::JerkE => self.jerk_e,
            Param::JerkMultiplier => self.jerk_multiplier,
            Param::CornerFactor => self.corner_factor,
            Param::AdaptiveEnable => f32::from(self.adaptive_enable as u8),
            Param::MinJerkVelocity => self.min_jerk_velocity,
            Param::AdvancedEnable => f32::from(self.advanced_enable as u8),
            Param::JunctionVelocityFactor => self.junction_velocity_factor,
            Param::JunctionJerkMultiplier => self.junction_jerk_multiplier,
            Param::SmoothJunctionAngle => self.junction_angle_threshold,
            Param::EnablePathBlending => f32::from(self.path_blending_enable as u8),
            Param::BlendTolerance => self.path_blending_tolerance,
            Param::MaxBlendRadius => self.path_blending_radius,
            Param::MinBlendVelocity => self.path_blending_min_velocity,
            Param::BlendJerkFactor => self.path_blending_jerk_factor,
            Param::LookaheadBlocks => f32::from(self.path_blending_lookahead),
            Param::MinStopVelocity => self.min_stop_velocity,
            Param::FinalDecelJerkMultiplier => self.final_decel_jerk_multiplier,
            Param::StopThresholdDistance => self.stop_threshold_distance,
        }
    }

    /// Bind an axis-specific jerk limit from an external axis table.
    pub fn update_axis_jerk(&mut self, axis: Axis, jerk: f32) -> Result<(), SCurveError> {
        let jerk = positive_up_to(jerk, JERK_MAX)?;
        match axis {
            Axis::X | Axis::Y => self.jerk_xy = jerk,
            Axis::Z => self.jerk_z = jerk,
            Axis::E => self.jerk_e = jerk,
        }
        Ok(())
    }
}
