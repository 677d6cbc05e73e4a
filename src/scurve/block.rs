//! Planner-facing move descriptor.

/// One queued linear move as the planner sees it.
///
/// The planner owns the geometry (targets, direction unit vectors, junction
/// angles); the kernel reads the fields below and writes `entry_speed_sqr`
/// only when path blending rescales a junction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanBlock {
    /// Length of the move (mm).
    pub millimeters: f32,
    /// Entry speed squared (mm²/s²).
    pub entry_speed_sqr: f32,
    /// Upper bound on the entry speed squared from the planner's own limits
    /// (mm²/s²).
    pub max_entry_speed_sqr: f32,
}

impl PlanBlock {
    pub fn new(millimeters: f32, entry_speed_sqr: f32, max_entry_speed_sqr: f32) -> Self {
        Self {
            millimeters,
            entry_speed_sqr,
            max_entry_speed_sqr,
        }
    }
}
