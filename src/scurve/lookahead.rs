//! Multi-block lookahead analysis.
//!
//! The analyzer walks a short window of upcoming moves, runs the junction
//! optimizer on every adjacent pair, and then tunes the per-junction jerk
//! limits globally: a long window free of sharp corners earns a boost, a
//! window containing sharp corners gets damped. With path blending enabled
//! it also rescales entry speeds on both sides of each blendable junction,
//! the only write the kernel ever performs on a planner move.

#[cfg(not(feature = "std"))]
use num_traits::Float;

use arrayvec::ArrayVec;

use crate::block::PlanBlock;
use crate::error::SCurveError;
use crate::junction::{optimize_junction, Junction};
use crate::settings::SCurveSettings;

/// Moves a window can hold.
pub const WINDOW_CAPACITY: usize = 16;
/// Junctions between them.
pub const JUNCTION_CAPACITY: usize = WINDOW_CAPACITY - 1;

/// Window distance above which a sharp-corner-free window earns a jerk boost
/// (mm).
pub const BOOST_DISTANCE: f32 = 10.0;
/// Jerk scale for a long window without sharp corners.
pub const CLEAN_WINDOW_JERK_SCALE: f32 = 1.2;
/// Jerk scale when the window contains sharp corners.
pub const SHARP_WINDOW_JERK_SCALE: f32 = 0.8;

/// Blending parameters frozen at optimization time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendSettings {
    pub tolerance: f32,
    pub max_radius: f32,
    pub min_velocity: f32,
    pub jerk_factor: f32,
    pub lookahead_blocks: u8,
}

impl BlendSettings {
    pub fn snapshot(settings: &SCurveSettings) -> Self {
        Self {
            tolerance: settings.path_blending_tolerance,
            max_radius: settings.path_blending_radius,
            min_velocity: settings.path_blending_min_velocity,
            jerk_factor: settings.path_blending_jerk_factor,
            lookahead_blocks: settings.path_blending_lookahead,
        }
    }
}

/// Ordered view over the next few queued moves.
///
/// Caller-scoped and transient: build it, run [`analyze`] or [`optimize`],
/// read the junctions back, drop it.
///
/// [`analyze`]: LookaheadWindow::analyze
/// [`optimize`]: LookaheadWindow::optimize
#[derive(Debug, Default)]
pub struct LookaheadWindow<'w> {
    moves: ArrayVec<&'w mut PlanBlock, WINDOW_CAPACITY>,
    /// One junction per adjacent move pair.
    pub junctions: ArrayVec<Junction<'w>, JUNCTION_CAPACITY>,
    /// Sum of the window's move lengths (mm).
    pub total_distance: f32,
    /// Highest max-entry speed seen in the window (mm/s).
    pub peak_velocity: f32,
    /// Whether any junction angle falls below the smooth threshold.
    pub has_sharp_corners: bool,
    /// Snapshot taken when [`optimize`](LookaheadWindow::optimize) ran with
    /// blending enabled.
    pub blend_settings: Option<BlendSettings>,
}

impl<'w> LookaheadWindow<'w> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Append a move to the window. `junction_angle` is the interior angle
    /// between this move and the previous one (rad); it is ignored for the
    /// first move.
    pub fn push(
        &mut self,
        block: &'w mut PlanBlock,
        junction_angle: f32,
    ) -> Result<(), SCurveError> {
        if self.moves.is_full() {
            return Err(SCurveError::WindowFull);
        }
        if !self.moves.is_empty() {
            self.junctions.push(Junction::new(junction_angle));
        }
        self.moves.push(block);
        Ok(())
    }

    /// First pass: window aggregates and per-junction optimization.
    pub fn analyze(&mut self, settings: &SCurveSettings) -> Result<(), SCurveError> {
        if self.moves.is_empty() {
            return Err(SCurveError::EmptyWindow);
        }

        self.total_distance = self.moves.iter().map(|m| m.millimeters).sum();
        self.peak_velocity = self
            .moves
            .iter()
            .map(|m| m.max_entry_speed_sqr.max(0.0).sqrt())
            .fold(0.0, f32::max);

        self.has_sharp_corners = false;
        for i in 0..self.junctions.len() {
            let (current, next) = (&*self.moves[i], &*self.moves[i + 1]);
            optimize_junction(&mut self.junctions[i], settings, current, next);
            if self.junctions[i].angle < settings.junction_angle_threshold {
                self.has_sharp_corners = true;
            }
        }
        Ok(())
    }

    /// Second pass: window-global jerk scaling, then blending.
    pub fn optimize(&mut self, settings: &SCurveSettings) -> Result<(), SCurveError> {
        self.analyze(settings)?;

        if self.total_distance > BOOST_DISTANCE && !self.has_sharp_corners {
            for junction in &mut self.junctions {
                junction.jerk_limit *= CLEAN_WINDOW_JERK_SCALE;
            }
        } else if self.has_sharp_corners {
            for junction in &mut self.junctions {
                junction.jerk_limit *= SHARP_WINDOW_JERK_SCALE;
            }
        }

        self.blend_settings = None;
        if settings.path_blending_enable {
            let blend = BlendSettings::snapshot(settings);
            self.apply_blending(&blend);
            self.blend_settings = Some(blend);
        }
        Ok(())
    }

    /// Scale entry speeds on both sides of every blendable junction.
    fn apply_blending(&mut self, blend: &BlendSettings) {
        for i in 0..self.junctions.len() {
            if !self.junctions[i].blending_enabled {
                continue;
            }
            self.moves[i].entry_speed_sqr *= blend.jerk_factor;
            self.moves[i + 1].entry_speed_sqr *= blend.jerk_factor;
        }
    }
}
