use log::{info, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use scurve::prelude::*;

// Walks a short window of queued moves the way a planner would: optimize the
// junctions, then log the cornering velocities and blend decisions.
fn main() {
    let stdout = ConsoleAppender::builder().build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .unwrap();
    log4rs::init_config(config).unwrap();

    let mut settings = SCurveSettings::default();
    settings.set(Param::JerkXY, 5000.0).unwrap();
    settings.set(Param::AdaptiveEnable, 0.0).unwrap();
    settings.set(Param::BlendTolerance, 0.5).unwrap();
    info!("Lookahead demo with jerk_xy = {}", settings.jerk_xy);

    // Four queued moves: two smooth junctions and one sharp corner.
    let mut blocks = [
        PlanBlock::new(12.0, 2500.0, 2500.0),
        PlanBlock::new(8.0, 2500.0, 2500.0),
        PlanBlock::new(6.0, 1600.0, 1600.0),
        PlanBlock::new(10.0, 1600.0, 1600.0),
    ];
    let angles = [0.0, 3.0, 2.9, 0.9];

    let mut window = LookaheadWindow::new();
    for (block, angle) in blocks.iter_mut().zip(angles) {
        window.push(block, angle).unwrap();
    }
    window.optimize(&settings).unwrap();

    info!(
        "window: {:.1} mm total, peak {:.1} mm/s, sharp corners: {}",
        window.total_distance, window.peak_velocity, window.has_sharp_corners
    );
    for (i, junction) in window.junctions.iter().enumerate() {
        info!(
            "junction {}: angle {:.2} rad, optimal {:.2} mm/s, jerk limit {:.0} mm/s³, blend {}",
            i,
            junction.angle,
            junction.optimal_velocity,
            junction.jerk_limit,
            if junction.blending_enabled {
                "enabled"
            } else {
                "off"
            }
        );
        if junction.blending_enabled {
            info!("  blend radius: {:.3} mm", junction.blend_radius);
        }
    }
}
