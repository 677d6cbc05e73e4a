use gnuplot::Coordinate::Graph;
use gnuplot::{AxesCommon, Caption, Figure};
use scurve::prelude::*;

fn main() {
    let settings = SCurveSettings::default();
    let mut profile = SCurveProfile::default();

    // 100 mm from rest to rest: 50 mm/s, 500 mm/s², 5000 mm/s³.
    profile
        .synthesize(&settings, 100.0, 0.0, 0.0, 50.0, 500.0, 5000.0, false)
        .expect("profile should synthesize");

    println!("Profile duration: {} s", profile.duration());
    println!("Phase durations:  {:?}", profile.t);
    println!("Phase distances:  {:?}", profile.d);

    let mut x_time: Vec<f64> = Vec::new();
    let mut y_vel: Vec<f64> = Vec::new();
    let mut y_acc: Vec<f64> = Vec::new();
    let mut y_dist: Vec<f64> = Vec::new();

    let steps = 1000;
    for k in 0..=steps {
        let time = profile.duration() * k as f32 / steps as f32;
        x_time.push(time as f64);
        y_vel.push(profile.velocity_at(time) as f64);
        y_acc.push(profile.acceleration_at(time) as f64);
        y_dist.push(profile.distance_at(time) as f64);
    }

    let mut fg = Figure::new();
    fg.axes2d()
        .set_title("Seven-phase S-curve motion profile", &[])
        .set_legend(Graph(0.5), Graph(0.9), &[], &[])
        .set_x_label("time in seconds", &[])
        .set_y_label("mm, mm/s, mm/s²", &[])
        .lines(x_time.clone(), y_dist.clone(), &[Caption("Distance")])
        .lines(x_time.clone(), y_vel.clone(), &[Caption("Velocity")])
        .lines(x_time.clone(), y_acc.clone(), &[Caption("Acceleration")]);
    fg.show().unwrap();
}
