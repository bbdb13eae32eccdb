//! Minimal usage demo: feed-forward commands along a circular trajectory
//!
//! Runs the position controller at 100 Hz over an analytic circle and
//! prints the commanded thrust and body rates. In a real vehicle the
//! command would be summed with a feedback term and handed to the
//! body-rate controller.

use nalgebra::Vector3;

use flatref::config::VehicleConfig;
use flatref::control::PositionController;
use flatref::types::{StateEstimate, TrajectoryPoint};

/// Circle of radius r at angular rate w, constant altitude, heading
/// tangent to the path
fn circle_sample(t: f64, r: f64, w: f64) -> TrajectoryPoint {
    let (s, c) = (w * t).sin_cos();
    TrajectoryPoint {
        position: Vector3::new(r * c, r * s, 2.0),
        velocity: Vector3::new(-r * w * s, r * w * c, 0.0),
        acceleration: Vector3::new(-r * w * w * c, -r * w * w * s, 0.0),
        jerk: Vector3::new(r * w * w * w * s, -r * w * w * w * c, 0.0),
        heading: w * t + std::f64::consts::FRAC_PI_2,
        heading_rate: w,
        heading_acceleration: 0.0,
    }
}

fn main() {
    let config = VehicleConfig::default();
    config.validate().expect("valid vehicle configuration");
    let controller = PositionController::new(config);

    let dt = 0.01;
    let state = StateEstimate::default();

    for i in 0..10 {
        let t = i as f64 * dt;
        let reference = circle_sample(t, 2.0, 1.5);
        let command = controller.run(&state, &reference);

        println!(
            "t={:.2}s  thrust={:.3} m/s²  bodyrates=[{:.4}, {:.4}, {:.4}] rad/s",
            t,
            command.collective_thrust,
            command.bodyrates.x,
            command.bodyrates.y,
            command.bodyrates.z,
        );
    }
}
