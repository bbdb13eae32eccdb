//! # flatref
//!
//! Feed-forward reference generation for quadrotor position control.
//!
//! Given the vehicle's current state estimate and one sample of a desired
//! trajectory, this library computes the desired orientation, collective
//! thrust, body rates and angular acceleration that a lower-level
//! attitude/rate controller must track. The computation exploits the
//! differential-flatness property of quadrotor dynamics subject to rotor
//! drag:
//!
//! - Faessler, Franchi, Scaramuzza: "Differential Flatness of Quadrotor
//!   Dynamics Subject to Rotor Drag for Accurate Tracking of High-Speed
//!   Trajectories" (RA-L 2018)
//! - Faessler, Fontana, Forster, Scaramuzza: "Thrust Mixing, Saturation,
//!   and Body-Rate Control for Accurate Aggressive Quadrotor Flight"
//!
//! ## Modules
//!
//! - [`math`]: frame and quaternion utilities
//! - [`types`]: state estimate, trajectory sample and command records
//! - [`config`]: injected vehicle parameters (mass, gravity, rotor drag)
//! - [`control`]: the reference-input pipeline and the position controller
//!
//! The tick path is a pure function of its two input snapshots: no I/O,
//! no heap allocation, no retained state between calls.

pub mod config;
pub mod control;
pub mod math;
pub mod types;

// Common type aliases
use nalgebra::{Matrix3, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f64>;

/// Unit quaternion type for rotations
pub type Quat = UnitQuaternion<f64>;

/// Standard gravity magnitude [m/s²]
pub const GRAVITY: f64 = 9.81;

/// Gravity vector in the world frame (z-up convention, pointing down)
pub fn gravity_world() -> Vec3 {
    Vec3::new(0.0, 0.0, -GRAVITY)
}
