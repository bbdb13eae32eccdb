//! Data records exchanged with the surrounding control process
//!
//! All records are passive value-type snapshots: the estimator produces a
//! [`StateEstimate`], the planner produces a [`TrajectoryPoint`], and the
//! position controller emits one [`ControlCommand`] per tick for the
//! lower-level body-rate controller.

use nalgebra::{UnitQuaternion, Vector3};

/// Quadrotor state estimate, produced by an external estimator
///
/// Read-only input; one snapshot per control tick.
#[derive(Debug, Clone, Default)]
pub struct StateEstimate {
    /// Position [m] (world frame)
    pub position: Vector3<f64>,
    /// Velocity [m/s] (world frame)
    pub velocity: Vector3<f64>,
    /// Orientation (body to world)
    pub orientation: UnitQuaternion<f64>,
    /// Body rates [rad/s] (body frame)
    pub bodyrates: Vector3<f64>,
}

/// One sample of a reference trajectory, produced by an external planner
#[derive(Debug, Clone, Default)]
pub struct TrajectoryPoint {
    /// Desired position [m] (world frame)
    pub position: Vector3<f64>,
    /// Desired velocity [m/s] (world frame)
    pub velocity: Vector3<f64>,
    /// Desired acceleration [m/s²] (world frame)
    pub acceleration: Vector3<f64>,
    /// Desired jerk [m/s³] (world frame)
    pub jerk: Vector3<f64>,
    /// Desired heading ψ [rad]
    pub heading: f64,
    /// Desired heading rate ψ̇ [rad/s]
    pub heading_rate: f64,
    /// Desired heading acceleration ψ̈ [rad/s²]
    pub heading_acceleration: f64,
}

/// Feed-forward command for the lower-level attitude/rate controller
///
/// Produced once per tick by [`crate::control::PositionController::run`].
/// The collective thrust is mass-normalized (specific thrust along the
/// body z-axis, [m/s²]).
#[derive(Debug, Clone, Default)]
pub struct ControlCommand {
    /// Desired orientation (body to world)
    pub orientation: UnitQuaternion<f64>,
    /// Desired mass-normalized collective thrust [m/s²]
    pub collective_thrust: f64,
    /// Desired body rates [rad/s] (body frame)
    pub bodyrates: Vector3<f64>,
    /// Desired angular acceleration [rad/s²] (body frame)
    pub angular_acceleration: Vector3<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_state_is_at_rest() {
        let state = StateEstimate::default();

        assert_relative_eq!(state.position.norm(), 0.0);
        assert_relative_eq!(state.velocity.norm(), 0.0);
        assert_relative_eq!(state.bodyrates.norm(), 0.0);
        assert_relative_eq!(state.orientation.w, 1.0);
    }

    #[test]
    fn test_default_command_is_identity_and_zero() {
        let command = ControlCommand::default();

        assert_relative_eq!(command.collective_thrust, 0.0);
        assert_relative_eq!(command.bodyrates.norm(), 0.0);
        assert_relative_eq!(command.angular_acceleration.norm(), 0.0);
        assert_relative_eq!(command.orientation.w, 1.0);
    }
}
