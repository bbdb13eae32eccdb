//! Position controller
//!
//! Stateless per-tick orchestrator: builds one [`ReferenceInputs`] from the
//! state estimate and the trajectory sample, runs its pipeline, and packages
//! the resulting feed-forward quadruple into a [`ControlCommand`].
//!
//! This layer is pure feed-forward — it adds no position/velocity error
//! term. A production system sums the returned command with a separate
//! feedback controller after `run()` returns.

use crate::config::VehicleConfig;
use crate::control::ReferenceInputs;
use crate::math::renormalized;
use crate::types::{ControlCommand, StateEstimate, TrajectoryPoint};

/// High-level position controller
///
/// Holds only the injected vehicle configuration; every call to
/// [`PositionController::run`] is independent, so concurrent invocation
/// from threads owning their snapshots is safe.
#[derive(Debug, Clone)]
pub struct PositionController {
    /// Injected vehicle parameters (mass, gravity, rotor drag)
    config: VehicleConfig,
}

impl PositionController {
    /// Create a controller with the given vehicle configuration
    pub fn new(config: VehicleConfig) -> Self {
        Self { config }
    }

    /// Injected vehicle configuration
    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Compute the feed-forward command tracking one trajectory sample
    ///
    /// Preconditions: all numeric fields finite (out of contract
    /// otherwise); the input orientation is defensively renormalized. Never
    /// fails — every geometric degeneracy is absorbed by the reference
    /// pipeline's deterministic fallbacks.
    pub fn run(
        &self,
        state_estimate: &StateEstimate,
        reference_state: &TrajectoryPoint,
    ) -> ControlCommand {
        self.compute_reference_inputs(state_estimate, reference_state)
    }

    /// Construct, compute and package one tick's reference inputs
    fn compute_reference_inputs(
        &self,
        state_estimate: &StateEstimate,
        reference_state: &TrajectoryPoint,
    ) -> ControlCommand {
        let mut state = state_estimate.clone();
        state.orientation = renormalized(&state.orientation);

        let mut inputs = ReferenceInputs::new(
            state,
            reference_state.clone(),
            self.config.drag.clone(),
            self.config.gravity,
        );
        inputs.compute();

        ControlCommand {
            orientation: inputs.orientation(),
            collective_thrust: inputs.collective_thrust(),
            bodyrates: inputs.bodyrates(),
            angular_acceleration: inputs.angular_acceleration(),
        }
    }
}

impl Default for PositionController {
    fn default() -> Self {
        Self::new(VehicleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use crate::GRAVITY;

    #[test]
    fn test_hover_command() {
        let controller = PositionController::default();

        let command = controller.run(&StateEstimate::default(), &TrajectoryPoint::default());

        assert_relative_eq!(command.collective_thrust, GRAVITY, epsilon = 1e-12);
        assert_relative_eq!(command.orientation.w, 1.0, epsilon = 1e-12);
        assert_relative_eq!(command.bodyrates.norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(command.angular_acceleration.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let controller = PositionController::default();
        let state = StateEstimate {
            velocity: Vector3::new(1.0, -0.5, 0.2),
            ..Default::default()
        };
        let reference = TrajectoryPoint {
            acceleration: Vector3::new(1.5, 0.3, -0.4),
            jerk: Vector3::new(0.2, -0.1, 0.0),
            heading: 0.4,
            heading_rate: 0.1,
            ..Default::default()
        };

        let first = controller.run(&state, &reference);
        let second = controller.run(&state, &reference);

        assert_eq!(first.collective_thrust, second.collective_thrust);
        assert_eq!(first.bodyrates, second.bodyrates);
        assert_eq!(first.angular_acceleration, second.angular_acceleration);
        assert_eq!(
            first.orientation.quaternion().coords,
            second.orientation.quaternion().coords
        );
    }

    #[test]
    fn test_command_copies_pipeline_outputs_verbatim() {
        let controller = PositionController::default();
        let state = StateEstimate::default();
        let reference = TrajectoryPoint {
            acceleration: Vector3::new(2.0, 0.0, 0.0),
            heading: 0.3,
            ..Default::default()
        };

        let command = controller.run(&state, &reference);

        let mut inputs = ReferenceInputs::new(
            state,
            reference,
            controller.config().drag.clone(),
            controller.config().gravity,
        );
        inputs.compute();

        assert_eq!(command.collective_thrust, inputs.collective_thrust());
        assert_eq!(command.bodyrates, inputs.bodyrates());
        assert_eq!(
            command.orientation.quaternion().coords,
            inputs.orientation().quaternion().coords
        );
    }

    #[test]
    fn test_output_quaternion_is_unit_norm() {
        let controller = PositionController::default();
        let reference = TrajectoryPoint {
            acceleration: Vector3::new(-3.0, 4.0, 2.0),
            heading: -2.1,
            ..Default::default()
        };

        let command = controller.run(&StateEstimate::default(), &reference);

        let q = command.orientation;
        let norm = (q.w.powi(2) + q.i.powi(2) + q.j.powi(2) + q.k.powi(2)).sqrt();
        assert_relative_eq!(norm, 1.0, epsilon = 1e-9);
    }
}
