//! Reference inputs
//!
//! The computational core of the position controller: from one state
//! estimate and one trajectory sample, build a singularity-robust
//! orthonormal body-frame basis and derive the feed-forward quadruple
//! {orientation, collective thrust, body rates, angular acceleration}
//! via the differential flatness of quadrotor dynamics subject to rotor
//! drag.
//!
//! Frames: {x_W, y_W, z_W} is the world frame (z up), {x_B, y_B, z_B} the
//! body frame expressed in world coordinates, and {x_C, y_C} the
//! intermediate heading frame obtained by rotating the world frame about
//! z_W by the reference heading ψ.
//!
//! Every geometric degeneracy (near-zero commanded thrust, axis
//! alignment) resolves to a deterministic fallback, so the pipeline is a
//! total function: finite input yields a finite, unit-norm, right-handed
//! output on every branch.

use nalgebra::{UnitQuaternion, Vector3};

use crate::config::DragCoefficients;
use crate::math::{heading_frame_axes, normalize_with_fallback, quaternion_from_body_axes};
use crate::types::{StateEstimate, TrajectoryPoint};

/// Magnitude below which thrust, cross products and determinants are
/// treated as degenerate
const ALMOST_ZERO_THRESHOLD: f64 = 0.001;

/// One tick's worth of feed-forward reference computation
///
/// Created fresh each tick from the two input snapshots, computed once,
/// consumed, then discarded; carries no history across ticks. Construction
/// captures the inputs only — [`ReferenceInputs::compute`] runs the
/// pipeline, so each intermediate step is individually inspectable.
#[derive(Debug, Clone)]
pub struct ReferenceInputs {
    /// Current state estimate
    state_estimate: StateEstimate,
    /// Reference trajectory sample to track
    reference_state: TrajectoryPoint,
    /// Rotor drag coefficients
    drag: DragCoefficients,
    /// Gravity magnitude [m/s²]
    gravity: f64,

    /// Heading-frame axes enforcing the reference heading ψ
    x_c: Vector3<f64>,
    y_c: Vector3<f64>,
    /// Body axes expressed in the world frame
    x_b: Vector3<f64>,
    y_b: Vector3<f64>,
    z_b: Vector3<f64>,

    /// Computed reference orientation (body to world)
    orientation: UnitQuaternion<f64>,
    /// Computed mass-normalized collective thrust [m/s²]
    collective_thrust: f64,
    /// Computed body rates [rad/s]
    bodyrates: Vector3<f64>,
    /// Computed angular acceleration [rad/s²]
    angular_acceleration: Vector3<f64>,
}

impl ReferenceInputs {
    /// Capture the two input snapshots and the injected drag configuration
    ///
    /// Performs no computation; axes start at the world axes and outputs at
    /// identity/zero until [`ReferenceInputs::compute`] runs.
    pub fn new(
        state_estimate: StateEstimate,
        reference_state: TrajectoryPoint,
        drag: DragCoefficients,
        gravity: f64,
    ) -> Self {
        Self {
            state_estimate,
            reference_state,
            drag,
            gravity,
            x_c: Vector3::new(1.0, 0.0, 0.0),
            y_c: Vector3::new(0.0, 1.0, 0.0),
            x_b: Vector3::new(1.0, 0.0, 0.0),
            y_b: Vector3::new(0.0, 1.0, 0.0),
            z_b: Vector3::new(0.0, 0.0, 1.0),
            orientation: UnitQuaternion::identity(),
            collective_thrust: 0.0,
            bodyrates: Vector3::zeros(),
            angular_acceleration: Vector3::zeros(),
        }
    }

    /// Run the full reference pipeline
    ///
    /// Strict sequential dependency: the orientation (body basis) must
    /// exist before thrust is projected onto z_B, and thrust before the
    /// rate and angular-acceleration derivations divide by it.
    pub fn compute(&mut self) {
        self.compute_reference_orientation();
        self.compute_reference_thrust();
        self.compute_reference_bodyrates();
        self.compute_reference_angular_acceleration();
    }

    /// Computed reference orientation (body to world)
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        self.orientation
    }

    /// Computed mass-normalized collective thrust [m/s²]
    pub fn collective_thrust(&self) -> f64 {
        self.collective_thrust
    }

    /// Computed body rates [rad/s] (body frame)
    pub fn bodyrates(&self) -> Vector3<f64> {
        self.bodyrates
    }

    /// Computed angular acceleration [rad/s²] (body frame)
    pub fn angular_acceleration(&self) -> Vector3<f64> {
        self.angular_acceleration
    }

    /// Body axes (x_B, y_B, z_B) expressed in the world frame
    pub fn body_axes(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        (self.x_b, self.y_b, self.z_b)
    }

    /// Heading-frame axes (x_C, y_C)
    pub fn heading_axes(&self) -> (Vector3<f64>, Vector3<f64>) {
        (self.x_c, self.y_c)
    }

    /// Desired specific force α = a_ref - g_vec + drag correction
    ///
    /// g_vec = (0, 0, -g), so hovering (a_ref = 0) yields α = (0, 0, g).
    /// The drag correction is linear in the reference velocity, with the
    /// per-axis coefficients rotated into the world frame via the current
    /// orientation estimate.
    fn desired_specific_force(&self) -> Vector3<f64> {
        let gravity_vec = Vector3::new(0.0, 0.0, -self.gravity);
        self.reference_state.acceleration - gravity_vec
            + self.rotor_drag_world(&self.reference_state.velocity)
    }

    /// World-frame rotor-drag acceleration R D Rᵀ v with D = diag(dx, dy, dz)
    ///
    /// R is the current orientation estimate: the drag acts along the body
    /// axes the vehicle actually flies with, not the reference axes.
    fn rotor_drag_world(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let q = &self.state_estimate.orientation;
        let v_body = q.inverse_transform_vector(v);
        let damped = Vector3::new(
            self.drag.dx * v_body.x,
            self.drag.dy * v_body.y,
            self.drag.dz * v_body.z,
        );
        q.transform_vector(&damped)
    }

    /// Robust x_B = normalize(y_C × α)
    ///
    /// Degenerate when y_C is nearly parallel to α or α ≈ 0; the fallback
    /// is x_C, which keeps the commanded heading.
    fn compute_robust_body_x_axis(&self, alpha: &Vector3<f64>) -> Vector3<f64> {
        normalize_with_fallback(&self.y_c.cross(alpha), &self.x_c, ALMOST_ZERO_THRESHOLD)
    }

    /// Robust y_B = normalize(β × x_B), with β the drag-corrected thrust
    /// direction vector (coincides with α under the lumped drag model)
    ///
    /// Degenerate when x_B is nearly parallel to β or β ≈ 0; the fallback
    /// is y_C.
    fn compute_robust_body_y_axis(&self, beta: &Vector3<f64>) -> Vector3<f64> {
        normalize_with_fallback(&beta.cross(&self.x_b), &self.y_c, ALMOST_ZERO_THRESHOLD)
    }

    /// Build the robust reference orientation R = [x_B y_B z_B]
    ///
    /// The final z_B = x_B × y_B recomputation runs unconditionally: it
    /// guarantees an exact right-handed orthonormal basis no matter which
    /// construction branch produced the intermediate axes.
    pub fn compute_reference_orientation(&mut self) {
        let (x_c, y_c) = heading_frame_axes(self.reference_state.heading);
        self.x_c = x_c;
        self.y_c = y_c;

        let alpha = self.desired_specific_force();
        let beta = alpha;

        self.z_b = normalize_with_fallback(
            &alpha,
            &Vector3::new(0.0, 0.0, 1.0),
            ALMOST_ZERO_THRESHOLD,
        );
        self.x_b = self.compute_robust_body_x_axis(&alpha);
        self.y_b = self.compute_robust_body_y_axis(&beta);
        self.z_b = self.x_b.cross(&self.y_b);

        self.orientation = quaternion_from_body_axes(&self.x_b, &self.y_b, &self.z_b);
    }

    /// Collective thrust T = α · z_B
    ///
    /// Projection of the desired specific force onto the realized thrust
    /// axis; equals |α| (hence non-negative) in the non-degenerate regime.
    pub fn compute_reference_thrust(&mut self) {
        let alpha = self.desired_specific_force();
        self.collective_thrust = alpha.dot(&self.z_b);
    }

    /// Feed-forward body rates from the flatness relation T·z_B = α
    ///
    /// Differentiating and projecting onto the body axes yields a linear
    /// system in ω (the drag terms couple the axes):
    ///
    /// ```text
    ///          B1·ω_y + C1·ω_z = D1
    /// A2·ω_x          + C2·ω_z = D2
    ///          B3·ω_y + C3·ω_z = D3
    /// ```
    ///
    /// with the heading constraint supplying the third row. At zero drag
    /// this degenerates to ω_x = -(y_B·j)/T, ω_y = (x_B·j)/T and
    /// ω_z = (ψ̇ x_C·x_B + ω_y y_C·z_B)/|y_C × z_B|.
    ///
    /// Near-zero thrust or a singular system yields zero rates: in
    /// commanded free-fall the reference tracks the fallback heading frame
    /// instead of the true flatness solution.
    pub fn compute_reference_bodyrates(&mut self) {
        let t = self.collective_thrust;
        if t.abs() < ALMOST_ZERO_THRESHOLD {
            self.bodyrates = Vector3::zeros();
            return;
        }

        let v = self.reference_state.velocity;
        let a = self.reference_state.acceleration;
        let j = self.reference_state.jerk;
        let d = &self.drag;

        let b1 = t - (d.dz - d.dx) * self.z_b.dot(&v);
        let c1 = -(d.dx - d.dy) * self.y_b.dot(&v);
        let d1 = self.x_b.dot(&j) + d.dx * self.x_b.dot(&a);
        let a2 = t + (d.dy - d.dz) * self.z_b.dot(&v);
        let c2 = (d.dx - d.dy) * self.x_b.dot(&v);
        let d2 = -self.y_b.dot(&j) - d.dy * self.y_b.dot(&a);
        let b3 = -self.y_c.dot(&self.z_b);
        let c3 = self.y_c.cross(&self.z_b).norm();
        let d3 = self.reference_state.heading_rate * self.x_c.dot(&self.x_b);

        let denominator = b1 * c3 - b3 * c1;
        if denominator.abs() < ALMOST_ZERO_THRESHOLD {
            self.bodyrates = Vector3::zeros();
            return;
        }

        let omega_y = (-c1 * d3 + c3 * d1) / denominator;
        let omega_z = (b1 * d3 - b3 * d1) / denominator;
        let omega_x = if a2.abs() < ALMOST_ZERO_THRESHOLD {
            0.0
        } else {
            (d2 - c2 * omega_z) / a2
        };

        self.bodyrates = Vector3::new(omega_x, omega_y, omega_z);
    }

    /// Feed-forward angular acceleration, one derivative order above the
    /// body rates
    ///
    /// Differentiating T·z_B = α twice and projecting gives
    ///
    /// ```text
    /// ω̇_x = ω_y·ω_z - (y_B·α̈ + 2·Ṫ·ω_x)/T
    /// ω̇_y = (x_B·α̈ - 2·Ṫ·ω_y)/T - ω_x·ω_z
    /// ω̇_z = (ψ̈ x_C·x_B + ω̇_y y_C·z_B)/|y_C × z_B|
    /// ```
    ///
    /// with Ṫ = z_B·α̇ + (ω_y x_B - ω_x y_B)·α. The trajectory sample
    /// carries derivatives up to jerk, so the snap contribution to α̈ is
    /// zero and only the drag-rate term R D Rᵀ j remains. Guarded by the
    /// same near-zero-thrust threshold as the body rates.
    pub fn compute_reference_angular_acceleration(&mut self) {
        let t = self.collective_thrust;
        if t.abs() < ALMOST_ZERO_THRESHOLD {
            self.angular_acceleration = Vector3::zeros();
            return;
        }

        let omega = self.bodyrates;
        let alpha = self.desired_specific_force();
        let alpha_dot =
            self.reference_state.jerk + self.rotor_drag_world(&self.reference_state.acceleration);
        let alpha_ddot = self.rotor_drag_world(&self.reference_state.jerk);

        let thrust_rate =
            self.z_b.dot(&alpha_dot) + (omega.y * self.x_b - omega.x * self.y_b).dot(&alpha);

        let omega_dot_x = omega.y * omega.z
            - (self.y_b.dot(&alpha_ddot) + 2.0 * thrust_rate * omega.x) / t;
        let omega_dot_y = (self.x_b.dot(&alpha_ddot) - 2.0 * thrust_rate * omega.y) / t
            - omega.x * omega.z;

        let c3 = self.y_c.cross(&self.z_b).norm();
        let omega_dot_z = if c3 < ALMOST_ZERO_THRESHOLD {
            0.0
        } else {
            (self.reference_state.heading_acceleration * self.x_c.dot(&self.x_b)
                + omega_dot_y * self.y_c.dot(&self.z_b))
                / c3
        };

        self.angular_acceleration = Vector3::new(omega_dot_x, omega_dot_y, omega_dot_z);
    }
}
