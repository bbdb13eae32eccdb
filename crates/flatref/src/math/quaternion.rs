//! Quaternion helpers for attitude representation

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

/// Unit quaternion from a right-handed orthonormal body basis
///
/// Builds R = [x_B y_B z_B] column-wise and converts it to a quaternion.
/// The caller guarantees orthonormality; the basis produced by the
/// reference-input pipeline satisfies this by construction.
///
/// # Arguments
/// * `x_b`, `y_b`, `z_b` - Body axes expressed in the world frame
pub fn quaternion_from_body_axes(
    x_b: &Vector3<f64>,
    y_b: &Vector3<f64>,
    z_b: &Vector3<f64>,
) -> UnitQuaternion<f64> {
    let rot = Matrix3::from_columns(&[*x_b, *y_b, *z_b]);
    UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rot))
}

/// Defensively renormalize a quaternion
///
/// Inputs arriving over the estimator boundary may have drifted off unit
/// norm; renormalizing is cheap and keeps downstream rotations valid.
pub fn renormalized(q: &UnitQuaternion<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::from_quaternion(*q.quaternion())
}
