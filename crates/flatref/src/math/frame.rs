//! Coordinate frame utilities
//!
//! The intermediate frame C encodes only the reference heading ψ: it is the
//! world frame rotated about z_W by ψ. Its x/y axes constrain the yaw degree
//! of freedom when the body frame is reconstructed from a thrust direction.

use nalgebra::{UnitQuaternion, Vector3};

/// Heading-frame axes x_C and y_C for reference heading ψ
///
/// x_C = (cos ψ, sin ψ, 0), y_C = (-sin ψ, cos ψ, 0). Built by rotating the
/// world unit axes with a yaw quaternion; independent of tilt.
///
/// # Arguments
/// * `heading` - Reference heading ψ [rad]
pub fn heading_frame_axes(heading: f64) -> (Vector3<f64>, Vector3<f64>) {
    let q_heading = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), heading);
    let x_c = q_heading * Vector3::new(1.0, 0.0, 0.0);
    let y_c = q_heading * Vector3::new(0.0, 1.0, 0.0);
    (x_c, y_c)
}

/// Normalize a vector, falling back to a given axis near the singularity
///
/// Returns `v / |v|` when `|v|` is at or above `threshold`, otherwise the
/// fallback. This is the two-way branch used for every degenerate case in
/// the body-frame construction: the nominal geometric construction when the
/// input is well-conditioned, a deterministic substitute when it is not.
///
/// # Arguments
/// * `v` - Vector to normalize
/// * `fallback` - Axis returned when `|v|` is below `threshold`
/// * `threshold` - Singularity threshold on `|v|`
pub fn normalize_with_fallback(
    v: &Vector3<f64>,
    fallback: &Vector3<f64>,
    threshold: f64,
) -> Vector3<f64> {
    let norm = v.norm();
    if norm < threshold {
        *fallback
    } else {
        v / norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_heading_frame_zero_heading() {
        let (x_c, y_c) = heading_frame_axes(0.0);

        assert_relative_eq!(x_c, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(y_c, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_heading_frame_quarter_turn() {
        let (x_c, y_c) = heading_frame_axes(PI / 2.0);

        assert_relative_eq!(x_c, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(y_c, Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_heading_frame_stays_horizontal() {
        for i in 0..16 {
            let psi = -PI + (i as f64) * PI / 8.0;
            let (x_c, y_c) = heading_frame_axes(psi);

            assert_relative_eq!(x_c.z, 0.0, epsilon = 1e-12);
            assert_relative_eq!(y_c.z, 0.0, epsilon = 1e-12);
            assert_relative_eq!(x_c.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(x_c.dot(&y_c), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalize_nominal_branch() {
        let v = Vector3::new(0.0, 0.0, 19.62);
        let fallback = Vector3::new(1.0, 0.0, 0.0);

        let n = normalize_with_fallback(&v, &fallback, 0.001);

        assert_relative_eq!(n, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_degenerate_branch() {
        let v = Vector3::new(1e-6, -1e-6, 0.0);
        let fallback = Vector3::new(0.0, 1.0, 0.0);

        let n = normalize_with_fallback(&v, &fallback, 0.001);

        assert_relative_eq!(n, fallback, epsilon = 1e-12);
    }
}
