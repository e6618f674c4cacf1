//! Compass heading from gravity and geomagnetic vectors
//!
//! Builds the device-to-world rotation matrix (rows: east, north, up) and
//! extracts the azimuth, i.e. the rotation about the device Z axis.

use glam::{Mat3, Vec3};

use crate::consts::STANDARD_GRAVITY;
use crate::normalize_degrees;

/// Gravity below 10% of g (squared) means free fall, no usable "down"
const FREE_FALL_THRESHOLD_SQ: f32 = STANDARD_GRAVITY * STANDARD_GRAVITY * 0.01;
/// Minimum |field x gravity| before east is considered undefined
const MIN_EAST_NORM: f32 = 0.1;

/// Rotation matrix from device to world frame
///
/// Rows are the world east, north and up axes expressed in device
/// coordinates. Returns `None` when the inputs are degenerate: free fall,
/// or a magnetic field (nearly) parallel to gravity.
pub fn rotation_matrix(gravity: Vec3, geomagnetic: Vec3) -> Option<Mat3> {
    if !gravity.is_finite() || !geomagnetic.is_finite() {
        return None;
    }
    if gravity.length_squared() < FREE_FALL_THRESHOLD_SQ {
        return None;
    }

    let east = geomagnetic.cross(gravity);
    let east_norm = east.length();
    if east_norm < MIN_EAST_NORM {
        return None;
    }
    let east = east / east_norm;
    let up = gravity.normalize();
    let north = up.cross(east);

    // glam matrices are column-major; transpose to get rows
    Some(Mat3::from_cols(east, north, up).transpose())
}

/// Azimuth in radians, (-π, π], from a rotation matrix
pub fn azimuth(rotation: &Mat3) -> f32 {
    // Row 0 / row 1, column 1 (device Y axis projected on east / north)
    let east_y = rotation.row(0).y;
    let north_y = rotation.row(1).y;
    east_y.atan2(north_y)
}

/// Heading in degrees [0, 360), clockwise from magnetic north
///
/// `None` when the rotation matrix cannot be resolved. Never a fabricated 0.
pub fn compute_heading(gravity: Vec3, geomagnetic: Vec3) -> Option<f32> {
    let rotation = rotation_matrix(gravity, geomagnetic)?;
    Some(normalize_degrees(azimuth(&rotation).to_degrees()))
}

/// Eight-point compass label for a heading in degrees
pub fn cardinal(heading_deg: f32) -> &'static str {
    match normalize_degrees(heading_deg).round() as i32 {
        338..=360 | 0..=22 => "N",
        23..=67 => "NE",
        68..=112 => "E",
        113..=157 => "SE",
        158..=202 => "S",
        203..=247 => "SW",
        248..=292 => "W",
        293..=337 => "NW",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::scripted::{field_for_heading, flat_gravity};
    use proptest::prelude::*;

    fn angle_diff(a: f32, b: f32) -> f32 {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d)
    }

    #[test]
    fn test_flat_device_facing_north() {
        let heading = compute_heading(flat_gravity(), field_for_heading(0.0)).unwrap();
        assert!(angle_diff(heading, 0.0) < 0.01, "heading {}", heading);
    }

    #[test]
    fn test_upright_device_north() {
        // Device upright, field pointing north-and-down through the back
        let heading = compute_heading(Vec3::new(0.0, 9.81, 0.0), Vec3::new(0.0, -40.0, -20.0));
        let heading = heading.unwrap();
        assert!(angle_diff(heading, 0.0) < 0.01, "heading {}", heading);
    }

    #[test]
    fn test_heading_follows_rotation() {
        let mut previous = None;
        for step in 0..36 {
            let expected = step as f32 * 10.0;
            let heading = compute_heading(flat_gravity(), field_for_heading(expected)).unwrap();
            assert!(
                angle_diff(heading, expected) < 0.05,
                "expected {} got {}",
                expected,
                heading
            );
            if let Some(prev) = previous {
                assert!(heading > prev);
            }
            previous = Some(heading);
        }
    }

    #[test]
    fn test_free_fall_is_degenerate() {
        assert!(compute_heading(Vec3::new(0.0, 0.0, 0.5), field_for_heading(0.0)).is_none());
        assert!(compute_heading(Vec3::ZERO, field_for_heading(0.0)).is_none());
    }

    #[test]
    fn test_field_parallel_to_gravity_is_degenerate() {
        assert!(compute_heading(flat_gravity(), Vec3::new(0.0, 0.0, -45.0)).is_none());
        assert!(compute_heading(flat_gravity(), Vec3::ZERO).is_none());
    }

    #[test]
    fn test_non_finite_input() {
        assert!(compute_heading(Vec3::new(f32::NAN, 0.0, 9.81), field_for_heading(0.0)).is_none());
    }

    #[test]
    fn test_rotation_matrix_is_orthonormal() {
        let r = rotation_matrix(Vec3::new(1.0, 2.0, 9.5), Vec3::new(5.0, 20.0, -40.0)).unwrap();
        let identity = r * r.transpose();
        assert!(identity.abs_diff_eq(Mat3::IDENTITY, 1e-5));
    }

    #[test]
    fn test_cardinal() {
        assert_eq!(cardinal(0.0), "N");
        assert_eq!(cardinal(359.0), "N");
        assert_eq!(cardinal(45.0), "NE");
        assert_eq!(cardinal(90.0), "E");
        assert_eq!(cardinal(180.0), "S");
        assert_eq!(cardinal(270.0), "W");
        assert_eq!(cardinal(315.0), "NW");
    }

    fn vec3() -> impl Strategy<Value = Vec3> {
        (-60.0f32..60.0, -60.0f32..60.0, -60.0f32..60.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn prop_heading_in_range(gravity in vec3(), field in vec3()) {
            match compute_heading(gravity, field) {
                Some(h) => prop_assert!((0.0..360.0).contains(&h), "heading {}", h),
                None => prop_assert!(rotation_matrix(gravity, field).is_none()),
            }
        }

        #[test]
        fn prop_flat_heading_in_range(heading in -720.0f32..720.0) {
            let h = compute_heading(flat_gravity(), field_for_heading(heading));
            prop_assert!(h.is_some_and(|h| (0.0..360.0).contains(&h)));
        }
    }
}
