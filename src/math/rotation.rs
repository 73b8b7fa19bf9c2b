//! Euler-angle and orientation helpers.
//!
//! Brush settings store rotations as Euler angles in degrees, applied in
//! Z, X, Y order (yaw outermost). Offsets are added in that space and then
//! converted back to a quaternion.

use std::f32::consts::FRAC_PI_2;

use crate::core::types::{Mat3, Quat, Vec3};

/// Euler angles (x, y, z) in degrees for a rotation
pub fn euler_degrees(rotation: Quat) -> Vec3 {
    let m = Mat3::from_quat(rotation.normalize());
    // r(row, col) of R = Ry * Rx * Rz
    let r = |row: usize, col: usize| m.col(col)[row];

    let sin_x = -r(1, 2);
    let (x, y, z) = if sin_x.abs() > 0.9999 {
        // Gimbal lock: fold the roll into yaw
        (FRAC_PI_2.copysign(sin_x), (-r(2, 0)).atan2(r(0, 0)), 0.0)
    } else {
        (sin_x.asin(), r(0, 2).atan2(r(2, 2)), r(1, 0).atan2(r(1, 1)))
    };
    Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
}

/// Rotation from Euler angles (x, y, z) in degrees
pub fn from_euler_degrees(angles: Vec3) -> Quat {
    Quat::from_rotation_y(angles.y.to_radians())
        * Quat::from_rotation_x(angles.x.to_radians())
        * Quat::from_rotation_z(angles.z.to_radians())
}

/// Rotation whose +Z axis points along `forward`, keeping +Y as close to `up` as possible
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let z = forward.normalize_or(Vec3::Z);
    let x = up.cross(z);
    if x.length_squared() < 1e-8 {
        // forward parallel to up: shortest arc from +Z
        return Quat::from_rotation_arc(Vec3::Z, z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_euler_round_trip() {
        let angles = Vec3::new(30.0, 45.0, -20.0);
        let q = from_euler_degrees(angles);
        assert!(approx(euler_degrees(q), angles));
    }

    #[test]
    fn test_euler_yaw_only() {
        let q = from_euler_degrees(Vec3::new(0.0, 90.0, 0.0));
        assert!(approx(q * Vec3::Z, Vec3::X));
    }

    #[test]
    fn test_look_rotation_forward() {
        let q = look_rotation(Vec3::X, Vec3::Y);
        assert!(approx(q * Vec3::Z, Vec3::X));
        assert!(approx(q * Vec3::Y, Vec3::Y));
    }

    #[test]
    fn test_look_rotation_straight_up() {
        // Looking along +Y tips the object back by 90 degrees around X
        let q = look_rotation(Vec3::Y, Vec3::Y);
        assert!(approx(q * Vec3::Z, Vec3::Y));
        assert!(approx(euler_degrees(q), Vec3::new(-90.0, 0.0, 0.0)));
    }

    #[test]
    fn test_look_up_plus_default_origin_is_identity() {
        let angles = euler_degrees(look_rotation(Vec3::Y, Vec3::Y)) + Vec3::new(90.0, 0.0, 0.0);
        let q = from_euler_degrees(angles);
        assert!(q.angle_between(Quat::IDENTITY) < 1e-3);
    }
}
