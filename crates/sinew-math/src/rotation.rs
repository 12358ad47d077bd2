//! Rotation matrices from body-fixed (intrinsic) XYZ Euler angles.
//!
//! Convention: angles `(a, b, c)` rotate first about the frame's own X axis by
//! `a`, then about the new Y axis by `b`, then about the new Z axis by `c`.
//! The resulting matrix is `R = Rx(a) * Ry(b) * Rz(c)`.

use crate::{Mat3, Vec3};

/// Rotation about the X axis.
#[inline]
pub fn rot_x(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c)
}

/// Rotation about the Y axis.
#[inline]
pub fn rot_y(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
}

/// Rotation about the Z axis.
#[inline]
pub fn rot_z(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Rotation matrix for body-fixed XYZ Euler angles (radians).
pub fn euler_xyz_body_fixed(angles: &Vec3) -> Mat3 {
    rot_x(angles.x) * rot_y(angles.y) * rot_z(angles.z)
}

/// Recover body-fixed XYZ Euler angles from a rotation matrix.
///
/// The middle angle is returned in `[-π/2, π/2]`. At gimbal lock
/// (`|b| = π/2`) the third angle is pinned to zero and the first absorbs the
/// remaining rotation.
pub fn to_euler_xyz_body_fixed(m: &Mat3) -> Vec3 {
    let sb = m[(0, 2)].clamp(-1.0, 1.0);
    let b = sb.asin();
    if sb.abs() < 1.0 - 1e-12 {
        let a = (-m[(1, 2)]).atan2(m[(2, 2)]);
        let c = (-m[(0, 1)]).atan2(m[(0, 0)]);
        Vec3::new(a, b, c)
    } else {
        let a = m[(2, 1)].atan2(m[(1, 1)]);
        Vec3::new(a, b, 0.0)
    }
}
