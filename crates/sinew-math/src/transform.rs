//! Rigid transforms between frames.
//!
//! A [`Transform`] `X_AB` stores the rotation `R_AB` (columns are B's axes
//! expressed in A) and the position `p_AB` of B's origin expressed in A. It
//! maps coordinates of a point in B to coordinates in A:
//! `p_A = R_AB * p_B + p_AB`.

use crate::{Mat3, Vec3, euler_xyz_body_fixed};

/// Rigid transform `X_AB`: the pose of frame B in frame A.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rotation of B relative to A.
    pub rot: Mat3,
    /// Position of B's origin expressed in A.
    pub pos: Vec3,
}

impl Transform {
    /// Create from rotation matrix and translation.
    pub fn new(rot: Mat3, pos: Vec3) -> Self {
        Self { rot, pos }
    }

    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            rot: Mat3::identity(),
            pos: Vec3::zeros(),
        }
    }

    /// Pure translation.
    pub fn from_translation(pos: Vec3) -> Self {
        Self {
            rot: Mat3::identity(),
            pos,
        }
    }

    /// Pure rotation.
    pub fn from_rotation(rot: Mat3) -> Self {
        Self {
            rot,
            pos: Vec3::zeros(),
        }
    }

    /// Build from body-fixed XYZ Euler angles and a translation.
    ///
    /// This is how a location/orientation pair stored on a component turns
    /// into the pose of that component relative to its frame.
    pub fn from_euler_xyz(orientation: &Vec3, location: Vec3) -> Self {
        Self {
            rot: euler_xyz_body_fixed(orientation),
            pos: location,
        }
    }

    /// Compose two transforms: `X_AC = X_AB * X_BC`.
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform {
            rot: self.rot * other.rot,
            pos: self.pos + self.rot * other.pos,
        }
    }

    /// Inverse transform: `X_BA` from `X_AB`.
    pub fn inverse(&self) -> Transform {
        let rt = self.rot.transpose();
        Transform {
            rot: rt,
            pos: -(rt * self.pos),
        }
    }

    /// Map a point from B coordinates to A coordinates.
    #[inline]
    pub fn transform_point(&self, p: &Vec3) -> Vec3 {
        self.rot * p + self.pos
    }

    /// Re-express a free vector from B to A (rotation only).
    #[inline]
    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        self.rot * v
    }

    /// Get the translation vector.
    pub fn translation(&self) -> Vec3 {
        self.pos
    }

    /// Get the rotation matrix.
    pub fn rotation_matrix(&self) -> Mat3 {
        self.rot
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform {
    type Output = Transform;
    #[inline]
    fn mul(self, rhs: Transform) -> Transform {
        self.compose(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rot_x, rot_z};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_maps_point_to_itself() {
        let p = Vec3::new(1.0, -2.0, 3.0);
        assert_relative_eq!(Transform::identity().transform_point(&p), p, epsilon = 1e-12);
    }

    #[test]
    fn test_compose_translations() {
        let x_ab = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let x_bc = Transform::from_translation(Vec3::new(0.0, 2.0, 0.0));
        let x_ac = x_ab * x_bc;
        assert_relative_eq!(x_ac.pos, Vec3::new(1.0, 2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(x_ac.rot, Mat3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_compose_rotates_child_offset() {
        // B is A rotated 90 degrees about Z; C sits one unit along B's X axis,
        // which is A's Y axis.
        let x_ab = Transform::from_rotation(rot_z(FRAC_PI_2));
        let x_bc = Transform::from_translation(Vec3::x());
        let x_ac = x_ab.compose(&x_bc);
        assert_relative_eq!(x_ac.pos, Vec3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_compose_matches_point_mapping() {
        let x_ab = Transform::new(rot_x(0.3), Vec3::new(1.0, 2.0, 3.0));
        let x_bc = Transform::new(rot_z(-1.1), Vec3::new(-0.5, 0.25, 4.0));
        let p_c = Vec3::new(0.7, -0.2, 0.9);
        let direct = x_ab.transform_point(&x_bc.transform_point(&p_c));
        assert_relative_eq!((x_ab * x_bc).transform_point(&p_c), direct, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let xf = Transform::from_euler_xyz(&Vec3::new(0.2, 0.4, -0.6), Vec3::new(1.0, 2.0, 3.0));
        let p = Vec3::new(-3.0, 0.5, 2.0);
        let back = xf.inverse().transform_point(&xf.transform_point(&p));
        assert_relative_eq!(back, p, epsilon = 1e-12);
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let xf = Transform::new(Mat3::identity(), Vec3::new(5.0, 5.0, 5.0));
        assert_relative_eq!(xf.transform_vector(&Vec3::x()), Vec3::x(), epsilon = 1e-12);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use nalgebra as na;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn arb_pos() -> impl Strategy<Value = Vec3> {
        (-10.0..10.0_f64, -10.0..10.0_f64, -10.0..10.0_f64)
            .prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    fn arb_angle() -> impl Strategy<Value = f64> {
        -std::f64::consts::PI..std::f64::consts::PI
    }

    fn arb_unit_axis() -> impl Strategy<Value = na::Unit<Vec3>> {
        (-1.0..1.0_f64, -1.0..1.0_f64, -1.0..1.0_f64)
            .prop_filter("non-zero axis", |(x, y, z)| x * x + y * y + z * z > 0.01)
            .prop_map(|(x, y, z)| na::Unit::new_normalize(Vec3::new(x, y, z)))
    }

    fn arb_transform() -> impl Strategy<Value = Transform> {
        (arb_unit_axis(), arb_angle(), arb_pos()).prop_map(|(axis, angle, pos)| {
            let rot = na::Rotation3::from_axis_angle(&axis, angle);
            Transform::new(*rot.matrix(), pos)
        })
    }

    proptest! {
        #[test]
        fn compose_with_inverse_is_identity(xf in arb_transform()) {
            let result = xf.compose(&xf.inverse());
            let id = Transform::identity();
            for i in 0..3 {
                for j in 0..3 {
                    prop_assert!((result.rot[(i, j)] - id.rot[(i, j)]).abs() < EPS,
                        "rot[{},{}]: {} vs {}", i, j, result.rot[(i, j)], id.rot[(i, j)]);
                }
                prop_assert!((result.pos[i] - id.pos[i]).abs() < EPS,
                    "pos[{}]: {} vs {}", i, result.pos[i], id.pos[i]);
            }
        }

        #[test]
        fn compose_is_associative(
            a in arb_transform(),
            b in arb_transform(),
            c in arb_transform(),
        ) {
            let ab_c = a.compose(&b).compose(&c);
            let a_bc = a.compose(&b.compose(&c));
            for i in 0..3 {
                for j in 0..3 {
                    prop_assert!((ab_c.rot[(i, j)] - a_bc.rot[(i, j)]).abs() < EPS,
                        "rot[{},{}]: {} vs {}", i, j, ab_c.rot[(i, j)], a_bc.rot[(i, j)]);
                }
                prop_assert!((ab_c.pos[i] - a_bc.pos[i]).abs() < EPS,
                    "pos[{}]: {} vs {}", i, ab_c.pos[i], a_bc.pos[i]);
            }
        }

        #[test]
        fn euler_rotation_is_proper(
            a in arb_angle(),
            b in arb_angle(),
            c in arb_angle(),
        ) {
            let m = Transform::from_euler_xyz(&Vec3::new(a, b, c), Vec3::zeros()).rot;
            let det = m.determinant();
            prop_assert!((det - 1.0).abs() < EPS, "det = {}", det);
            let rrt = m * m.transpose();
            let id = Mat3::identity();
            for i in 0..3 {
                for j in 0..3 {
                    prop_assert!((rrt[(i, j)] - id[(i, j)]).abs() < EPS,
                        "R*R^T[{},{}]: {} vs {}", i, j, rrt[(i, j)], id[(i, j)]);
                }
            }
        }
    }
}
