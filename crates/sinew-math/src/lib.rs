//! Rigid-body math primitives for sinew.
//!
//! Frame poses are expressed as [`Transform`]s using the "X_AB" convention:
//! `X_AB` is the pose of frame B measured and expressed in frame A, so poses
//! chain left to right (`X_AC = X_AB * X_BC`).

pub mod rotation;
pub mod transform;

pub use rotation::{euler_xyz_body_fixed, rot_x, rot_y, rot_z, to_euler_xyz_body_fixed};
pub use transform::Transform;

use nalgebra as na;

/// 3D vector alias.
pub type Vec3 = na::Vector3<f64>;
/// 3x3 matrix alias.
pub type Mat3 = na::Matrix3<f64>;
