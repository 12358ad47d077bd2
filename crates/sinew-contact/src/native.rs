//! Solver-side geometric primitives produced by contact shapes.

use sinew_math::{Transform, Vec3};

/// A primitive the contact solver consumes. Coordinates are in the shape's
/// own frame `P`; pair with the pose from
/// [`find_transform_in_base_frame`](crate::ContactGeometry::find_transform_in_base_frame).
#[derive(Debug, Clone, PartialEq)]
pub enum NativeGeometry {
    /// Sphere centered at the origin of `P`.
    Sphere { radius: f64 },
    /// The half-space `x > 0` of `P`; its outward normal is `-X`.
    HalfSpace,
    /// Closed triangle mesh. Faces index into `vertices`, counter-clockwise
    /// seen from outside.
    TriangleMesh {
        vertices: Vec<Vec3>,
        faces: Vec<[usize; 3]>,
    },
}

impl NativeGeometry {
    /// Short name of the primitive.
    pub fn kind(&self) -> &'static str {
        match self {
            NativeGeometry::Sphere { .. } => "sphere",
            NativeGeometry::HalfSpace => "half-space",
            NativeGeometry::TriangleMesh { .. } => "triangle-mesh",
        }
    }

    /// Outward normal of a half-space in its own frame.
    pub fn half_space_normal() -> Vec3 {
        -Vec3::x()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min/max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounds of `geom` placed at `pose` (the pose of `P` in some frame).
    pub fn from_geometry(geom: &NativeGeometry, pose: &Transform) -> Self {
        match geom {
            NativeGeometry::Sphere { radius } => {
                let r = Vec3::new(*radius, *radius, *radius);
                Aabb::new(pose.pos - r, pose.pos + r)
            }
            NativeGeometry::HalfSpace => {
                // Unbounded; return a large box like other infinite primitives.
                let large = 1e6;
                Aabb::new(
                    Vec3::new(-large, -large, -large),
                    Vec3::new(large, large, large),
                )
            }
            NativeGeometry::TriangleMesh { vertices, .. } => {
                if vertices.is_empty() {
                    return Aabb::new(pose.pos, pose.pos);
                }
                let v0 = pose.transform_point(&vertices[0]);
                let mut min = v0;
                let mut max = v0;
                for v in vertices.iter().skip(1) {
                    let vt = pose.transform_point(v);
                    min = min.inf(&vt);
                    max = max.sup(&vt);
                }
                Aabb::new(min, max)
            }
        }
    }
}
