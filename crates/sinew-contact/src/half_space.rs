//! Half-space contact shape, typically the floor.

use crate::{ContactGeometry, ContactShape, NativeGeometry, Result};
use sinew_frame::PhysicalFrame;
use sinew_math::Vec3;
use std::rc::Rc;

/// The half-space `x > 0` of the geometry frame. Its outward normal is `-X`,
/// so a floor with `+Y` up is oriented `(0, 0, -pi/2)`.
///
/// Has no dimensions, so scaling is a no-op.
#[derive(Debug, Clone)]
pub struct ContactHalfSpace {
    geometry: ContactGeometry,
}

impl ContactHalfSpace {
    pub const TYPE_NAME: &'static str = "ContactHalfSpace";

    pub fn new(name: &str) -> Self {
        Self {
            geometry: ContactGeometry::new(name),
        }
    }

    /// Half-space attached to `frame` with the given placement.
    pub fn with_pose(name: &str, location: Vec3, orientation: Vec3, frame: &Rc<PhysicalFrame>) -> Self {
        Self {
            geometry: ContactGeometry::with_pose(name, location, orientation, frame),
        }
    }

    /// Outward normal in the base frame.
    pub fn normal_in_base_frame(&self) -> Result<Vec3> {
        let x_bp = self.find_transform_in_base_frame()?;
        Ok(x_bp.transform_vector(&NativeGeometry::half_space_normal()))
    }
}

impl ContactShape for ContactHalfSpace {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn geometry(&self) -> &ContactGeometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut ContactGeometry {
        &mut self.geometry
    }

    fn create_native_geometry(&self) -> Result<NativeGeometry> {
        Ok(NativeGeometry::HalfSpace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScaleSet;
    use approx::assert_relative_eq;
    use sinew_frame::FrameGraph;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_floor_normal_points_up() {
        let graph = FrameGraph::new();
        let floor = ContactHalfSpace::with_pose(
            "floor",
            Vec3::zeros(),
            Vec3::new(0.0, 0.0, -FRAC_PI_2),
            &graph.ground(),
        );
        assert_relative_eq!(floor.normal_in_base_frame().unwrap(), Vec3::y(), epsilon = 1e-12);
        assert_eq!(floor.create_native_geometry().unwrap(), NativeGeometry::HalfSpace);
    }

    #[test]
    fn test_scale_is_noop() {
        let graph = FrameGraph::new();
        let location = Vec3::new(0.0, -0.01, 0.0);
        let mut floor = ContactHalfSpace::with_pose("floor", location, Vec3::zeros(), &graph.ground());
        let set = ScaleSet::new().with("ground", Vec3::new(3.0, 3.0, 3.0));
        floor.scale(&set).unwrap();
        assert_eq!(floor.geometry().location(), location);
        assert!(floor.properties().iter().all(|(n, _)| *n != "radius"));
    }
}
