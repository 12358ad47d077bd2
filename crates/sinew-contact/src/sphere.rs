//! Spherical contact shape.

use crate::property::{self, PropertyList};
use crate::{ContactGeometry, ContactGeometryError, ContactShape, NativeGeometry, Result, ScaleSet};
use sinew_frame::PhysicalFrame;
use sinew_math::Vec3;
use std::rc::Rc;
use tracing::debug;

const RADIUS: &str = "radius";

/// Sphere centered at the geometry's location.
#[derive(Debug, Clone)]
pub struct ContactSphere {
    geometry: ContactGeometry,
    radius: f64,
}

impl ContactSphere {
    pub const TYPE_NAME: &'static str = "ContactSphere";
    /// Radius of a sphere read from a document that omits it.
    pub const DEFAULT_RADIUS: f64 = 0.0;

    /// Unattached sphere at the origin.
    ///
    /// `radius` must be finite and non-negative;
    /// [`set_radius`](Self::set_radius) is the checked way to change it.
    pub fn new(name: &str, radius: f64) -> Self {
        debug_assert!(valid_radius(radius), "bad sphere radius {}", radius);
        Self {
            geometry: ContactGeometry::new(name),
            radius,
        }
    }

    /// Sphere attached to `frame` at `location`.
    pub fn with_location(name: &str, radius: f64, location: Vec3, frame: &Rc<PhysicalFrame>) -> Self {
        Self::with_pose(name, radius, location, Vec3::zeros(), frame)
    }

    /// Sphere attached to `frame` at `location` with `orientation`.
    pub fn with_pose(
        name: &str,
        radius: f64,
        location: Vec3,
        orientation: Vec3,
        frame: &Rc<PhysicalFrame>,
    ) -> Self {
        debug_assert!(valid_radius(radius), "bad sphere radius {}", radius);
        Self {
            geometry: ContactGeometry::with_pose(name, location, orientation, frame),
            radius,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Set the radius. Negative or non-finite values are rejected, the same
    /// as when read from a document.
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        if !valid_radius(radius) {
            return Err(ContactGeometryError::InvalidProperty {
                property: RADIUS.to_string(),
                value: radius.to_string(),
                reason: "radius must be finite and non-negative".to_string(),
            });
        }
        self.radius = radius;
        Ok(())
    }
}

fn valid_radius(radius: f64) -> bool {
    radius.is_finite() && radius >= 0.0
}

impl ContactShape for ContactSphere {
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
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ContactGeometryError::InvalidProperty {
                property: RADIUS.to_string(),
                value: self.radius.to_string(),
                reason: format!("sphere `{}` needs a positive radius", self.geometry.name()),
            });
        }
        Ok(NativeGeometry::Sphere {
            radius: self.radius,
        })
    }

    /// A sphere stays a sphere: the radius takes the mean of the base body's
    /// factors.
    fn scale(&mut self, scale_set: &ScaleSet) -> Result<()> {
        let Some(factors) = self.geometry.scale_factors(scale_set)? else {
            return Ok(());
        };
        let mean = factors.mean();
        debug!(sphere = self.geometry.name(), from = self.radius, to = self.radius * mean, "scaling radius");
        self.radius *= mean;
        Ok(())
    }

    fn write_shape_properties(&self, out: &mut PropertyList) {
        out.push((RADIUS, property::format_f64_list(&[self.radius])));
    }

    fn read_shape_property(&mut self, name: &str, raw: &str) -> Result<bool> {
        if name != RADIUS {
            return Ok(false);
        }
        self.set_radius(property::parse_f64(name, raw)?)?;
        Ok(true)
    }
}
