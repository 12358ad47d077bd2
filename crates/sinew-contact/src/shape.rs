//! The contract every contact shape implements.

use crate::property::PropertyList;
use crate::{
    ContactGeometry, ContactGeometryError, ContactHalfSpace, ContactMesh, ContactSphere,
    NativeGeometry, Result, ScaleSet,
};
use sinew_math::Transform;
use std::fmt;
use std::path::Path;

/// Persisted type tags of the shapes this crate can instantiate.
pub const SHAPE_TYPES: [&str; 3] = [
    ContactSphere::TYPE_NAME,
    ContactHalfSpace::TYPE_NAME,
    ContactMesh::TYPE_NAME,
];

/// Persisted tag of the abstract base type.
pub const ABSTRACT_TYPE_NAME: &str = "ContactGeometry";

/// Boxed copies of shape trait objects. Implemented for every `Clone` shape.
pub trait ShapeClone {
    fn clone_shape(&self) -> Box<dyn ContactShape>;
}

impl<T: ContactShape + Clone + 'static> ShapeClone for T {
    fn clone_shape(&self) -> Box<dyn ContactShape> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn ContactShape> {
    fn clone(&self) -> Self {
        (**self).clone_shape()
    }
}

/// A contact shape: shared [`ContactGeometry`] state plus shape parameters.
pub trait ContactShape: ShapeClone + fmt::Debug {
    /// Persisted type tag, e.g. `ContactSphere`.
    fn type_name(&self) -> &'static str;

    /// Shared placement, presentation and frame state.
    fn geometry(&self) -> &ContactGeometry;

    /// Mutable access to the shared state.
    fn geometry_mut(&mut self) -> &mut ContactGeometry;

    /// Build the solver primitive for this shape, expressed in the shape's
    /// own frame.
    fn create_native_geometry(&self) -> Result<NativeGeometry>;

    /// Rescale shape dimensions after the model's bodies were scaled.
    ///
    /// Must leave location and orientation alone. The default does nothing.
    fn scale(&mut self, scale_set: &ScaleSet) -> Result<()> {
        let _ = scale_set;
        Ok(())
    }

    /// Refresh derived geometry after parameters changed.
    fn update_geometry(&mut self) -> Result<()> {
        Ok(())
    }

    /// Directory that relative file references resolve against, normally
    /// the one holding the document the shape was read from.
    fn set_base_dir(&mut self, dir: &Path) {
        let _ = dir;
    }

    /// Append shape-specific persisted properties.
    fn write_shape_properties(&self, out: &mut PropertyList) {
        let _ = out;
    }

    /// Set one shape-specific property from text; `false` if unknown.
    fn read_shape_property(&mut self, name: &str, raw: &str) -> Result<bool> {
        let _ = (name, raw);
        Ok(false)
    }

    fn name(&self) -> &str {
        self.geometry().name()
    }

    /// See [`ContactGeometry::find_transform_in_base_frame`].
    fn find_transform_in_base_frame(&self) -> Result<Transform> {
        self.geometry().find_transform_in_base_frame()
    }

    /// All persisted properties, shared ones first.
    fn properties(&self) -> PropertyList {
        let mut out = PropertyList::new();
        self.geometry().write_properties(&mut out);
        self.write_shape_properties(&mut out);
        out
    }

    /// Set any persisted property from text; `false` if no one owns `name`.
    fn set_property(&mut self, name: &str, raw: &str) -> Result<bool> {
        if self.geometry_mut().read_property(name, raw)? {
            return Ok(true);
        }
        self.read_shape_property(name, raw)
    }
}

/// Instantiate a default shape from its persisted type tag.
///
/// The abstract `ContactGeometry` tag fails with
/// [`ContactGeometryError::NotImplemented`].
pub fn create_shape(type_name: &str, name: &str) -> Result<Box<dyn ContactShape>> {
    match type_name {
        ContactSphere::TYPE_NAME => Ok(Box::new(ContactSphere::new(name, ContactSphere::DEFAULT_RADIUS))),
        ContactHalfSpace::TYPE_NAME => Ok(Box::new(ContactHalfSpace::new(name))),
        ContactMesh::TYPE_NAME => Ok(Box::new(ContactMesh::new(name))),
        ABSTRACT_TYPE_NAME => Err(ContactGeometryError::NotImplemented {
            kind: type_name.to_string(),
            operation: "create_native_geometry",
        }),
        other => Err(ContactGeometryError::UnknownShape(other.to_string())),
    }
}
