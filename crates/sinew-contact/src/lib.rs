//! Contact geometry attached to physical frames.
//!
//! A [`ContactGeometry`] places a shape in the frame it is attached to
//! (location plus body-fixed XYZ orientation) and composes that placement with
//! the frame's own base-relative pose, which is what a contact solver needs.
//! Concrete shapes implement [`ContactShape`] to produce a solver-side
//! [`NativeGeometry`] and to react to model scaling.

pub mod compat;
pub mod display;
pub mod error;
pub mod geometry;
pub mod half_space;
pub mod mesh;
pub mod native;
pub mod property;
pub mod scale;
pub mod shape;
pub mod sphere;

pub use compat::LegacyContactGeometryApi;
pub use display::{Color, DisplayPreference};
pub use error::{ContactGeometryError, Result};
pub use geometry::ContactGeometry;
pub use half_space::ContactHalfSpace;
pub use mesh::{ContactMesh, TriangleMesh};
pub use native::{Aabb, NativeGeometry};
pub use property::PropertyList;
pub use scale::{Scale, ScaleSet};
pub use shape::{ContactShape, SHAPE_TYPES, ShapeClone, create_shape};
pub use sphere::ContactSphere;
