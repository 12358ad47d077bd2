//! sinew: contact geometry attached to moving frames.
//!
//! This is the umbrella crate. It re-exports the frame graph, the contact
//! shapes and their pose composition, versioned XML persistence and the model
//! container from the sub-crates.
//!
//! ```no_run
//! use sinew::{ContactShape, ContactSphere, ModelBuilder, Vec3};
//!
//! let mut heel = ContactSphere::new("heel", 0.035);
//! heel.geometry_mut().set_frame_name("/bodyset/calcn_r");
//! heel.geometry_mut().set_location(Vec3::new(0.0, 0.01, 0.0));
//!
//! let model = ModelBuilder::new()
//!     .body("calcn_r")
//!     .contact_geometry(heel)
//!     .build()?;
//! for geom in model.solver_geometries()? {
//!     println!("{} on {}: {:?}", geom.name, geom.base_frame, geom.transform.pos);
//! }
//! # Ok::<(), sinew::ModelError>(())
//! ```

pub use sinew_contact::{
    self, Aabb, Color, ContactGeometry, ContactGeometryError, ContactHalfSpace, ContactMesh,
    ContactShape, ContactSphere, DisplayPreference, LegacyContactGeometryApi, NativeGeometry,
    Scale, ScaleSet, TriangleMesh, create_shape,
};
pub use sinew_frame::{self, ComponentPath, FrameError, FrameGraph, FrameSocket, PhysicalFrame};
pub use sinew_math::{self, Mat3, Transform, Vec3};
pub use sinew_model::{self, Model, ModelBuilder, ModelError, SolverGeometry};
pub use sinew_xml::{self, CURRENT_VERSION, LoadOptions, XmlError};
