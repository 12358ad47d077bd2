//! Model definition: frames plus the contact geometry attached to them.

use crate::{ModelError, Result};
use sinew_contact::{Aabb, ContactShape, NativeGeometry, ScaleSet};
use sinew_frame::graph::BODYSET;
use sinew_frame::{ComponentPath, FrameGraph};
use sinew_math::Transform;
use sinew_xml::LoadOptions;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// What a contact solver needs for one geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverGeometry {
    /// Geometry name.
    pub name: String,
    /// Body (or ground) the geometry is rigidly fixed to.
    pub base_frame: String,
    /// Primitive in the geometry frame `P`.
    pub native: NativeGeometry,
    /// Pose of `P` in the base frame, `X_BP`.
    pub transform: Transform,
    /// Bounds in the base frame.
    pub bounds: Aabb,
}

/// Frames and contact geometry of a musculoskeletal model.
#[derive(Debug)]
pub struct Model {
    frames: FrameGraph,
    contact_geometry: Vec<Box<dyn ContactShape>>,
}

impl Model {
    /// Empty model holding only ground.
    pub fn new() -> Self {
        Self::from_frames(FrameGraph::new())
    }

    /// Model over an existing frame graph, with no geometry yet.
    pub fn from_frames(frames: FrameGraph) -> Self {
        Self {
            frames,
            contact_geometry: Vec::new(),
        }
    }

    pub fn frames(&self) -> &FrameGraph {
        &self.frames
    }

    /// Mutable frame graph, for adding bodies and offset frames.
    pub fn frames_mut(&mut self) -> &mut FrameGraph {
        &mut self.frames
    }

    pub fn contact_geometry(&self) -> &[Box<dyn ContactShape>] {
        &self.contact_geometry
    }

    pub fn find_contact_geometry(&self, name: &str) -> Option<&dyn ContactShape> {
        self.contact_geometry
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    pub fn find_contact_geometry_mut(&mut self, name: &str) -> Option<&mut (dyn ContactShape + 'static)> {
        self.contact_geometry
            .iter_mut()
            .find(|s| s.name() == name)
            .map(|s| s.as_mut())
    }

    /// Add a shape. Names are unique within the model, since they form the
    /// shape's component path.
    pub fn add_contact_geometry(&mut self, shape: Box<dyn ContactShape>) -> Result<()> {
        if self.find_contact_geometry(shape.name()).is_some() {
            return Err(ModelError::DuplicateGeometry(shape.name().to_string()));
        }
        debug!(name = shape.name(), kind = shape.type_name(), "adding contact geometry");
        self.contact_geometry.push(shape);
        Ok(())
    }

    /// Connection phase: resolve every geometry's frame path.
    ///
    /// Fails on the first geometry whose path does not resolve, naming both.
    pub fn connect(&mut self) -> Result<()> {
        for shape in &mut self.contact_geometry {
            shape.geometry_mut().connect(&self.frames)?;
        }
        Ok(())
    }

    /// Scaling pass: let every geometry react to its body's new scale.
    ///
    /// Bodies the set names but the model lacks are skipped. Shapes are
    /// scaled as copies and swapped in only when all of them succeed, so a
    /// failed pass leaves the model untouched.
    pub fn scale(&mut self, scale_set: &ScaleSet) -> Result<()> {
        scale_set.validate()?;
        for scale in &scale_set.scales {
            let path = ComponentPath::from_elements([BODYSET, scale.body.as_str()]);
            if self.frames.get(&path).is_none() {
                debug!(body = %scale.body, "scale set names a body not in the model");
            }
        }
        let scaled = self
            .contact_geometry
            .iter()
            .map(|shape| -> Result<Box<dyn ContactShape>> {
                let mut shape = shape.clone();
                shape.scale(scale_set)?;
                Ok(shape)
            })
            .collect::<Result<Vec<_>>>()?;
        self.contact_geometry = scaled;
        info!(bodies = scale_set.len(), geometry = self.contact_geometry.len(), "scaled contact geometry");
        Ok(())
    }

    /// Solver-facing view of every geometry, in insertion order.
    pub fn solver_geometries(&self) -> Result<Vec<SolverGeometry>> {
        self.contact_geometry
            .iter()
            .map(|shape| {
                let native = shape.create_native_geometry()?;
                let transform = shape.find_transform_in_base_frame()?;
                Ok(SolverGeometry {
                    name: shape.name().to_string(),
                    base_frame: shape.geometry().base_frame_name()?,
                    bounds: Aabb::from_geometry(&native, &transform),
                    native,
                    transform,
                })
            })
            .collect()
    }

    /// Load shapes from a document, add them and connect them.
    ///
    /// Nothing is added unless every shape loads, has a fresh name and
    /// connects. Returns the number of shapes added.
    pub fn load_contact_geometry(&mut self, xml: &str, options: &LoadOptions) -> Result<usize> {
        let mut shapes = sinew_xml::load_str(xml, options)?;
        let mut names = HashSet::new();
        for shape in &mut shapes {
            let name = shape.name().to_string();
            if self.find_contact_geometry(&name).is_some() || !names.insert(name.clone()) {
                return Err(ModelError::DuplicateGeometry(name));
            }
            shape.geometry_mut().connect(&self.frames)?;
        }
        let count = shapes.len();
        self.contact_geometry.extend(shapes);
        Ok(count)
    }

    /// [`load_contact_geometry`](Self::load_contact_geometry) from a file.
    ///
    /// Relative mesh files are read next to the document.
    pub fn load_contact_geometry_file<P: AsRef<Path>>(&mut self, path: P, options: &LoadOptions) -> Result<usize> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(sinew_xml::XmlError::from)?;
        self.load_contact_geometry(&xml, &options.for_document(path))
    }

    /// Current-version document holding every geometry.
    pub fn contact_geometry_xml(&self) -> Result<String> {
        Ok(sinew_xml::to_xml_string(&self.contact_geometry)?)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

struct OffsetFrameSpec {
    name: String,
    parent: String,
    offset: Transform,
}

/// Builder for constructing models.
///
/// Geometry refers to frames by path (`/bodyset/<body>`,
/// `/bodyset/<body>/<offset>`, `/ground`), resolved when the model is built.
pub struct ModelBuilder {
    bodies: Vec<String>,
    offset_frames: Vec<OffsetFrameSpec>,
    contact_geometry: Vec<Box<dyn ContactShape>>,
}

impl ModelBuilder {
    /// Start building a new model.
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            offset_frames: Vec::new(),
            contact_geometry: Vec::new(),
        }
    }

    /// Add a body frame at `/bodyset/<name>`.
    pub fn body(mut self, name: &str) -> Self {
        self.bodies.push(name.to_string());
        self
    }

    /// Add a frame fixed to the frame at absolute path `parent`, with pose
    /// `offset` in that frame. Offsets may be chained in insertion order.
    pub fn offset_frame(mut self, name: &str, parent: &str, offset: Transform) -> Self {
        self.offset_frames.push(OffsetFrameSpec {
            name: name.to_string(),
            parent: parent.to_string(),
            offset,
        });
        self
    }

    /// Add a contact shape. Its frame path must resolve once frames exist.
    pub fn contact_geometry(mut self, shape: impl ContactShape + 'static) -> Self {
        self.contact_geometry.push(Box::new(shape));
        self
    }

    /// Build the frame graph, add the geometry and run the connection phase.
    pub fn build(self) -> Result<Model> {
        let mut frames = FrameGraph::new();
        for body in &self.bodies {
            frames.add_body(body)?;
        }
        for spec in &self.offset_frames {
            let parent = frames.find(&spec.parent)?;
            frames.add_offset_frame(&spec.name, &parent, spec.offset)?;
        }

        let mut model = Model::from_frames(frames);
        for shape in self.contact_geometry {
            model.add_contact_geometry(shape)?;
        }
        model.connect()?;
        Ok(model)
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
