//! State shared by every contact shape.

use crate::property::{self, PropertyList};
use crate::{Color, ContactGeometryError, DisplayPreference, Result, ScaleSet};
use sinew_frame::{ComponentPath, FrameError, FrameGraph, FrameSocket, PhysicalFrame};
use sinew_math::{Transform, Vec3};
use std::rc::Rc;

/// Container under which contact geometry lives in a model.
pub const CONTACT_GEOMETRY_SET: &str = "contactgeometryset";

/// Placement, presentation and frame attachment of a contact shape.
///
/// `location` and `orientation` are expressed in the attached frame `F`; they
/// define an imaginary frame `P` at the shape's center. Consumers must use
/// [`find_transform_in_base_frame`](Self::find_transform_in_base_frame)
/// rather than reading them directly.
#[derive(Debug, Clone)]
pub struct ContactGeometry {
    name: String,
    location: Vec3,
    orientation: Vec3,
    display_preference: DisplayPreference,
    color: Color,
    frame: FrameSocket,
}

impl ContactGeometry {
    /// Geometry with no frame and the default pose.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            location: Vec3::zeros(),
            orientation: Vec3::zeros(),
            display_preference: DisplayPreference::default(),
            color: Color::default(),
            frame: FrameSocket::new(),
        }
    }

    /// Geometry attached to `frame` with the default pose.
    pub fn with_frame(name: &str, frame: &Rc<PhysicalFrame>) -> Self {
        let mut geometry = Self::new(name);
        geometry.set_frame(frame);
        geometry
    }

    /// Geometry attached to `frame` at `location`, rotated by the body-fixed
    /// XYZ Euler angles `orientation` (radians).
    pub fn with_pose(name: &str, location: Vec3, orientation: Vec3, frame: &Rc<PhysicalFrame>) -> Self {
        let mut geometry = Self::with_frame(name, frame);
        geometry.location = location;
        geometry.orientation = orientation;
        geometry
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Absolute component path, `/contactgeometryset/<name>`.
    pub fn path(&self) -> ComponentPath {
        ComponentPath::from_elements([CONTACT_GEOMETRY_SET, self.name.as_str()])
    }

    /// Center of the geometry in the attached frame.
    pub fn location(&self) -> Vec3 {
        self.location
    }

    pub fn set_location(&mut self, location: Vec3) {
        self.location = location;
    }

    /// Body-fixed XYZ Euler angles of the geometry in the attached frame.
    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.orientation = orientation;
    }

    pub fn display_preference(&self) -> DisplayPreference {
        self.display_preference
    }

    pub fn set_display_preference(&mut self, pref: DisplayPreference) {
        self.display_preference = pref;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the display color. Channels outside `[0, 1]` are rejected, the
    /// same as when read from a document.
    pub fn set_color(&mut self, color: Color) -> Result<()> {
        if !color.is_normalized() {
            return Err(ContactGeometryError::InvalidProperty {
                property: property::COLOR.to_string(),
                value: property::format_f64_list(&color.channels()),
                reason: "color channels must lie in [0, 1]".to_string(),
            });
        }
        self.color = color;
        Ok(())
    }

    /// The frame this geometry is attached to.
    pub fn frame(&self) -> Result<Rc<PhysicalFrame>> {
        self.frame.frame().map_err(|e| self.unresolved(e))
    }

    /// Attach to `frame`, replacing any previous attachment.
    pub fn set_frame(&mut self, frame: &Rc<PhysicalFrame>) {
        self.frame.connect_to(frame);
    }

    /// Path of the attached frame, absolute or relative to this geometry.
    pub fn frame_name(&self) -> &str {
        self.frame.connectee_name()
    }

    /// Attach by path. Takes effect at the next [`connect`](Self::connect).
    pub fn set_frame_name(&mut self, name: &str) {
        self.frame.set_connectee_name(name);
    }

    /// Whether the frame reference currently resolves.
    pub fn is_connected(&self) -> bool {
        self.frame.is_connected()
    }

    /// Resolve the frame path through `graph`.
    pub fn connect(&mut self, graph: &FrameGraph) -> Result<Rc<PhysicalFrame>> {
        let owner = self.path();
        self.frame.connect(graph, &owner).map_err(|e| self.unresolved(e))
    }

    fn unresolved(&self, err: FrameError) -> ContactGeometryError {
        match err {
            FrameError::Unresolved { connectee } => ContactGeometryError::UnresolvedReference {
                geometry: self.name.clone(),
                connectee,
            },
            FrameError::NotFound(path) => ContactGeometryError::UnresolvedReference {
                geometry: self.name.clone(),
                connectee: path,
            },
            other => ContactGeometryError::Frame(other),
        }
    }

    /// Pose of the geometry in its attached frame, `X_FP`.
    pub fn transform_in_frame(&self) -> Transform {
        Transform::from_euler_xyz(&self.orientation, self.location)
    }

    /// Pose of the geometry in the base frame `B` of its attached frame `F`:
    /// `X_BF * X_FP`.
    ///
    /// Nothing is cached; moving the frame is visible on the next call.
    pub fn find_transform_in_base_frame(&self) -> Result<Transform> {
        let frame = self.frame()?;
        Ok(frame.find_transform_in_base_frame() * self.transform_in_frame())
    }

    /// Name of the base (body or ground) frame the geometry is fixed to.
    pub fn base_frame_name(&self) -> Result<String> {
        let frame = self.frame()?;
        Ok(frame.find_base_frame().name().to_string())
    }

    /// Per-axis factors `scale_set` holds for this geometry's base body.
    pub fn scale_factors(&self, scale_set: &ScaleSet) -> Result<Option<Vec3>> {
        let body = self.base_frame_name()?;
        Ok(scale_set.factors_for(&body))
    }

    /// Append the persisted properties of this geometry, current schema only.
    pub fn write_properties(&self, out: &mut PropertyList) {
        out.push((property::SOCKET_FRAME, self.frame_name().to_string()));
        out.push((property::LOCATION, property::format_vec3(&self.location)));
        out.push((property::ORIENTATION, property::format_vec3(&self.orientation)));
        out.push((
            property::DISPLAY_PREFERENCE,
            self.display_preference.as_i32().to_string(),
        ));
        out.push((property::COLOR, property::format_f64_list(&self.color.channels())));
    }

    /// Set one persisted property from text. Returns `false` for names this
    /// type does not own.
    pub fn read_property(&mut self, name: &str, raw: &str) -> Result<bool> {
        match name {
            property::SOCKET_FRAME => self.set_frame_name(raw.trim()),
            property::LOCATION => self.location = property::parse_vec3(name, raw)?,
            property::ORIENTATION => self.orientation = property::parse_vec3(name, raw)?,
            property::DISPLAY_PREFERENCE => {
                let value = property::parse_i32(name, raw)?;
                self.display_preference = DisplayPreference::try_from(value)?;
            }
            property::COLOR => self.set_color(Color(property::parse_f64_array::<3>(name, raw)?))?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
