//! Frame graph: owns frames and resolves component paths to them.

use crate::{ComponentPath, FrameError, FrameKind, PhysicalFrame, Result};
use sinew_math::Transform;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Name of the ground frame under the model root.
pub const GROUND_NAME: &str = "ground";
/// Container under which body frames live.
pub const BODYSET: &str = "bodyset";

/// Owner of every frame in a model.
///
/// Frames are shared through `Rc`; components keep `Weak` handles, so the
/// graph is the single owner of frame lifetimes.
#[derive(Debug)]
pub struct FrameGraph {
    frames: Vec<Rc<PhysicalFrame>>,
    index: HashMap<ComponentPath, usize>,
}

impl FrameGraph {
    /// Create a graph holding only the ground frame at `/ground`.
    pub fn new() -> Self {
        let mut graph = Self {
            frames: Vec::new(),
            index: HashMap::new(),
        };
        let ground = PhysicalFrame::new(
            GROUND_NAME,
            ComponentPath::from_elements([GROUND_NAME]),
            FrameKind::Ground,
        );
        graph.frames.push(Rc::new(ground));
        graph
            .index
            .insert(ComponentPath::from_elements([GROUND_NAME]), 0);
        graph
    }

    /// The ground frame.
    pub fn ground(&self) -> Rc<PhysicalFrame> {
        Rc::clone(&self.frames[0])
    }

    /// Add a body frame at `/bodyset/<name>`.
    pub fn add_body(&mut self, name: &str) -> Result<Rc<PhysicalFrame>> {
        let path = ComponentPath::from_elements([BODYSET, name]);
        self.insert(PhysicalFrame::new(name, path, FrameKind::Body))
    }

    /// Add a frame rigidly offset from `parent`, at `<parent path>/<name>`.
    ///
    /// `offset` is the pose of the new frame in the parent, `X_PF`.
    pub fn add_offset_frame(
        &mut self,
        name: &str,
        parent: &Rc<PhysicalFrame>,
        offset: Transform,
    ) -> Result<Rc<PhysicalFrame>> {
        let owned = self
            .get(parent.path())
            .is_some_and(|known| Rc::ptr_eq(&known, parent));
        if !owned {
            return Err(FrameError::NotFound(parent.path().to_string()));
        }
        let path = parent.path().child(name);
        let kind = FrameKind::Offset {
            parent: Rc::clone(parent),
            offset: Cell::new(offset),
        };
        self.insert(PhysicalFrame::new(name, path, kind))
    }

    fn insert(&mut self, frame: PhysicalFrame) -> Result<Rc<PhysicalFrame>> {
        let name = frame.name();
        if name.is_empty() || name.contains('/') || name.chars().any(char::is_whitespace) {
            return Err(FrameError::InvalidPath {
                path: frame.path().to_string(),
                reason: format!("`{}` is not a valid frame name", name),
            });
        }
        if self.index.contains_key(frame.path()) {
            return Err(FrameError::DuplicatePath(frame.path().to_string()));
        }
        debug!(path = %frame.path(), "adding frame");
        let frame = Rc::new(frame);
        self.index.insert(frame.path().clone(), self.frames.len());
        self.frames.push(Rc::clone(&frame));
        Ok(frame)
    }

    /// Look up a frame by absolute path.
    pub fn get(&self, path: &ComponentPath) -> Option<Rc<PhysicalFrame>> {
        self.index.get(path).map(|&i| Rc::clone(&self.frames[i]))
    }

    /// Look up a frame by absolute path string.
    pub fn find(&self, path: &str) -> Result<Rc<PhysicalFrame>> {
        let parsed = ComponentPath::parse(path)?;
        if !parsed.is_absolute() {
            return Err(FrameError::InvalidPath {
                path: path.to_string(),
                reason: "expected an absolute path".to_string(),
            });
        }
        self.get(&parsed.normalize()?)
            .ok_or_else(|| FrameError::NotFound(path.to_string()))
    }

    /// Resolve a connectee path as seen from the component at `owner`.
    pub fn resolve(&self, connectee: &str, owner: &ComponentPath) -> Result<Rc<PhysicalFrame>> {
        let target = ComponentPath::parse(connectee)?;
        let absolute = owner.resolve(&target)?;
        self.get(&absolute)
            .ok_or_else(|| FrameError::NotFound(absolute.to_string()))
    }

    /// All frames, ground first, in insertion order.
    pub fn frames(&self) -> impl Iterator<Item = &Rc<PhysicalFrame>> {
        self.frames.iter()
    }

    /// Body frames only.
    pub fn bodies(&self) -> impl Iterator<Item = &Rc<PhysicalFrame>> {
        self.frames
            .iter()
            .filter(|f| matches!(f.kind(), FrameKind::Body))
    }

    /// Number of frames, including ground.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// A graph always holds ground, so this is never true.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Default for FrameGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sinew_math::Vec3;

    #[test]
    fn test_new_graph_has_ground() {
        let graph = FrameGraph::new();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.ground().path().to_string(), "/ground");
        assert!(graph.find("/ground").is_ok());
    }

    #[test]
    fn test_body_and_offset_paths() {
        let mut graph = FrameGraph::new();
        let tibia = graph.add_body("tibia_r").unwrap();
        let ankle = graph
            .add_offset_frame("ankle", &tibia, Transform::from_translation(Vec3::y()))
            .unwrap();
        assert_eq!(tibia.path().to_string(), "/bodyset/tibia_r");
        assert_eq!(ankle.path().to_string(), "/bodyset/tibia_r/ankle");
        assert_eq!(graph.bodies().count(), 1);
        assert!(Rc::ptr_eq(&graph.find("/bodyset/tibia_r/ankle").unwrap(), &ankle));
    }

    #[test]
    fn test_duplicate_body_rejected() {
        let mut graph = FrameGraph::new();
        graph.add_body("pelvis").unwrap();
        assert!(matches!(
            graph.add_body("pelvis"),
            Err(FrameError::DuplicatePath(_))
        ));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let mut graph = FrameGraph::new();
        assert!(graph.add_body("").is_err());
        assert!(graph.add_body("a/b").is_err());
    }

    #[test]
    fn test_offset_requires_owned_parent() {
        let mut graph = FrameGraph::new();
        let mut other = FrameGraph::new();
        let foreign = other.add_body("stranger").unwrap();
        assert!(matches!(
            graph.add_offset_frame("x", &foreign, Transform::identity()),
            Err(FrameError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let mut graph = FrameGraph::new();
        let calcn = graph.add_body("calcn_r").unwrap();
        let owner = ComponentPath::parse("/contactgeometryset/heel").unwrap();

        let rel = graph.resolve("../../bodyset/calcn_r", &owner).unwrap();
        assert!(Rc::ptr_eq(&rel, &calcn));

        let abs = graph.resolve("/bodyset/calcn_r", &owner).unwrap();
        assert!(Rc::ptr_eq(&abs, &calcn));

        assert!(matches!(
            graph.resolve("/bodyset/missing", &owner),
            Err(FrameError::NotFound(p)) if p == "/bodyset/missing"
        ));
    }

    #[test]
    fn test_offset_on_ground() {
        let mut graph = FrameGraph::new();
        let ground = graph.ground();
        let marker = graph
            .add_offset_frame("marker", &ground, Transform::from_translation(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();
        assert_relative_eq!(
            marker.find_transform_in_base_frame().pos,
            Vec3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(marker.find_base_frame().name(), "ground");
    }
}
