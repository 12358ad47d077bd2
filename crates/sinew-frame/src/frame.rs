//! Physical frame definition.

use crate::{ComponentPath, FrameError, Result};
use sinew_math::Transform;
use std::cell::Cell;
use std::rc::Rc;

/// What a frame is attached to.
#[derive(Debug)]
pub enum FrameKind {
    /// The model's ground frame.
    Ground,
    /// A rigid body's own frame. Bodies are base frames.
    Body,
    /// A frame rigidly offset from a parent frame.
    Offset {
        /// Frame this one is fixed to.
        parent: Rc<PhysicalFrame>,
        /// Pose of this frame in the parent, `X_PF`.
        offset: Cell<Transform>,
    },
}

/// A rigid coordinate system attached to a body (or to ground).
#[derive(Debug)]
pub struct PhysicalFrame {
    name: String,
    path: ComponentPath,
    kind: FrameKind,
}

impl PhysicalFrame {
    pub(crate) fn new(name: &str, path: ComponentPath, kind: FrameKind) -> Self {
        Self {
            name: name.to_string(),
            path,
            kind,
        }
    }

    /// Component name of the frame.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute component path of the frame.
    pub fn path(&self) -> &ComponentPath {
        &self.path
    }

    /// Frame kind.
    pub fn kind(&self) -> &FrameKind {
        &self.kind
    }

    /// The base (ground or body) frame this frame is ultimately fixed to.
    pub fn find_base_frame(&self) -> &PhysicalFrame {
        match &self.kind {
            FrameKind::Offset { parent, .. } => parent.find_base_frame(),
            FrameKind::Ground | FrameKind::Body => self,
        }
    }

    /// Pose of this frame in its base frame, `X_BF`.
    ///
    /// Offsets are read on every call, so a frame moved with
    /// [`set_offset_transform`](Self::set_offset_transform) is seen immediately.
    pub fn find_transform_in_base_frame(&self) -> Transform {
        match &self.kind {
            FrameKind::Ground | FrameKind::Body => Transform::identity(),
            FrameKind::Offset { parent, offset } => {
                parent.find_transform_in_base_frame() * offset.get()
            }
        }
    }

    /// Pose of this frame in its parent, for offset frames.
    pub fn offset_transform(&self) -> Option<Transform> {
        match &self.kind {
            FrameKind::Offset { offset, .. } => Some(offset.get()),
            FrameKind::Ground | FrameKind::Body => None,
        }
    }

    /// Move an offset frame relative to its parent.
    pub fn set_offset_transform(&self, xform: Transform) -> Result<()> {
        match &self.kind {
            FrameKind::Offset { offset, .. } => {
                offset.set(xform);
                Ok(())
            }
            FrameKind::Ground | FrameKind::Body => {
                Err(FrameError::NotAnOffsetFrame(self.path.to_string()))
            }
        }
    }
}
