//! Non-owning reference from a component to the frame it is attached to.

use crate::{ComponentPath, FrameError, FrameGraph, PhysicalFrame, Result};
use std::rc::{Rc, Weak};
use tracing::debug;

/// Frame reference held by a component.
///
/// The socket always stores the connectee path, which is what gets persisted.
/// Connecting records a weak handle to the resolved frame; the frame graph
/// stays the owner.
#[derive(Debug, Clone, Default)]
pub struct FrameSocket {
    connectee_name: String,
    connected: Option<Weak<PhysicalFrame>>,
}

impl FrameSocket {
    /// An unset socket.
    pub fn new() -> Self {
        Self::default()
    }

    /// A socket bound to `frame`.
    pub fn attached_to(frame: &Rc<PhysicalFrame>) -> Self {
        let mut socket = Self::new();
        socket.connect_to(frame);
        socket
    }

    /// Path (absolute or relative) of the frame this socket refers to.
    pub fn connectee_name(&self) -> &str {
        &self.connectee_name
    }

    /// Point the socket at a new path. Any existing connection is dropped and
    /// must be re-established with [`connect`](Self::connect).
    pub fn set_connectee_name(&mut self, name: impl Into<String>) {
        self.connectee_name = name.into();
        self.connected = None;
    }

    /// Bind directly to a frame, replacing any previous binding. The stored
    /// path becomes the frame's absolute path.
    pub fn connect_to(&mut self, frame: &Rc<PhysicalFrame>) {
        self.connectee_name = frame.path().to_string();
        self.connected = Some(Rc::downgrade(frame));
    }

    /// Resolve the stored path through `graph`, as seen from the component at
    /// `owner`, and bind to the result.
    pub fn connect(&mut self, graph: &FrameGraph, owner: &ComponentPath) -> Result<Rc<PhysicalFrame>> {
        if self.connectee_name.is_empty() {
            return Err(FrameError::Unresolved {
                connectee: String::new(),
            });
        }
        let frame = graph.resolve(&self.connectee_name, owner)?;
        debug!(owner = %owner, connectee = %self.connectee_name, frame = %frame.path(), "connected frame socket");
        self.connected = Some(Rc::downgrade(&frame));
        Ok(frame)
    }

    /// Whether the socket holds a live frame.
    pub fn is_connected(&self) -> bool {
        self.connected
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// The connected frame.
    ///
    /// Fails if the socket was never connected or the frame has since been
    /// dropped along with its graph.
    pub fn frame(&self) -> Result<Rc<PhysicalFrame>> {
        self.connected
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or_else(|| FrameError::Unresolved {
                connectee: self.connectee_name.clone(),
            })
    }
}
