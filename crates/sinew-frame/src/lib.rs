//! Physical frames and frame references for sinew.
//!
//! A [`FrameGraph`] owns every [`PhysicalFrame`] of a model: the ground, one
//! base frame per body, and rigid offset frames hanging off either. Components
//! that attach to a frame never own it; they hold a [`FrameSocket`], which
//! stores the frame's component path and, once connected, a weak handle.

pub mod error;
pub mod frame;
pub mod graph;
pub mod path;
pub mod socket;

pub use error::{FrameError, Result};
pub use frame::{FrameKind, PhysicalFrame};
pub use graph::FrameGraph;
pub use path::ComponentPath;
pub use socket::FrameSocket;
