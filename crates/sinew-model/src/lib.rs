//! Model container for sinew.
//!
//! A [`Model`] owns the frame graph and the contact geometry attached to it.
//! It runs the connection phase that resolves every geometry's frame path,
//! the scaling pass, and exports [`SolverGeometry`] for a contact solver.

pub mod model;

pub use model::{Model, ModelBuilder, SolverGeometry};

use sinew_contact::ContactGeometryError;
use sinew_frame::FrameError;
use sinew_xml::XmlError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Contact(#[from] ContactGeometryError),

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error("contact geometry `{0}` already exists")]
    DuplicateGeometry(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
