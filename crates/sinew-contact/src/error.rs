//! Error types for sinew-contact.

use sinew_frame::FrameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactGeometryError {
    #[error("contact geometry `{geometry}` is not attached to a frame (connectee: `{connectee}`)")]
    UnresolvedReference { geometry: String, connectee: String },

    #[error("`{operation}` is not implemented for abstract type `{kind}`")]
    NotImplemented {
        kind: String,
        operation: &'static str,
    },

    #[error("unknown contact geometry type `{0}`")]
    UnknownShape(String),

    #[error("invalid value {value} for `{property}` (expected one of {expected})")]
    InvalidEnumValue {
        property: &'static str,
        value: i64,
        expected: &'static str,
    },

    #[error("invalid value `{value}` for `{property}`: {reason}")]
    InvalidProperty {
        property: String,
        value: String,
        reason: String,
    },

    #[error("failed to load mesh `{path}`: {reason}")]
    MeshLoad { path: String, reason: String },

    #[error("scale set parse error: {0}")]
    ScaleSet(#[from] serde_json::Error),

    #[error(transparent)]
    Frame(#[from] FrameError),
}

pub type Result<T> = std::result::Result<T, ContactGeometryError>;
