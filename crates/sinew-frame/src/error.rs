//! Error types for sinew-frame.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame reference is not connected (connectee: `{connectee}`)")]
    Unresolved { connectee: String },

    #[error("no frame at path `{0}`")]
    NotFound(String),

    #[error("a frame already exists at path `{0}`")]
    DuplicatePath(String),

    #[error("invalid component path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("frame `{0}` is a base frame and has no offset transform")]
    NotAnOffsetFrame(String),
}

pub type Result<T> = std::result::Result<T, FrameError>;
