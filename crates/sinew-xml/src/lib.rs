//! Versioned XML persistence for sinew contact geometry.
//!
//! Loading goes through three stages: the raw [`XmlNode`] tree read by
//! quick-xml, the node after [`migrate`] has rewritten legacy layouts into the
//! current schema, and finally a [`ContactShape`](sinew_contact::ContactShape)
//! whose properties are populated from the migrated node.

mod document;
mod migrate;
mod node;
mod options;
mod reader;

pub use document::{
    DOCUMENT_TAG, GEOMETRY_SET_TAG, load_file, load_shape, load_str, save, to_xml_string,
};
pub use migrate::{CURRENT_VERSION, MIGRATIONS, MigrationStep, migrate};
pub use node::XmlNode;
pub use options::LoadOptions;
pub use reader::parse_str;

use sinew_contact::ContactGeometryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("{node} has schema version {version}, newer than supported version {supported}")]
    UnsupportedSchema {
        node: String,
        version: u32,
        supported: u32,
    },

    #[error("{node} has unknown property `{property}`")]
    UnknownProperty { node: String, property: String },

    #[error("{node}: {source}")]
    Shape {
        node: String,
        source: ContactGeometryError,
    },

    #[error(transparent)]
    Contact(#[from] ContactGeometryError),

    #[error("invalid load options: {0}")]
    Options(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, XmlError>;
