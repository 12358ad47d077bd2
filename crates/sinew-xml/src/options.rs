//! Loader configuration.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How strictly documents are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Fail on property elements no shape recognises instead of logging a
    /// warning and skipping them.
    #[serde(default)]
    pub strict_properties: bool,
    /// Read mesh files referenced by `ContactMesh` while loading.
    #[serde(default = "default_load_meshes")]
    pub load_meshes: bool,
    /// Directory relative mesh files are read from. Unset means the process
    /// working directory; file loaders fill it with the document's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
}

fn default_load_meshes() -> bool {
    true
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            strict_properties: false,
            load_meshes: default_load_meshes(),
            base_dir: None,
        }
    }
}

impl LoadOptions {
    /// Options that reject unknown properties.
    pub fn strict() -> Self {
        Self {
            strict_properties: true,
            ..Self::default()
        }
    }

    /// These options for a document stored at `path`: an unset `base_dir`
    /// becomes the document's directory.
    pub fn for_document(&self, path: &Path) -> Self {
        let mut options = self.clone();
        if options.base_dir.is_none() {
            options.base_dir = path.parent().map(Path::to_path_buf);
        }
        options
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
