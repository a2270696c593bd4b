use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Indentation used when pretty-printing records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    /// One tab per level.
    #[default]
    Tab,
    /// Four spaces per level.
    Spaces,
}

impl Indent {
    /// The bytes emitted for one indentation level.
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Tab => b"\t",
            Self::Spaces => b"    ",
        }
    }
}

/// Configuration for a [`Store`](crate::Store).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root directory holding one subdirectory per collection.
    pub root: PathBuf,
    /// Indentation of written records.
    pub indent: Indent,
    /// Whether to `fsync` the temporary file before renaming it into place.
    pub sync_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            indent: Indent::Tab,
            sync_writes: false,
        }
    }
}

impl StoreConfig {
    /// Default configuration rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }
}
