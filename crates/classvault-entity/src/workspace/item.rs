//! Items shown in a listing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::file::File;
use crate::folder::Folder;

/// Whether an item is a folder or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A folder node.
    Folder,
    /// A file leaf.
    File,
}

impl ItemKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A folder or a file the user acted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BrowserItem {
    /// A folder.
    Folder(Folder),
    /// A file.
    File(File),
}

impl BrowserItem {
    /// The item's kind.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Folder(_) => ItemKind::Folder,
            Self::File(_) => ItemKind::File,
        }
    }

    /// The raw identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::Folder(folder) => folder.id.as_str(),
            Self::File(file) => file.id.as_str(),
        }
    }

    /// The display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(folder) => &folder.name,
            Self::File(file) => &file.name,
        }
    }
}
