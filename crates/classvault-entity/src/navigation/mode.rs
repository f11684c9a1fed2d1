//! Browser view modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the browser is currently showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// The workspace root.
    #[default]
    Structure,
    /// The contents of one folder.
    Folder,
    /// Search results.
    Search,
    /// Recently uploaded files.
    Recent,
    /// Workspace statistics.
    Stats,
}

impl ViewMode {
    /// Whether the mode sits on top of a structure/folder view and returns
    /// to it when closed.
    pub fn is_overlay(&self) -> bool {
        matches!(self, Self::Search | Self::Recent | Self::Stats)
    }

    /// Return the mode as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Folder => "folder",
            Self::Search => "search",
            Self::Recent => "recent",
            Self::Stats => "stats",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
