//! Actions checked by the permission resolver.

use serde::{Deserialize, Serialize};

/// Mutating actions a user can attempt from the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// Upload a file into a folder.
    Upload,
    /// Create a sub-folder.
    CreateFolder,
    /// Delete a folder or a file.
    Delete,
}

impl PermissionAction {
    /// Return the action as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::CreateFolder => "create_folder",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
