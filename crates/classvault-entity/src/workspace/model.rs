//! Workspace root container.

use classvault_core::types::FolderId;
use serde::{Deserialize, Serialize};

use crate::folder::Folder;

/// The root of one actor's tree.
///
/// Replaced wholesale on every refresh; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// The branch-root folder that contains everything.
    pub root_folder: Folder,
    /// Top-level folders.
    pub folders: Vec<Folder>,
}

impl Workspace {
    /// Whether a folder is a direct child of the workspace.
    pub fn is_top_level(&self, folder_id: &FolderId) -> bool {
        self.folders.iter().any(|f| &f.id == folder_id)
    }
}
