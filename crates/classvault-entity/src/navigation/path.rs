//! Breadcrumb entries.

use classvault_core::types::FolderId;
use serde::{Deserialize, Serialize};

/// One step of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavigationPathEntry {
    /// Folder descended into.
    pub folder_id: FolderId,
    /// Its name at the time of descent.
    pub folder_name: String,
}

impl NavigationPathEntry {
    /// Create a new entry.
    pub fn new(folder_id: impl Into<FolderId>, folder_name: impl Into<String>) -> Self {
        Self {
            folder_id: folder_id.into(),
            folder_name: folder_name.into(),
        }
    }
}
