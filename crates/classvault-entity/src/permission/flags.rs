//! Canonical per-item permission flags.

use serde::{Deserialize, Serialize};

use super::action::PermissionAction;

/// Flags the server declared for one item, normalized from whichever
/// payload shape it used. `None` means the server said nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionFlags {
    /// Whether the user may upload into the folder.
    pub can_upload: Option<bool>,
    /// Whether the user may create sub-folders.
    pub can_create_folder: Option<bool>,
    /// Whether the user may delete the item.
    pub can_delete: Option<bool>,
}

impl PermissionFlags {
    /// The declared flag for an action.
    pub fn declared(&self, action: PermissionAction) -> Option<bool> {
        match action {
            PermissionAction::Upload => self.can_upload,
            PermissionAction::CreateFolder => self.can_create_folder,
            PermissionAction::Delete => self.can_delete,
        }
    }

    /// Whether the server declared anything at all.
    pub fn is_empty(&self) -> bool {
        self.can_upload.is_none() && self.can_create_folder.is_none() && self.can_delete.is_none()
    }
}
