//! Folder entity model.

use chrono::{DateTime, Utc};
use classvault_core::format::format_bytes;
use classvault_core::types::FolderId;
use serde::{Deserialize, Serialize};

use super::kind::FolderKind;
use crate::navigation::NavigationPathEntry;
use crate::permission::PermissionFlags;

/// A folder node in the remote tree.
///
/// Folders carry no parent pointer: parentage exists only in the client's
/// navigation stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Opaque folder identifier.
    pub id: FolderId,
    /// Folder name (already decoded).
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The role of the folder.
    pub kind: FolderKind,
    /// Number of files directly inside.
    pub file_count: u64,
    /// Total size of contained files in bytes.
    pub total_size: u64,
    /// Server-suggested accent color.
    pub color_hint: Option<String>,
    /// Whether the folder grants management rights to everyone who sees it.
    pub can_manage: bool,
    /// Display name of the creator.
    pub creator_name: Option<String>,
    /// Legacy creator name field, still sent by older endpoints.
    pub created_by_name: Option<String>,
    /// Opaque id of the creator.
    pub creator_id: Option<String>,
    /// When the folder was created.
    pub created_at: Option<DateTime<Utc>>,
    /// Per-item permission flags declared by the server.
    pub permissions: PermissionFlags,
}

impl Folder {
    /// Create a folder with just an id and a name; everything else defaulted.
    pub fn new(id: impl Into<FolderId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            kind: FolderKind::Custom,
            file_count: 0,
            total_size: 0,
            color_hint: None,
            can_manage: false,
            creator_name: None,
            created_by_name: None,
            creator_id: None,
            created_at: None,
            permissions: PermissionFlags::default(),
        }
    }

    /// The breadcrumb entry pushed when descending into this folder.
    pub fn path_entry(&self) -> NavigationPathEntry {
        NavigationPathEntry::new(self.id.clone(), self.name.clone())
    }

    /// Every creator name the server sent, in priority order.
    pub fn creator_names(&self) -> impl Iterator<Item = &str> {
        [self.creator_name.as_deref(), self.created_by_name.as_deref()]
            .into_iter()
            .flatten()
    }

    /// Human-readable total size.
    pub fn display_size(&self) -> String {
        format_bytes(self.total_size)
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Parent folder (None for the workspace root).
    pub parent_id: Option<FolderId>,
    /// Folder name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}
