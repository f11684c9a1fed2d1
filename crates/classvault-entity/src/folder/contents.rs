//! Listing of a single folder.

use serde::{Deserialize, Serialize};

use super::model::Folder;
use crate::file::File;

/// What the server returns for one folder: the folder itself and its
/// direct children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderContents {
    /// The folder being listed.
    pub folder: Folder,
    /// Direct sub-folders.
    pub folders: Vec<Folder>,
    /// Direct files.
    pub files: Vec<File>,
}
