//! Search results.

use serde::{Deserialize, Serialize};

use crate::file::File;
use crate::folder::Folder;

/// Matches for a search query across the whole workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// The query as sent.
    pub query: String,
    /// Matching folders.
    pub folders: Vec<Folder>,
    /// Matching files.
    pub files: Vec<File>,
}

impl SearchResults {
    /// Total number of matches.
    pub fn total(&self) -> usize {
        self.folders.len() + self.files.len()
    }
}
