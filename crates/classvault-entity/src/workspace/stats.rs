//! Workspace statistics.

use classvault_core::format::{FileCategory, format_bytes};
use serde::{Deserialize, Serialize};

/// Number of files in one display category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category.
    pub category: FileCategory,
    /// How many files fall into it.
    pub count: u64,
}

/// Aggregate numbers for the whole workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceStats {
    /// Total number of files.
    pub total_files: u64,
    /// Total number of folders.
    pub total_folders: u64,
    /// Total size in bytes.
    pub total_size_bytes: u64,
    /// Size as pre-formatted by the server.
    pub total_size_formatted: Option<String>,
    /// File counts per category.
    pub files_by_category: Vec<CategoryCount>,
}

impl WorkspaceStats {
    /// Server-formatted total size, falling back to the local formatter.
    pub fn display_size(&self) -> String {
        self.total_size_formatted
            .clone()
            .unwrap_or_else(|| format_bytes(self.total_size_bytes))
    }
}
