//! Browser behaviour configuration.

use serde::{Deserialize, Serialize};

/// Tunables for navigation, search, and uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Number of entries requested for the recent-files view.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
    /// Largest asset accepted for upload, in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: u64,
    /// Minimum trimmed query length before a search is sent.
    #[serde(default = "default_min_search")]
    pub min_search_length: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            max_upload_bytes: default_max_upload(),
            min_search_length: default_min_search(),
        }
    }
}

fn default_recent_limit() -> u32 {
    20
}

fn default_max_upload() -> u64 {
    50 * 1024 * 1024
}

fn default_min_search() -> usize {
    1
}
