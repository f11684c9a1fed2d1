//! File entity model.

use chrono::{DateTime, Utc};
use classvault_core::format::{self, FileCategory};
use classvault_core::types::FileId;
use serde::{Deserialize, Serialize};

/// Thumbnail metadata attached to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    /// Whether the server generated a thumbnail.
    pub has_thumbnail: bool,
    /// Where to fetch it.
    pub thumbnail_url: Option<String>,
}

/// A file in the remote tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Opaque file identifier.
    pub id: FileId,
    /// File name (already decoded).
    pub name: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Size as pre-formatted by the server.
    pub size_formatted: Option<String>,
    /// Display name of the uploader.
    pub uploaded_by: Option<String>,
    /// Legacy uploader name field, still sent by older endpoints.
    pub uploader_name: Option<String>,
    /// Opaque id of the uploader.
    pub uploader_id: Option<String>,
    /// Link to view the file in a browser.
    pub web_view_link: Option<String>,
    /// Direct download link.
    pub web_content_link: Option<String>,
    /// Thumbnail, when the server reports one.
    pub thumbnail: Option<Thumbnail>,
    /// When the file was uploaded.
    pub created_at: Option<DateTime<Utc>>,
}

impl File {
    /// Create a file with just an id, a name, and a MIME type.
    pub fn new(id: impl Into<FileId>, name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: 0,
            size_formatted: None,
            uploaded_by: None,
            uploader_name: None,
            uploader_id: None,
            web_view_link: None,
            web_content_link: None,
            thumbnail: None,
            created_at: None,
        }
    }

    /// Every uploader name the server sent, in priority order.
    pub fn uploader_names(&self) -> impl Iterator<Item = &str> {
        [self.uploaded_by.as_deref(), self.uploader_name.as_deref()]
            .into_iter()
            .flatten()
    }

    /// Server-formatted size, falling back to the local formatter.
    pub fn display_size(&self) -> String {
        match self.size_formatted.as_deref() {
            Some(formatted) if !formatted.trim().is_empty() => formatted.to_string(),
            _ => format::format_bytes(self.size_bytes),
        }
    }

    /// Display category derived from the MIME type.
    pub fn category(&self) -> FileCategory {
        format::category_for_mime(&self.mime_type)
    }

    /// Extension badge derived from the MIME type, or the name when the
    /// MIME type is unhelpful.
    pub fn extension(&self) -> String {
        let from_mime = format::extension_for_mime(&self.mime_type);
        if from_mime != "file" {
            return from_mime;
        }
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
            .unwrap_or(from_mime)
    }

    /// Accent color derived from the MIME type.
    pub fn color(&self) -> &'static str {
        format::color_for_mime(&self.mime_type)
    }

    /// Thumbnail URL, only when the server says one exists.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail
            .as_ref()
            .filter(|t| t.has_thumbnail)
            .and_then(|t| t.thumbnail_url.as_deref())
    }
}
