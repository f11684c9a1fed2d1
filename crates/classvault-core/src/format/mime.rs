//! MIME-type derived presentation hints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display category of a file, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Raster or vector images.
    Image,
    /// Video clips.
    Video,
    /// Audio recordings.
    Audio,
    /// PDF documents.
    Pdf,
    /// Word-processor documents.
    Document,
    /// Spreadsheets.
    Spreadsheet,
    /// Slide decks.
    Presentation,
    /// Compressed archives.
    Archive,
    /// Plain text, CSV, source code.
    Text,
    /// Anything else.
    Other,
}

impl FileCategory {
    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Document => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
            Self::Archive => "archive",
            Self::Text => "text",
            Self::Other => "other",
        }
    }

    /// Accent color used when rendering items of this category.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Image => "#E91E63",
            Self::Video => "#9C27B0",
            Self::Audio => "#FF9800",
            Self::Pdf => "#F44336",
            Self::Document => "#2196F3",
            Self::Spreadsheet => "#4CAF50",
            Self::Presentation => "#FF5722",
            Self::Archive => "#795548",
            Self::Text => "#607D8B",
            Self::Other => "#9E9E9E",
        }
    }

    /// Extension shown when the MIME type does not map to a known one.
    fn fallback_extension(&self) -> &'static str {
        match self {
            Self::Image => "img",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Document => "doc",
            Self::Spreadsheet => "sheet",
            Self::Presentation => "slides",
            Self::Archive => "zip",
            Self::Text => "txt",
            Self::Other => "file",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strip parameters (`; charset=...`) and normalize case.
fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Classify a MIME type.
pub fn category_for_mime(mime_type: &str) -> FileCategory {
    let mime = essence(mime_type);

    if mime == "application/pdf" {
        return FileCategory::Pdf;
    }
    if mime.starts_with("image/") {
        return FileCategory::Image;
    }
    if mime.starts_with("video/") {
        return FileCategory::Video;
    }
    if mime.starts_with("audio/") {
        return FileCategory::Audio;
    }
    if mime.contains("spreadsheet") || mime.contains("excel") || mime == "text/csv" {
        return FileCategory::Spreadsheet;
    }
    if mime.contains("presentation") || mime.contains("powerpoint") {
        return FileCategory::Presentation;
    }
    if mime.contains("wordprocessing")
        || mime.contains("msword")
        || mime.contains("opendocument.text")
        || mime == "application/vnd.google-apps.document"
        || mime == "application/rtf"
    {
        return FileCategory::Document;
    }
    if mime.contains("zip")
        || mime.contains("compressed")
        || mime.contains("x-tar")
        || mime.contains("x-7z")
        || mime.contains("x-rar")
    {
        return FileCategory::Archive;
    }
    if mime.starts_with("text/") || mime == "application/json" {
        return FileCategory::Text;
    }
    FileCategory::Other
}

/// Derive a short lowercase extension for display badges.
///
/// Office and Google Workspace types are mapped explicitly; everything
/// else goes through `mime_guess`, falling back to a category default.
pub fn extension_for_mime(mime_type: &str) -> String {
    let mime = essence(mime_type);

    let known = match mime.as_str() {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => Some("docx"),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some("xlsx"),
        "application/vnd.openxmlformats-officedocument.presentationml.presentation" => Some("pptx"),
        "application/msword" => Some("doc"),
        "application/vnd.ms-excel" => Some("xls"),
        "application/vnd.ms-powerpoint" => Some("ppt"),
        "application/vnd.google-apps.document" => Some("gdoc"),
        "application/vnd.google-apps.spreadsheet" => Some("gsheet"),
        "application/vnd.google-apps.presentation" => Some("gslides"),
        "image/jpeg" => Some("jpg"),
        "text/plain" => Some("txt"),
        _ => None,
    };
    if let Some(ext) = known {
        return ext.to_string();
    }
    // Generic binary carries no useful extension.
    if mime == "application/octet-stream" {
        return FileCategory::Other.fallback_extension().to_string();
    }

    mime_guess::get_mime_extensions_str(&mime)
        .and_then(|exts| exts.first())
        .map(|ext| ext.to_string())
        .unwrap_or_else(|| category_for_mime(&mime).fallback_extension().to_string())
}

/// Accent color for a MIME type.
pub fn color_for_mime(mime_type: &str) -> &'static str {
    category_for_mime(mime_type).color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(category_for_mime("application/pdf"), FileCategory::Pdf);
        assert_eq!(category_for_mime("image/png"), FileCategory::Image);
        assert_eq!(category_for_mime("IMAGE/JPEG"), FileCategory::Image);
        assert_eq!(category_for_mime("text/csv"), FileCategory::Spreadsheet);
        assert_eq!(
            category_for_mime("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            FileCategory::Document
        );
        assert_eq!(category_for_mime("text/plain; charset=utf-8"), FileCategory::Text);
        assert_eq!(category_for_mime("application/zip"), FileCategory::Archive);
        assert_eq!(category_for_mime("application/octet-stream"), FileCategory::Other);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(
            extension_for_mime("application/vnd.openxmlformats-officedocument.presentationml.presentation"),
            "pptx"
        );
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
        assert_eq!(extension_for_mime("application/pdf"), "pdf");
        assert_eq!(extension_for_mime("application/x-unknown-thing"), "file");
    }

    #[test]
    fn test_colors_follow_category() {
        assert_eq!(color_for_mime("application/pdf"), FileCategory::Pdf.color());
        assert_eq!(color_for_mime(""), FileCategory::Other.color());
    }
}
