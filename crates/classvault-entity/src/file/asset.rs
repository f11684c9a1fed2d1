//! Assets obtained from the device pickers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an upload asset is acquired from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetSource {
    /// Take a new photo or video.
    Camera,
    /// Pick from the photo library.
    Library,
    /// Pick an arbitrary document.
    Document,
}

impl AssetSource {
    /// All sources in the order they are offered to the user.
    pub const ALL: [AssetSource; 3] = [Self::Camera, Self::Library, Self::Document];

    /// Label shown in the source chooser.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Camera => "Take Photo",
            Self::Library => "Choose from Library",
            Self::Document => "Choose Document",
        }
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An asset returned by a picker, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedAsset {
    /// Local URI or path of the asset.
    pub uri: String,
    /// MIME type reported by the picker.
    pub mime_type: String,
    /// Name to upload under.
    pub display_name: String,
    /// Size in bytes, when the picker reports it.
    pub size_bytes: Option<u64>,
}
