//! Folder domain entities.

pub mod contents;
pub mod kind;
pub mod model;

pub use contents::FolderContents;
pub use kind::FolderKind;
pub use model::{CreateFolder, Folder};
