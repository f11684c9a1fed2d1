//! File domain entities.

pub mod asset;
pub mod model;

pub use asset::{AssetSource, PickedAsset};
pub use model::{File, Thumbnail};
