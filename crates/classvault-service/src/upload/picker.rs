//! Native asset picker seam.

use async_trait::async_trait;

use classvault_core::result::AppResult;
use classvault_entity::file::{AssetSource, PickedAsset};

/// Lets the user choose an asset from a source.
///
/// `Ok(None)` means the user cancelled.
#[async_trait]
pub trait AssetPicker: Send + Sync + std::fmt::Debug + 'static {
    /// Opens the picker for `source`.
    async fn pick(&self, source: AssetSource) -> AppResult<Option<PickedAsset>>;
}
