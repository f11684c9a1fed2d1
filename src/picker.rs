//! Terminal asset picker: every source is a path prompt.

use std::path::Path;

use async_trait::async_trait;

use classvault_core::error::AppError;
use classvault_core::result::AppResult;
use classvault_entity::file::{AssetSource, PickedAsset};
use classvault_service::AssetPicker;

/// Prompts for a local path; an empty answer cancels.
#[derive(Debug, Default)]
pub struct FilesystemPicker;

#[async_trait]
impl AssetPicker for FilesystemPicker {
    async fn pick(&self, source: AssetSource) -> AppResult<Option<PickedAsset>> {
        let prompt = format!("{} (path, empty to cancel)", source.label());
        let answer = tokio::task::spawn_blocking(move || {
            dialoguer::Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
        })
        .await
        .map_err(|e| AppError::internal(format!("Picker task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        asset_from_path(Path::new(answer)).await.map(Some)
    }
}

/// Describes a local file as a picked asset.
pub async fn asset_from_path(path: &Path) -> AppResult<PickedAsset> {
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(AppError::validation(format!(
            "Not a file: {}",
            path.display()
        )));
    }

    let absolute = tokio::fs::canonicalize(path).await?;
    let display_name = absolute
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let mime_type = mime_guess::from_path(&absolute)
        .first_or_octet_stream()
        .to_string();

    Ok(PickedAsset {
        uri: format!("file://{}", absolute.display()),
        mime_type,
        display_name,
        size_bytes: Some(metadata.len()),
    })
}
