//! File upload CLI command.

use std::path::PathBuf;

use clap::Args;

use classvault_core::result::AppResult;
use classvault_service::WorkspaceBrowser;

use crate::output::{self, OutputFormat};
use crate::picker::asset_from_path;

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: PathBuf,

    /// Target folder ID (omit for the workspace root)
    #[arg(short, long)]
    pub folder: Option<String>,

    /// Override file name
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Execute the upload command
pub async fn execute(
    browser: &WorkspaceBrowser,
    args: &UploadArgs,
    format: OutputFormat,
) -> AppResult<()> {
    let mut asset = asset_from_path(&args.file).await?;
    if let Some(name) = &args.name {
        asset.display_name = name.clone();
    }

    super::open_at(browser, args.folder.as_deref()).await?;
    let receipt = browser.perform_upload(asset).await?;
    output::print_success(&format!(
        "File '{}' uploaded to {} (id: {}, size: {})",
        receipt.file.name,
        receipt.location,
        receipt.file.id,
        receipt.file.display_size()
    ));
    if format == OutputFormat::Json {
        output::print_item(&receipt.file, format);
    }

    receipt.acknowledge(browser.navigation()).await?;
    Ok(())
}
