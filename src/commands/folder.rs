//! Folder creation and item deletion CLI commands.

use clap::Args;

use classvault_core::error::AppError;
use classvault_core::result::AppResult;
use classvault_entity::workspace::{BrowserItem, ItemKind};
use classvault_service::WorkspaceBrowser;

use crate::output::{self, OutputFormat};

/// Arguments for the mkdir command
#[derive(Debug, Args)]
pub struct MkdirArgs {
    /// Folder name
    pub name: String,

    /// Parent folder ID (omit for the workspace root)
    #[arg(short, long)]
    pub parent: Option<String>,
}

/// Arguments for the rm command
#[derive(Debug, Args)]
pub struct RmArgs {
    /// ID of the folder or file
    pub id: String,

    /// The ID names a folder
    #[arg(long)]
    pub folder: bool,

    /// Folder that contains the item (omit for the workspace root)
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Create a folder
pub async fn mkdir(
    browser: &WorkspaceBrowser,
    args: &MkdirArgs,
    format: OutputFormat,
) -> AppResult<()> {
    super::open_at(browser, args.parent.as_deref()).await?;
    let folder = browser.perform_create_folder(&args.name).await?;
    output::print_success(&format!("Folder '{}' created (id: {})", folder.name, folder.id));
    if format == OutputFormat::Json {
        output::print_item(&folder, format);
    }
    Ok(())
}

/// Delete a folder or file
pub async fn rm(browser: &WorkspaceBrowser, args: &RmArgs) -> AppResult<()> {
    super::open_at(browser, args.parent.as_deref()).await?;

    let wanted = if args.folder {
        ItemKind::Folder
    } else {
        ItemKind::File
    };
    let item = browser
        .current_view()
        .items()
        .into_iter()
        .find(|item| item.id() == args.id && item.kind() == wanted)
        .ok_or_else(|| {
            AppError::validation(format!(
                "No {} with id '{}' here; pass --parent to point at its folder",
                wanted, args.id
            ))
        })?;

    if !args.yes && !confirm_delete(&item)? {
        output::print_warning("Delete cancelled");
        return Ok(());
    }

    browser.perform_delete(&item).await?;
    output::print_success(&format!("Deleted {} '{}'", item.kind(), item.name()));
    Ok(())
}

/// Ask before deleting.
pub fn confirm_delete(item: &BrowserItem) -> AppResult<bool> {
    let prompt = match item {
        BrowserItem::Folder(_) => format!(
            "Delete folder '{}' and everything inside it?",
            item.name()
        ),
        BrowserItem::File(_) => format!("Delete file '{}'?", item.name()),
    };
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}
