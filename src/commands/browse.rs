//! Read-only browsing commands.

use clap::Args;

use classvault_core::result::AppResult;
use classvault_service::WorkspaceBrowser;

use crate::output::{self, OutputFormat};

/// Arguments for the ls command
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Folder ID (omit for the workspace root)
    pub folder_id: Option<String>,
}

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for in folder and file names
    pub query: String,
}

/// Arguments for the recent command
#[derive(Debug, Args)]
pub struct RecentArgs {
    /// Number of files to show (defaults to browser.recent_limit)
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// List the root or a folder
pub async fn ls(browser: &WorkspaceBrowser, args: &LsArgs, format: OutputFormat) -> AppResult<()> {
    super::open_at(browser, args.folder_id.as_deref()).await?;
    output::print_view(&browser.current_view(), format);
    Ok(())
}

/// Workspace-wide search
pub async fn search(
    browser: &WorkspaceBrowser,
    args: &SearchArgs,
    format: OutputFormat,
) -> AppResult<()> {
    browser.navigation().show_search(&args.query).await?;
    output::print_view(&browser.current_view(), format);
    Ok(())
}

/// Recently uploaded files
pub async fn recent(browser: &WorkspaceBrowser, format: OutputFormat) -> AppResult<()> {
    browser.navigation().show_recent().await?;
    output::print_view(&browser.current_view(), format);
    Ok(())
}

/// Workspace statistics
pub async fn stats(browser: &WorkspaceBrowser, format: OutputFormat) -> AppResult<()> {
    browser.navigation().show_stats().await?;
    output::print_view(&browser.current_view(), format);
    Ok(())
}
