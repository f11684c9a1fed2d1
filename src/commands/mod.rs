//! CLI command definitions and dispatch.

pub mod browse;
pub mod folder;
pub mod shell;
pub mod upload;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use classvault_client::{HttpTreeClient, MemoryTreeClient, TreeClient};
use classvault_core::config::AppConfig;
use classvault_core::error::AppError;
use classvault_core::result::AppResult;
use classvault_entity::identity::{ActingIdentity, Actor};
use classvault_entity::navigation::NavigationPathEntry;
use classvault_service::{NavigationIntent, WorkspaceBrowser};

use crate::output::OutputFormat;
use crate::picker::FilesystemPicker;

/// ClassVault: browse a school workspace from the terminal
#[derive(Debug, Parser)]
#[command(name = "classvault", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads config/default.toml, then config/NAME.toml)
    #[arg(short, long, default_value = "development")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Browse on behalf of another credential
    #[arg(long, value_name = "CREDENTIAL")]
    pub acting_as: Option<String>,

    /// Use an in-memory demo workspace instead of the server
    #[arg(long)]
    pub sandbox: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the workspace root or a folder
    Ls(browse::LsArgs),
    /// Search the whole workspace by name
    Search(browse::SearchArgs),
    /// Show recently uploaded files
    Recent(browse::RecentArgs),
    /// Show workspace statistics
    Stats,
    /// Upload a local file
    Upload(upload::UploadArgs),
    /// Create a folder
    Mkdir(folder::MkdirArgs),
    /// Delete a folder or file
    Rm(folder::RmArgs),
    /// Interactive browsing session
    Shell,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, mut config: AppConfig) -> AppResult<()> {
        if let Commands::Recent(browse::RecentArgs { limit: Some(limit) }) = &self.command {
            config.browser.recent_limit = *limit;
        }

        let browser = self.build_browser(&config)?;
        match &self.command {
            Commands::Ls(args) => browse::ls(&browser, args, self.format).await,
            Commands::Search(args) => browse::search(&browser, args, self.format).await,
            Commands::Recent(_) => browse::recent(&browser, self.format).await,
            Commands::Stats => browse::stats(&browser, self.format).await,
            Commands::Upload(args) => upload::execute(&browser, args, self.format).await,
            Commands::Mkdir(args) => folder::mkdir(&browser, args, self.format).await,
            Commands::Rm(args) => folder::rm(&browser, args).await,
            Commands::Shell => shell::run(&browser, self.format).await,
        }
    }

    /// Wires identity, tree client, and picker into a browser.
    fn build_browser(&self, config: &AppConfig) -> AppResult<WorkspaceBrowser> {
        let mut session = config.session.clone();
        if let Some(credential) = &self.acting_as {
            session.impersonated_credential = Some(credential.clone());
        }

        let client: Arc<dyn TreeClient> = if self.sandbox {
            if session.credential.trim().is_empty() {
                session.credential = "sandbox".to_string();
            }
            if session.display_name.trim().is_empty() {
                session.display_name = "Sandbox Teacher".to_string();
            }
            let identity = ActingIdentity::from_session(&session);
            info!(impersonating = identity.is_impersonating(), "Using sandbox workspace");
            Arc::new(MemoryTreeClient::demo(
                identity.effective_credential(),
                &session.display_name,
            ))
        } else {
            if session.credential.trim().is_empty() {
                return Err(AppError::configuration(
                    "session.credential is not set (or use --sandbox)",
                ));
            }
            Arc::new(HttpTreeClient::new(&config.api)?)
        };

        Ok(WorkspaceBrowser::new(
            client,
            ActingIdentity::from_session(&session),
            Actor::from_session(&session),
            Arc::new(FilesystemPicker),
            &config.browser,
        ))
    }
}

/// Loads the root, then opens `folder_id` if given.
///
/// Folders opened by id get the id as their breadcrumb label.
pub async fn open_at(browser: &WorkspaceBrowser, folder_id: Option<&str>) -> AppResult<()> {
    let navigation = browser.navigation();
    navigation.open().await?;
    if let Some(id) = folder_id {
        let label = browser
            .current_view()
            .folders
            .iter()
            .find(|f| f.id.as_str() == id)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| id.to_string());
        navigation
            .navigate(NavigationIntent::UserDescend(NavigationPathEntry::new(id, label)))
            .await?;
    }
    Ok(())
}
