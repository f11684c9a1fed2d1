//! Interactive browsing session.

use std::path::Path;

use classvault_core::error::AppError;
use classvault_core::result::AppResult;
use classvault_entity::file::AssetSource;
use classvault_entity::folder::Folder;
use classvault_entity::workspace::BrowserItem;
use classvault_service::{NavOutcome, WorkspaceBrowser};

use crate::output::{self, OutputFormat};
use crate::picker::asset_from_path;

const HELP: &[(&str, &str)] = &[
    ("ls", "List the current location"),
    ("cd NAME|ID", "Open a folder listed here"),
    ("up", "Go up one level"),
    ("back", "Go back; leaves the shell at the root"),
    ("root", "Return to the workspace root"),
    ("refresh", "Reload the current location"),
    ("search QUERY", "Search the whole workspace"),
    ("recent", "Recently uploaded files"),
    ("stats", "Workspace statistics"),
    ("upload [PATH]", "Upload a file here (prompts for a source without PATH)"),
    ("upload-into NAME|ID", "Upload into a folder listed here without opening it"),
    ("mkdir NAME", "Create a folder here"),
    ("rm NAME|ID", "Delete a folder or file listed here"),
    ("exit", "Leave the shell"),
];

/// Run the interactive loop until the user leaves.
pub async fn run(browser: &WorkspaceBrowser, format: OutputFormat) -> AppResult<()> {
    browser.navigation().open().await?;
    output::print_view(&browser.current_view(), format);

    loop {
        let prompt = browser.current_view().breadcrumb_label();
        let line: String = dialoguer::Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match step(browser, command, rest, format).await {
            Ok(Step::Continue) => {}
            Ok(Step::Exit) => return Ok(()),
            // No error ends the session.
            Err(e) => output::report_error(&e),
        }
    }
}

enum Step {
    Continue,
    Exit,
}

async fn step(
    browser: &WorkspaceBrowser,
    command: &str,
    rest: &str,
    format: OutputFormat,
) -> AppResult<Step> {
    let navigation = browser.navigation();
    let outcome = match command {
        "" => return Ok(Step::Continue),
        "exit" | "quit" => return Ok(Step::Exit),
        "help" => {
            for (usage, about) in HELP {
                output::print_kv(usage, about);
            }
            return Ok(Step::Continue);
        }
        "ls" => NavOutcome::Committed,
        "cd" => {
            let folder = find_folder(browser, rest)?;
            navigation.descend(&folder).await?
        }
        "up" => match navigation.ascend().await? {
            NavOutcome::ExitRequested => {
                output::print_warning("Already at the workspace root");
                return Ok(Step::Continue);
            }
            outcome => outcome,
        },
        "back" => match navigation.ascend().await? {
            NavOutcome::ExitRequested => return Ok(Step::Exit),
            outcome => outcome,
        },
        "root" => navigation.reset().await?,
        "refresh" => navigation.reload().await?,
        "search" => navigation.show_search(rest).await?,
        "recent" => navigation.show_recent().await?,
        "stats" => navigation.show_stats().await?,
        "upload" => {
            let receipt = if rest.is_empty() {
                let Some(source) = choose_source(browser)? else {
                    return Ok(Step::Continue);
                };
                browser.uploads().upload_from(source).await?
            } else {
                let asset = asset_from_path(Path::new(rest)).await?;
                Some(browser.perform_upload(asset).await?)
            };
            match receipt {
                Some(receipt) => {
                    output::print_success(&format!(
                        "Uploaded '{}' to {}",
                        receipt.file.name, receipt.location
                    ));
                    receipt.acknowledge(navigation).await?
                }
                None => {
                    output::print_warning("Upload cancelled");
                    return Ok(Step::Continue);
                }
            }
        }
        "upload-into" => {
            let folder = find_folder(browser, rest)?;
            let Some(source) = choose_source(browser)? else {
                return Ok(Step::Continue);
            };
            match browser.uploads().upload_into_subfolder(&folder, source).await? {
                Some(receipt) => {
                    output::print_success(&format!(
                        "Uploaded '{}' to {}",
                        receipt.file.name, receipt.location
                    ));
                    receipt.acknowledge(navigation).await?
                }
                None => {
                    output::print_warning("Upload cancelled");
                    return Ok(Step::Continue);
                }
            }
        }
        "mkdir" => {
            let folder = browser.perform_create_folder(rest).await?;
            output::print_success(&format!("Folder '{}' created", folder.name));
            NavOutcome::Committed
        }
        "rm" => {
            let item = find_item(browser, rest)?;
            if !super::folder::confirm_delete(&item)? {
                output::print_warning("Delete cancelled");
                return Ok(Step::Continue);
            }
            browser.perform_delete(&item).await?;
            output::print_success(&format!("Deleted '{}'", item.name()));
            NavOutcome::Committed
        }
        other => {
            output::print_warning(&format!("Unknown command '{other}'; type help"));
            return Ok(Step::Continue);
        }
    };

    if outcome.is_committed() {
        output::print_view(&browser.current_view(), format);
    }
    Ok(Step::Continue)
}

/// An item listed in the current view, by id or case-insensitive name.
fn find_item(browser: &WorkspaceBrowser, needle: &str) -> AppResult<BrowserItem> {
    if needle.is_empty() {
        return Err(AppError::validation("Name or ID required"));
    }
    let items = browser.current_view().items();
    items
        .iter()
        .find(|item| item.id() == needle)
        .or_else(|| items.iter().find(|item| item.name().eq_ignore_ascii_case(needle)))
        .cloned()
        .ok_or_else(|| AppError::validation(format!("Nothing named '{needle}' here")))
}

fn find_folder(browser: &WorkspaceBrowser, needle: &str) -> AppResult<Folder> {
    match find_item(browser, needle)? {
        BrowserItem::Folder(folder) => Ok(folder),
        BrowserItem::File(file) => Err(AppError::validation(format!(
            "'{}' is a file",
            file.name
        ))),
    }
}

fn choose_source(browser: &WorkspaceBrowser) -> AppResult<Option<AssetSource>> {
    let sources = browser.uploads().sources();
    let labels: Vec<&str> = sources.iter().map(|s| s.label()).collect();
    let picked = dialoguer::Select::new()
        .with_prompt("Upload from")
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
    Ok(picked.map(|i| sources[i]))
}
