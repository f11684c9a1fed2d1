//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use classvault_core::AppError;
use classvault_entity::file::File;
use classvault_entity::folder::Folder;
use classvault_entity::workspace::WorkspaceStats;
use classvault_service::BrowserView;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// One listed folder or file
#[derive(Debug, Serialize, Tabled)]
pub struct ItemRow {
    /// Folder or file
    #[tabled(rename = "Type")]
    kind: &'static str,
    /// Opaque id
    #[tabled(rename = "ID")]
    id: String,
    /// Display name
    #[tabled(rename = "Name")]
    name: String,
    /// Extension badge or folder kind
    #[tabled(rename = "Kind")]
    badge: String,
    /// Humanized size
    #[tabled(rename = "Size")]
    size: String,
    /// Creator or uploader
    #[tabled(rename = "Owner")]
    owner: String,
    /// Creation date
    #[tabled(rename = "Created")]
    created: String,
}

impl ItemRow {
    fn folder(folder: &Folder) -> Self {
        Self {
            kind: "folder",
            id: folder.id.to_string(),
            name: folder.name.clone(),
            badge: folder.kind.to_string(),
            size: format!("{} ({} files)", folder.display_size(), folder.file_count),
            owner: folder.creator_names().next().unwrap_or("-").to_string(),
            created: folder
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }

    fn file(file: &File) -> Self {
        Self {
            kind: "file",
            id: file.id.to_string(),
            name: file.name.clone(),
            badge: file.extension(),
            size: file.display_size(),
            owner: file.uploader_names().next().unwrap_or("-").to_string(),
            created: file
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

/// One category line of the statistics view
#[derive(Debug, Serialize, Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Files")]
    count: u64,
}

/// Rows for everything listed in a view, folders first.
pub fn view_rows(view: &BrowserView) -> Vec<ItemRow> {
    view.folders
        .iter()
        .map(ItemRow::folder)
        .chain(view.files.iter().map(ItemRow::file))
        .collect()
}

/// Print a view: breadcrumb header, then its items or statistics
pub fn print_view(view: &BrowserView, format: OutputFormat) {
    if format == OutputFormat::Json {
        print_item(view, format);
        return;
    }

    println!("{}  [{}]", view.breadcrumb_label(), view.mode);
    if let Some(query) = &view.search_query {
        print_kv("Search", query);
    }
    match &view.stats {
        Some(stats) => print_stats(stats, format),
        None => print_list(&view_rows(view), format),
    }
}

/// Print workspace statistics
pub fn print_stats(stats: &WorkspaceStats, format: OutputFormat) {
    if format == OutputFormat::Json {
        print_item(stats, format);
        return;
    }

    print_kv("Files", &stats.total_files.to_string());
    print_kv("Folders", &stats.total_folders.to_string());
    print_kv("Total size", &stats.display_size());
    let rows: Vec<CategoryRow> = stats
        .files_by_category
        .iter()
        .map(|c| CategoryRow {
            category: c.category.to_string(),
            count: c.count,
        })
        .collect();
    print_list(&rows, format);
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let table = Table::new(items).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{}", json);
        }
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{:#?}", item);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{}", json);
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a failed operation, with a retry hint when retrying can help.
pub fn report_error(err: &AppError) {
    print_error(&err.message);
    if let Some(hint) = retry_hint(err) {
        eprintln!("  {}", hint);
    }
}

fn retry_hint(err: &AppError) -> Option<&'static str> {
    err.is_retryable().then_some("Check your connection and try again.")
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}
