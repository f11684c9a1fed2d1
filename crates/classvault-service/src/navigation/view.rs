//! Snapshot of what the browser is showing.

use serde::Serialize;

use classvault_entity::file::File;
use classvault_entity::folder::{Folder, FolderContents};
use classvault_entity::navigation::{NavigationPathEntry, ViewMode};
use classvault_entity::workspace::{BrowserItem, SearchResults, Workspace, WorkspaceStats};

/// Payload of the last committed response.
#[derive(Debug, Clone, Default)]
pub(crate) enum Listing {
    /// Nothing loaded yet.
    #[default]
    Empty,
    Root(Workspace),
    Folder(FolderContents),
    Search(SearchResults),
    Recent(Vec<File>),
    Stats(WorkspaceStats),
}

/// Immutable view handed to renderers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BrowserView {
    /// Current mode.
    pub mode: ViewMode,
    /// Name of the workspace root folder, once loaded.
    pub root_name: Option<String>,
    /// Breadcrumb, outermost first. The last entry is the folder on screen.
    pub breadcrumb: Vec<NavigationPathEntry>,
    /// Folder whose contents are (or were, before an overlay) listed.
    pub container: Option<Folder>,
    /// Folders to show.
    pub folders: Vec<Folder>,
    /// Files to show.
    pub files: Vec<File>,
    /// Active search query in search mode.
    pub search_query: Option<String>,
    /// Statistics in stats mode.
    pub stats: Option<WorkspaceStats>,
}

impl BrowserView {
    pub(crate) fn build(
        mode: ViewMode,
        root_name: Option<&str>,
        breadcrumb: &[NavigationPathEntry],
        container: Option<&Folder>,
        listing: &Listing,
    ) -> Self {
        let mut view = Self {
            mode,
            root_name: root_name.map(str::to_string),
            breadcrumb: breadcrumb.to_vec(),
            container: container.cloned(),
            ..Self::default()
        };
        match listing {
            Listing::Empty => {}
            Listing::Root(workspace) => view.folders = workspace.folders.clone(),
            Listing::Folder(contents) => {
                view.folders = contents.folders.clone();
                view.files = contents.files.clone();
            }
            Listing::Search(results) => {
                view.search_query = Some(results.query.clone());
                view.folders = results.folders.clone();
                view.files = results.files.clone();
            }
            Listing::Recent(files) => view.files = files.clone(),
            Listing::Stats(stats) => view.stats = Some(stats.clone()),
        }
        view
    }

    /// Human-readable name of the current location.
    pub fn location_name(&self) -> &str {
        self.breadcrumb
            .last()
            .map(|e| e.folder_name.as_str())
            .or(self.container.as_ref().map(|c| c.name.as_str()))
            .unwrap_or("Workspace")
    }

    /// Breadcrumb rendered as `Root / A / B`.
    pub fn breadcrumb_label(&self) -> String {
        let root = self.root_name.as_deref().unwrap_or("Workspace");
        std::iter::once(root)
            .chain(self.breadcrumb.iter().map(|e| e.folder_name.as_str()))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// Folders first, then files.
    pub fn items(&self) -> Vec<BrowserItem> {
        self.folders
            .iter()
            .cloned()
            .map(BrowserItem::Folder)
            .chain(self.files.iter().cloned().map(BrowserItem::File))
            .collect()
    }

    /// Finds a listed item by id.
    pub fn find_item(&self, id: &str) -> Option<BrowserItem> {
        self.items().into_iter().find(|item| item.id() == id)
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty() && self.stats.is_none()
    }
}
