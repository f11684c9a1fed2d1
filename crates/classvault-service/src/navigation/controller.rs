//! Navigation controller.
//!
//! Every request is planned under the state lock (sequence number, target,
//! next mode, next breadcrumb), fetched with the lock released, and
//! committed only if no newer request was planned in the meantime. A
//! failed fetch leaves state exactly as it was.
//!
//! Requests are planned from the location the latest planned request leads
//! to, not from the last committed one, so `ascend()` issued while a
//! `descend()` is still in flight goes back from the folder being opened.
//! When the latest request fails, planning falls back to the committed
//! location.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use classvault_client::TreeClient;
use classvault_core::config::BrowserConfig;
use classvault_core::error::AppError;
use classvault_core::result::AppResult;
use classvault_core::types::FolderId;
use classvault_entity::folder::Folder;
use classvault_entity::identity::ActingIdentity;
use classvault_entity::navigation::{NavigationPathEntry, ViewMode};
use classvault_entity::workspace::Workspace;

use super::intent::{NavOutcome, NavigationIntent};
use super::view::{BrowserView, Listing};

/// What a planned request fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Root,
    Folder(FolderId),
    Search(String),
    Recent(u32),
    Stats,
}

/// Mode, breadcrumb, and overlay bookkeeping of one place in the browser.
#[derive(Debug, Clone)]
struct Location {
    mode: ViewMode,
    path: Vec<NavigationPathEntry>,
    /// Mode to restore when the open overlay closes.
    overlay_return: Option<ViewMode>,
    /// Query shown when `mode` is `Search`.
    search_query: Option<String>,
}

impl Location {
    fn folder_target(&self) -> Target {
        match (self.mode, self.path.last()) {
            (ViewMode::Folder, Some(entry)) => Target::Folder(entry.folder_id.clone()),
            _ => Target::Root,
        }
    }

    fn browse(mode: ViewMode, path: Vec<NavigationPathEntry>) -> Self {
        Self {
            mode,
            path,
            overlay_return: None,
            search_query: None,
        }
    }
}

/// A planned request: applied only if `seq` is still the latest.
#[derive(Debug)]
struct Ticket {
    seq: u64,
    label: &'static str,
    target: Target,
    next: Location,
}

/// The latest planned request that has not answered yet.
#[derive(Debug)]
struct Pending {
    seq: u64,
    location: Location,
}

#[derive(Debug, Default)]
struct NavigationState {
    mode: ViewMode,
    /// Mode to restore when the open overlay closes.
    overlay_return: Option<ViewMode>,
    path: Vec<NavigationPathEntry>,
    listing: Listing,
    /// Last loaded workspace root.
    workspace: Option<Workspace>,
    /// Folder last listed in `Structure` or `Folder` mode.
    container: Option<Folder>,
    seq: u64,
    pending: Option<Pending>,
    active_override: Option<FolderId>,
}

impl NavigationState {
    /// Where the latest planned request leads, or the committed location.
    fn planning_base(&self) -> Location {
        if let Some(pending) = &self.pending {
            return pending.location.clone();
        }
        Location {
            mode: self.mode,
            path: self.path.clone(),
            overlay_return: self.overlay_return,
            search_query: match &self.listing {
                Listing::Search(results) => Some(results.query.clone()),
                _ => None,
            },
        }
    }

    /// Takes the next sequence number and records `next` as pending.
    fn issue(&mut self, label: &'static str, target: Target, next: Location) -> Ticket {
        self.seq += 1;
        self.pending = Some(Pending {
            seq: self.seq,
            location: next.clone(),
        });
        Ticket {
            seq: self.seq,
            label,
            target,
            next,
        }
    }
}

/// Owns the view mode, breadcrumb, and active folder of one browser.
#[derive(Debug)]
pub struct NavigationController {
    client: Arc<dyn TreeClient>,
    identity: ActingIdentity,
    config: BrowserConfig,
    state: Mutex<NavigationState>,
}

impl NavigationController {
    /// Creates a controller in `Structure` mode with nothing loaded.
    pub fn new(client: Arc<dyn TreeClient>, identity: ActingIdentity, config: BrowserConfig) -> Self {
        Self {
            client,
            identity,
            config,
            state: Mutex::new(NavigationState::default()),
        }
    }

    /// The identity every request is sent with.
    pub fn identity(&self) -> &ActingIdentity {
        &self.identity
    }

    /// The tree client requests go through.
    pub fn client(&self) -> &Arc<dyn TreeClient> {
        &self.client
    }

    fn lock(&self) -> MutexGuard<'_, NavigationState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ── Requests ──────────────────────────────────────────────────────

    /// Loads the workspace root.
    pub async fn open(&self) -> AppResult<NavOutcome> {
        self.navigate(NavigationIntent::ReturnToRoot).await
    }

    /// Opens `folder`, pushing it onto the breadcrumb.
    pub async fn descend(&self, folder: &Folder) -> AppResult<NavOutcome> {
        self.navigate(NavigationIntent::UserDescend(folder.path_entry()))
            .await
    }

    /// Goes back one level.
    pub async fn ascend(&self) -> AppResult<NavOutcome> {
        self.navigate(NavigationIntent::UserAscend).await
    }

    /// Reloads the current location without touching the breadcrumb.
    pub async fn reload(&self) -> AppResult<NavOutcome> {
        self.navigate(NavigationIntent::ProgrammaticReload).await
    }

    /// Clears the breadcrumb and loads the workspace root.
    pub async fn reset(&self) -> AppResult<NavOutcome> {
        self.navigate(NavigationIntent::ReturnToRoot).await
    }

    /// Runs a navigation intent.
    pub async fn navigate(&self, intent: NavigationIntent) -> AppResult<NavOutcome> {
        let ticket = {
            let mut state = self.lock();
            match self.plan(&mut state, intent) {
                Planned::Fetch(ticket) => ticket,
                Planned::Done(outcome) => return Ok(outcome),
            }
        };
        self.run(ticket).await
    }

    /// Shows workspace-wide search results for `query`.
    pub async fn show_search(&self, query: &str) -> AppResult<NavOutcome> {
        let query = query.trim();
        if query.chars().count() < self.config.min_search_length.max(1) {
            return Err(AppError::validation(format!(
                "Search needs at least {} character(s)",
                self.config.min_search_length.max(1)
            )));
        }
        let target = Target::Search(query.to_string());
        self.open_overlay(ViewMode::Search, target, "show_search").await
    }

    /// Shows recently uploaded files.
    pub async fn show_recent(&self) -> AppResult<NavOutcome> {
        let target = Target::Recent(self.config.recent_limit);
        self.open_overlay(ViewMode::Recent, target, "show_recent").await
    }

    /// Shows workspace statistics.
    pub async fn show_stats(&self) -> AppResult<NavOutcome> {
        self.open_overlay(ViewMode::Stats, Target::Stats, "show_stats")
            .await
    }

    /// Leaves the open overlay and reloads the location underneath it.
    pub async fn close_overlay(&self) -> AppResult<NavOutcome> {
        let ticket = {
            let mut state = self.lock();
            let base = state.planning_base();
            if !base.mode.is_overlay() {
                return Ok(NavOutcome::Unchanged);
            }
            Self::close_overlay_ticket(&mut state, base)
        };
        self.run(ticket).await
    }

    async fn open_overlay(
        &self,
        mode: ViewMode,
        target: Target,
        label: &'static str,
    ) -> AppResult<NavOutcome> {
        let ticket = {
            let mut state = self.lock();
            let base = state.planning_base();
            let overlay_return = if base.mode.is_overlay() {
                base.overlay_return
            } else {
                Some(base.mode)
            };
            let search_query = match &target {
                Target::Search(query) => Some(query.clone()),
                _ => None,
            };
            let next = Location {
                mode,
                path: base.path,
                overlay_return,
                search_query,
            };
            state.issue(label, target, next)
        };
        self.run(ticket).await
    }

    fn close_overlay_ticket(state: &mut NavigationState, base: Location) -> Ticket {
        let next = match base.overlay_return {
            Some(ViewMode::Folder) if !base.path.is_empty() => {
                Location::browse(ViewMode::Folder, base.path)
            }
            _ => Location::browse(ViewMode::Structure, Vec::new()),
        };
        state.issue("close_overlay", next.folder_target(), next)
    }

    fn plan(&self, state: &mut NavigationState, intent: NavigationIntent) -> Planned {
        let label = intent.as_str();
        let base = state.planning_base();
        match intent {
            NavigationIntent::UserDescend(entry) => {
                let target = Target::Folder(entry.folder_id.clone());
                let mut path = base.path;
                path.push(entry);
                Planned::Fetch(state.issue(label, target, Location::browse(ViewMode::Folder, path)))
            }
            NavigationIntent::UserAscend => {
                if base.mode.is_overlay() {
                    return Planned::Fetch(Self::close_overlay_ticket(state, base));
                }
                if base.mode == ViewMode::Structure {
                    debug!("Back pressed at the workspace root");
                    return Planned::Done(NavOutcome::ExitRequested);
                }
                let mut path = base.path;
                path.pop();
                let mode = if path.is_empty() {
                    ViewMode::Structure
                } else {
                    ViewMode::Folder
                };
                let next = Location::browse(mode, path);
                Planned::Fetch(state.issue(label, next.folder_target(), next))
            }
            NavigationIntent::ProgrammaticReload => {
                let target = match base.mode {
                    ViewMode::Search => match &base.search_query {
                        Some(query) => Target::Search(query.clone()),
                        None => Target::Root,
                    },
                    ViewMode::Recent => Target::Recent(self.config.recent_limit),
                    ViewMode::Stats => Target::Stats,
                    _ => base.folder_target(),
                };
                Planned::Fetch(state.issue(label, target, base))
            }
            NavigationIntent::ReturnToRoot => Planned::Fetch(state.issue(
                label,
                Target::Root,
                Location::browse(ViewMode::Structure, Vec::new()),
            )),
        }
    }

    async fn fetch(&self, target: &Target) -> AppResult<Listing> {
        let identity = &self.identity;
        let listing = match target {
            Target::Root => Listing::Root(self.client.list_root(identity).await?),
            Target::Folder(id) => Listing::Folder(self.client.list_folder(identity, id).await?),
            Target::Search(query) => Listing::Search(self.client.search(identity, query).await?),
            Target::Recent(limit) => {
                Listing::Recent(self.client.list_recent(identity, *limit).await?)
            }
            Target::Stats => Listing::Stats(self.client.get_statistics(identity).await?),
        };
        Ok(listing)
    }

    async fn run(&self, ticket: Ticket) -> AppResult<NavOutcome> {
        debug!(seq = ticket.seq, intent = ticket.label, target = ?ticket.target, "Navigation requested");
        let result = self.fetch(&ticket.target).await;
        self.commit(ticket, result)
    }

    fn commit(&self, ticket: Ticket, result: AppResult<Listing>) -> AppResult<NavOutcome> {
        let mut state = self.lock();

        if ticket.seq != state.seq {
            debug!(
                seq = ticket.seq,
                latest = state.seq,
                intent = ticket.label,
                failed = result.is_err(),
                "Discarding stale navigation response"
            );
            return Ok(NavOutcome::Discarded);
        }

        // The latest request answered; later plans start from what is committed.
        if state.pending.as_ref().is_some_and(|p| p.seq == ticket.seq) {
            state.pending = None;
        }

        let listing = result.inspect_err(|e| {
            warn!(seq = ticket.seq, intent = ticket.label, error = %e, "Navigation failed");
        })?;

        match &listing {
            Listing::Root(workspace) => {
                state.container = Some(workspace.root_folder.clone());
                state.workspace = Some(workspace.clone());
            }
            Listing::Folder(contents) => state.container = Some(contents.folder.clone()),
            _ => {}
        }
        state.mode = ticket.next.mode;
        state.path = ticket.next.path;
        state.overlay_return = ticket.next.overlay_return;
        state.listing = listing;

        info!(
            seq = ticket.seq,
            intent = ticket.label,
            mode = %state.mode,
            depth = state.path.len(),
            folder_id = state.path.last().map(|e| e.folder_id.as_str()),
            "Navigation committed"
        );
        Ok(NavOutcome::Committed)
    }

    // ── Reads ─────────────────────────────────────────────────────────

    /// Snapshot of the current view.
    pub fn current_view(&self) -> BrowserView {
        let state = self.lock();
        BrowserView::build(
            state.mode,
            state.workspace.as_ref().map(|w| w.root_folder.name.as_str()),
            &state.path,
            state.container.as_ref(),
            &state.listing,
        )
    }

    /// Current mode.
    pub fn mode(&self) -> ViewMode {
        self.lock().mode
    }

    /// Current breadcrumb.
    pub fn breadcrumb(&self) -> Vec<NavigationPathEntry> {
        self.lock().path.clone()
    }

    /// Folder uploads and new folders go into (`None` = workspace root).
    pub fn active_folder_id(&self) -> Option<FolderId> {
        let state = self.lock();
        state
            .active_override
            .clone()
            .or_else(|| state.path.last().map(|e| e.folder_id.clone()))
    }

    /// The folder whose contents were last listed.
    pub fn current_container(&self) -> Option<Folder> {
        self.lock().container.clone()
    }

    /// The last loaded workspace root.
    pub fn workspace(&self) -> Option<Workspace> {
        self.lock().workspace.clone()
    }

    /// Whether `folder_id` is a direct child of the workspace.
    ///
    /// Unknown until the root has been loaded once.
    pub fn is_top_level(&self, folder_id: &FolderId) -> Option<bool> {
        self.lock()
            .workspace
            .as_ref()
            .map(|w| w.is_top_level(folder_id))
    }

    /// Points the active folder at `folder_id` until the guard is dropped.
    pub fn override_active_folder(&self, folder_id: FolderId) -> ActiveFolderOverride<'_> {
        let previous = self.lock().active_override.replace(folder_id.clone());
        debug!(folder_id = %folder_id, "Active folder overridden");
        ActiveFolderOverride {
            controller: self,
            previous,
        }
    }
}

enum Planned {
    Fetch(Ticket),
    Done(NavOutcome),
}

/// Restores the previous active folder when dropped.
#[derive(Debug)]
#[must_use = "the override ends as soon as the guard is dropped"]
pub struct ActiveFolderOverride<'a> {
    controller: &'a NavigationController,
    previous: Option<FolderId>,
}

impl Drop for ActiveFolderOverride<'_> {
    fn drop(&mut self) {
        let mut state = self.controller.lock();
        state.active_override = self.previous.take();
        debug!("Active folder override restored");
    }
}
