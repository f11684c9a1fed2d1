//! In-memory tree client using a Tokio mutex, for tests and the CLI sandbox.
//!
//! Each credential owns its own [`MemoryWorkspace`]; an unknown credential
//! is rejected the way the real service rejects an expired token. Every
//! call is recorded so callers can assert which requests were made and
//! which credential was sent.

mod seed;
mod tree;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};
use tracing::{debug, info, warn};

use classvault_core::error::AppError;
use classvault_core::result::AppResult;
use classvault_core::types::FolderId;
use classvault_entity::file::File;
use classvault_entity::folder::{CreateFolder, Folder, FolderContents};
use classvault_entity::identity::ActingIdentity;
use classvault_entity::workspace::{ItemKind, SearchResults, Workspace, WorkspaceStats};

use crate::traits::{TreeClient, UploadRequest};

pub use tree::MemoryWorkspace;

/// Which tree operation a recorded call was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeOperation {
    /// `list_root`
    ListRoot,
    /// `list_folder`
    ListFolder,
    /// `upload`
    Upload,
    /// `create_folder`
    CreateFolder,
    /// `delete_item`
    Delete,
    /// `search`
    Search,
    /// `list_recent`
    ListRecent,
    /// `get_statistics`
    Statistics,
}

/// One request as the server would have seen it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The operation invoked.
    pub operation: TreeOperation,
    /// The credential the request carried.
    pub credential: String,
    /// Folder, item, or query the call targeted.
    pub target: Option<String>,
}

#[derive(Debug, Default)]
struct InnerState {
    workspaces: HashMap<String, MemoryWorkspace>,
    calls: Vec<RecordedCall>,
    queued_failures: Vec<AppError>,
    gates: HashMap<String, Arc<Notify>>,
}

/// [`TreeClient`] backed by in-process trees.
#[derive(Debug, Clone, Default)]
pub struct MemoryTreeClient {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryTreeClient {
    /// Creates a client with no workspaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `workspace` to requests carrying `credential`.
    ///
    /// Meant for building a client. Once clones are in use, prefer
    /// [`insert_workspace`](Self::insert_workspace), which waits for the lock.
    pub fn with_workspace(mut self, credential: impl Into<String>, workspace: MemoryWorkspace) -> Self {
        let credential = credential.into();
        match Arc::get_mut(&mut self.state) {
            Some(state) => {
                state.get_mut().workspaces.insert(credential, workspace);
            }
            None => match self.state.try_lock() {
                Ok(mut state) => {
                    state.workspaces.insert(credential, workspace);
                }
                Err(_) => {
                    warn!("Workspace not added: the shared client is locked, use insert_workspace");
                }
            },
        }
        self
    }

    /// A demo school tree for `credential`, owned by `display_name`.
    pub fn demo(credential: impl Into<String>, display_name: &str) -> Self {
        Self::new().with_workspace(credential, seed::demo_workspace(display_name))
    }

    /// Adds or replaces a workspace after construction.
    pub async fn insert_workspace(&self, credential: impl Into<String>, workspace: MemoryWorkspace) {
        let mut state = self.state.lock().await;
        state.workspaces.insert(credential.into(), workspace);
    }

    /// Snapshot of a credential's tree.
    pub async fn workspace(&self, credential: &str) -> Option<MemoryWorkspace> {
        self.state.lock().await.workspaces.get(credential).cloned()
    }

    /// Every call made so far, oldest first.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of calls made so far.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// Forgets recorded calls.
    pub async fn clear_calls(&self) {
        self.state.lock().await.calls.clear();
    }

    /// Makes the next call fail with `error` instead of touching the tree.
    pub async fn fail_next(&self, error: AppError) {
        self.state.lock().await.queued_failures.push(error);
    }

    /// Holds the next `list_folder` of `folder_id` until the returned
    /// notifier is signalled with `notify_one`.
    pub async fn hold_folder(&self, folder_id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state
            .lock()
            .await
            .gates
            .insert(folder_id.to_string(), Arc::clone(&gate));
        gate
    }

    /// Records the call and returns a queued failure, if any.
    async fn begin(
        &self,
        identity: &ActingIdentity,
        operation: TreeOperation,
        target: Option<&str>,
    ) -> AppResult<()> {
        let mut state = self.state.lock().await;
        state.calls.push(RecordedCall {
            operation,
            credential: identity.effective_credential().to_string(),
            target: target.map(str::to_string),
        });
        debug!(?operation, target, "Memory tree call");

        if !state.queued_failures.is_empty() {
            return Err(state.queued_failures.remove(0));
        }
        if !state.workspaces.contains_key(identity.effective_credential()) {
            return Err(AppError::remote(401, "Invalid or expired token"));
        }
        Ok(())
    }

    /// Runs `f` against the credential's tree.
    async fn with_tree<T>(
        &self,
        identity: &ActingIdentity,
        f: impl FnOnce(&mut MemoryWorkspace) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut state = self.state.lock().await;
        let tree = state
            .workspaces
            .get_mut(identity.effective_credential())
            .ok_or_else(|| AppError::remote(401, "Invalid or expired token"))?;
        f(tree)
    }
}

#[async_trait]
impl TreeClient for MemoryTreeClient {
    async fn list_root(&self, identity: &ActingIdentity) -> AppResult<Workspace> {
        self.begin(identity, TreeOperation::ListRoot, None).await?;
        self.with_tree(identity, |tree| Ok(tree.workspace())).await
    }

    async fn list_folder(
        &self,
        identity: &ActingIdentity,
        folder_id: &FolderId,
    ) -> AppResult<FolderContents> {
        self.begin(identity, TreeOperation::ListFolder, Some(folder_id.as_str()))
            .await?;

        let gate = self.state.lock().await.gates.remove(folder_id.as_str());
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.with_tree(identity, |tree| tree.contents(folder_id)).await
    }

    async fn upload(&self, identity: &ActingIdentity, request: UploadRequest) -> AppResult<File> {
        let target = request.folder_id.as_ref().map(FolderId::as_str);
        self.begin(identity, TreeOperation::Upload, target).await?;

        let file = self
            .with_tree(identity, |tree| {
                tree.add_file(
                    request.folder_id.as_ref(),
                    &request.display_name,
                    &request.mime_type,
                    request.asset.size_bytes.unwrap_or(0),
                )
            })
            .await?;
        info!(file_id = %file.id, name = %file.name, "File stored in memory tree");
        Ok(file)
    }

    async fn create_folder(
        &self,
        identity: &ActingIdentity,
        request: CreateFolder,
    ) -> AppResult<Folder> {
        let target = request.parent_id.as_ref().map(FolderId::as_str);
        self.begin(identity, TreeOperation::CreateFolder, target).await?;

        self.with_tree(identity, |tree| {
            tree.create_folder(
                request.parent_id.as_ref(),
                &request.name,
                request.description.as_deref(),
            )
        })
        .await
    }

    async fn delete_item(
        &self,
        identity: &ActingIdentity,
        item_id: &str,
        kind: ItemKind,
    ) -> AppResult<()> {
        self.begin(identity, TreeOperation::Delete, Some(item_id)).await?;

        self.with_tree(identity, |tree| match kind {
            ItemKind::Folder => tree.remove_folder(item_id),
            ItemKind::File => tree.remove_file(item_id),
        })
        .await
    }

    async fn search(&self, identity: &ActingIdentity, query: &str) -> AppResult<SearchResults> {
        self.begin(identity, TreeOperation::Search, Some(query)).await?;
        self.with_tree(identity, |tree| Ok(tree.search(query))).await
    }

    async fn list_recent(&self, identity: &ActingIdentity, limit: u32) -> AppResult<Vec<File>> {
        self.begin(identity, TreeOperation::ListRecent, None).await?;
        self.with_tree(identity, |tree| Ok(tree.recent(limit))).await
    }

    async fn get_statistics(&self, identity: &ActingIdentity) -> AppResult<WorkspaceStats> {
        self.begin(identity, TreeOperation::Statistics, None).await?;
        self.with_tree(identity, |tree| Ok(tree.stats())).await
    }
}
