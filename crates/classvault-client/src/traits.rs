//! The remote tree operations the browser depends on.

use async_trait::async_trait;

use classvault_core::result::AppResult;
use classvault_core::types::FolderId;
use classvault_entity::file::{File, PickedAsset};
use classvault_entity::folder::{CreateFolder, Folder, FolderContents};
use classvault_entity::identity::ActingIdentity;
use classvault_entity::workspace::{ItemKind, SearchResults, Workspace, WorkspaceStats};

/// Parameters of a single upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Target folder (None for the workspace root).
    pub folder_id: Option<FolderId>,
    /// The asset to send.
    pub asset: PickedAsset,
    /// Name to store the file under.
    pub display_name: String,
    /// MIME type to declare.
    pub mime_type: String,
    /// Human-readable description, e.g. `"Uploaded to Homework"`.
    pub description: String,
}

/// Request/response wrapper over the remote workspace tree.
///
/// Failures are `Transport` (no response) or `RemoteRejection` (non-2xx or
/// `success: false`) with the server's message preserved.
#[async_trait]
pub trait TreeClient: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the workspace root and its top-level folders.
    async fn list_root(&self, identity: &ActingIdentity) -> AppResult<Workspace>;

    /// Fetch one folder with its direct children.
    async fn list_folder(
        &self,
        identity: &ActingIdentity,
        folder_id: &FolderId,
    ) -> AppResult<FolderContents>;

    /// Upload an asset into a folder (or the root).
    async fn upload(&self, identity: &ActingIdentity, request: UploadRequest) -> AppResult<File>;

    /// Create a folder under a parent (or the root).
    async fn create_folder(
        &self,
        identity: &ActingIdentity,
        request: CreateFolder,
    ) -> AppResult<Folder>;

    /// Delete a folder or a file.
    async fn delete_item(
        &self,
        identity: &ActingIdentity,
        item_id: &str,
        kind: ItemKind,
    ) -> AppResult<()>;

    /// Search the whole workspace by name.
    async fn search(&self, identity: &ActingIdentity, query: &str) -> AppResult<SearchResults>;

    /// Most recently uploaded files, newest first.
    async fn list_recent(&self, identity: &ActingIdentity, limit: u32) -> AppResult<Vec<File>>;

    /// Aggregate workspace statistics.
    async fn get_statistics(&self, identity: &ActingIdentity) -> AppResult<WorkspaceStats>;
}
