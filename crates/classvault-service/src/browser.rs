//! The browser facade a renderer drives.

use std::sync::Arc;

use tracing::{info, warn};

use classvault_auth::{DeleteTarget, PermissionResolver};
use classvault_client::TreeClient;
use classvault_core::config::BrowserConfig;
use classvault_core::error::AppError;
use classvault_core::result::AppResult;
use classvault_entity::file::PickedAsset;
use classvault_entity::folder::{CreateFolder, Folder};
use classvault_entity::identity::{ActingIdentity, Actor};
use classvault_entity::workspace::BrowserItem;

use crate::navigation::{BrowserView, NavigationController};
use crate::upload::{AssetPicker, UploadOrchestrator, UploadReceipt};

/// One open workspace browser.
///
/// Permission checks run locally before any request is sent; a denied
/// action never reaches the server.
#[derive(Debug)]
pub struct WorkspaceBrowser {
    navigation: Arc<NavigationController>,
    uploads: UploadOrchestrator,
    resolver: PermissionResolver,
    actor: Actor,
}

impl WorkspaceBrowser {
    /// Creates a browser. Nothing is fetched until
    /// [`NavigationController::open`] is called.
    pub fn new(
        client: Arc<dyn TreeClient>,
        identity: ActingIdentity,
        actor: Actor,
        picker: Arc<dyn AssetPicker>,
        config: &BrowserConfig,
    ) -> Self {
        let navigation = Arc::new(NavigationController::new(client, identity, config.clone()));
        let uploads = UploadOrchestrator::new(
            Arc::clone(&navigation),
            picker,
            actor.clone(),
            config.max_upload_bytes,
        );
        Self {
            navigation,
            uploads,
            resolver: PermissionResolver::new(),
            actor,
        }
    }

    /// Navigation operations.
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// Upload operations.
    pub fn uploads(&self) -> &UploadOrchestrator {
        &self.uploads
    }

    /// The principal permissions are evaluated for.
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Snapshot of the current view.
    pub fn current_view(&self) -> BrowserView {
        self.navigation.current_view()
    }

    /// Whether the upload affordance should be offered here.
    pub fn can_upload_here(&self) -> bool {
        self.navigation
            .current_container()
            .is_some_and(|c| self.resolver.can_upload(&self.actor, &c))
    }

    /// Whether the create-folder affordance should be offered here.
    pub fn can_create_folder_here(&self) -> bool {
        self.navigation
            .current_container()
            .is_some_and(|c| self.resolver.can_create_folder(&self.actor, &c))
    }

    /// Whether the delete affordance should be offered for `item`.
    pub fn can_delete(&self, item: &BrowserItem) -> bool {
        let container = self.delete_container();
        self.resolver
            .can_delete(&self.actor, self.delete_target(item, container.as_ref()))
    }

    /// Uploads `asset` into the active location. The view refreshes when
    /// the receipt is acknowledged.
    pub async fn perform_upload(&self, asset: PickedAsset) -> AppResult<UploadReceipt> {
        self.uploads.upload_asset(asset).await
    }

    /// Creates a folder in the active location and reloads it.
    pub async fn perform_create_folder(&self, name: &str) -> AppResult<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name must not be empty"));
        }
        let container = self.require_container()?;
        self.resolver
            .require_create_folder(&self.actor, &container)?;

        let request = CreateFolder {
            parent_id: self.navigation.active_folder_id(),
            name: name.to_string(),
            description: None,
        };
        let folder = self
            .navigation
            .client()
            .create_folder(self.navigation.identity(), request)
            .await?;
        info!(folder_id = %folder.id, name = %folder.name, "Folder created");

        self.reload_after("create_folder").await;
        Ok(folder)
    }

    /// Deletes `item` and reloads the current location.
    pub async fn perform_delete(&self, item: &BrowserItem) -> AppResult<()> {
        let container = self.delete_container();
        self.resolver
            .require_delete(&self.actor, self.delete_target(item, container.as_ref()))?;

        self.navigation
            .client()
            .delete_item(self.navigation.identity(), item.id(), item.kind())
            .await?;
        info!(item_id = item.id(), kind = %item.kind(), "Item deleted");

        self.reload_after("delete").await;
        Ok(())
    }

    fn require_container(&self) -> AppResult<Folder> {
        self.navigation
            .current_container()
            .ok_or_else(|| AppError::validation("Open the workspace first"))
    }

    /// Workspace-wide listings have no containing folder.
    fn delete_container(&self) -> Option<Folder> {
        if self.navigation.mode().is_overlay() {
            None
        } else {
            self.navigation.current_container()
        }
    }

    fn delete_target<'a>(
        &self,
        item: &'a BrowserItem,
        container: Option<&'a Folder>,
    ) -> DeleteTarget<'a> {
        let root_level = match item {
            // Until the root has been seen, assume the strictest case.
            BrowserItem::Folder(folder) => self.navigation.is_top_level(&folder.id).unwrap_or(true),
            BrowserItem::File(_) => false,
        };
        DeleteTarget {
            item,
            container,
            root_level,
        }
    }

    /// The mutation already succeeded; a failed refresh is only logged.
    async fn reload_after(&self, operation: &'static str) {
        if let Err(e) = self.navigation.reload().await {
            warn!(operation, error = %e, "Reload after mutation failed");
        }
    }
}
