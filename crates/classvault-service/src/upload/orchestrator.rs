//! Upload orchestration: permission check, single-flight busy flag, and
//! receipts that the caller acknowledges to refresh.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use classvault_auth::PermissionResolver;
use classvault_client::UploadRequest;
use classvault_core::error::AppError;
use classvault_core::result::AppResult;
use classvault_core::types::FolderId;
use classvault_entity::file::{AssetSource, File, PickedAsset};
use classvault_entity::folder::Folder;
use classvault_entity::identity::Actor;

use super::picker::AssetPicker;
use crate::navigation::{NavOutcome, NavigationController};

/// Proof of a finished upload.
///
/// The view is not refreshed until [`acknowledge`](Self::acknowledge) is
/// called.
#[derive(Debug, Clone)]
#[must_use = "call acknowledge() to refresh the view"]
pub struct UploadReceipt {
    /// The stored file as returned by the server.
    pub file: File,
    /// Folder the file went into (`None` = workspace root).
    pub folder_id: Option<FolderId>,
    /// Name of the location shown to the user.
    pub location: String,
}

impl UploadReceipt {
    /// Reloads the current location.
    pub async fn acknowledge(self, navigation: &NavigationController) -> AppResult<NavOutcome> {
        navigation.reload().await
    }
}

/// Clears the busy flag when dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Where the asset is going.
struct UploadTarget {
    folder_id: Option<FolderId>,
    location: String,
}

/// Drives uploads for one browser.
#[derive(Debug)]
pub struct UploadOrchestrator {
    navigation: Arc<NavigationController>,
    picker: Arc<dyn AssetPicker>,
    resolver: PermissionResolver,
    actor: Actor,
    max_upload_bytes: u64,
    busy: AtomicBool,
}

impl UploadOrchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        navigation: Arc<NavigationController>,
        picker: Arc<dyn AssetPicker>,
        actor: Actor,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            navigation,
            picker,
            resolver: PermissionResolver::new(),
            actor,
            max_upload_bytes,
            busy: AtomicBool::new(false),
        }
    }

    /// Sources the user can pick from.
    pub fn sources(&self) -> &'static [AssetSource] {
        &AssetSource::ALL
    }

    /// Whether an upload is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Picks from `source` and uploads into the active location.
    ///
    /// Returns `Ok(None)` when the user cancels the picker.
    pub async fn upload_from(&self, source: AssetSource) -> AppResult<Option<UploadReceipt>> {
        let target = self.active_target()?;
        let _busy = self.acquire()?;
        match self.picker.pick(source).await? {
            Some(asset) => self.send(target, asset).await.map(Some),
            None => {
                info!(source = %source, "Upload cancelled");
                Ok(None)
            }
        }
    }

    /// Uploads an already chosen asset into the active location.
    pub async fn upload_asset(&self, asset: PickedAsset) -> AppResult<UploadReceipt> {
        let target = self.active_target()?;
        let _busy = self.acquire()?;
        self.send(target, asset).await
    }

    /// Picks from `source` and uploads into `folder`, a child of the current
    /// location, without navigating into it.
    ///
    /// The active folder points at `folder` only while this future runs.
    pub async fn upload_into_subfolder(
        &self,
        folder: &Folder,
        source: AssetSource,
    ) -> AppResult<Option<UploadReceipt>> {
        let _override = self.navigation.override_active_folder(folder.id.clone());
        self.resolver.require_upload(&self.actor, folder)?;
        let target = UploadTarget {
            folder_id: self.navigation.active_folder_id(),
            location: folder.name.clone(),
        };

        let _busy = self.acquire()?;
        match self.picker.pick(source).await? {
            Some(asset) => self.send(target, asset).await.map(Some),
            None => Ok(None),
        }
    }

    fn active_target(&self) -> AppResult<UploadTarget> {
        let container = self
            .navigation
            .current_container()
            .ok_or_else(|| AppError::validation("Open the workspace before uploading"))?;
        self.resolver.require_upload(&self.actor, &container)?;
        Ok(UploadTarget {
            folder_id: self.navigation.active_folder_id(),
            location: container.name,
        })
    }

    fn acquire(&self) -> AppResult<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| BusyGuard(&self.busy))
            .map_err(|_| AppError::busy("An upload is already in progress"))
    }

    async fn send(&self, target: UploadTarget, asset: PickedAsset) -> AppResult<UploadReceipt> {
        if let Some(size) = asset.size_bytes.filter(|s| *s > self.max_upload_bytes) {
            return Err(AppError::validation(format!(
                "'{}' is {} bytes; the limit is {} bytes",
                asset.display_name, size, self.max_upload_bytes
            )));
        }

        let mime_type = if asset.mime_type.trim().is_empty() {
            "application/octet-stream".to_string()
        } else {
            asset.mime_type.clone()
        };
        let request = UploadRequest {
            folder_id: target.folder_id.clone(),
            display_name: asset.display_name.clone(),
            mime_type,
            description: format!("Uploaded to {}", target.location),
            asset,
        };

        let identity = self.navigation.identity();
        match self.navigation.client().upload(identity, request).await {
            Ok(file) => {
                info!(
                    file_id = %file.id,
                    folder_id = target.folder_id.as_ref().map(FolderId::as_str),
                    location = %target.location,
                    "Upload finished"
                );
                Ok(UploadReceipt {
                    file,
                    folder_id: target.folder_id,
                    location: target.location,
                })
            }
            Err(e) => {
                warn!(location = %target.location, error = %e, "Upload failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use classvault_client::MemoryTreeClient;
    use classvault_client::memory::TreeOperation;
    use classvault_core::ErrorKind;
    use classvault_core::config::BrowserConfig;
    use classvault_entity::identity::ActingIdentity;
    use tokio::sync::Notify;

    fn asset(size: u64) -> PickedAsset {
        PickedAsset {
            uri: "file:///tmp/photo.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            display_name: "photo.jpg".to_string(),
            size_bytes: Some(size),
        }
    }

    #[derive(Debug)]
    struct FixedPicker(Option<PickedAsset>);

    #[async_trait]
    impl AssetPicker for FixedPicker {
        async fn pick(&self, _source: AssetSource) -> AppResult<Option<PickedAsset>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug, Default)]
    struct GatedPicker {
        opened: Notify,
        release: Notify,
    }

    #[async_trait]
    impl AssetPicker for GatedPicker {
        async fn pick(&self, _source: AssetSource) -> AppResult<Option<PickedAsset>> {
            self.opened.notify_one();
            self.release.notified().await;
            Ok(Some(asset(10)))
        }
    }

    async fn setup(
        picker: Arc<dyn AssetPicker>,
    ) -> (MemoryTreeClient, Arc<NavigationController>, UploadOrchestrator) {
        let client = MemoryTreeClient::demo("token", "Ms. Rivera");
        let nav = Arc::new(NavigationController::new(
            Arc::new(client.clone()),
            ActingIdentity::own("token"),
            BrowserConfig::default(),
        ));
        nav.open().await.unwrap();
        let orchestrator =
            UploadOrchestrator::new(Arc::clone(&nav), picker, Actor::named("Ms. Rivera"), 1024);
        (client, nav, orchestrator)
    }

    fn homework(nav: &NavigationController) -> Folder {
        nav.current_view()
            .folders
            .into_iter()
            .find(|f| f.id.as_str() == "homework")
            .unwrap()
    }

    #[tokio::test]
    async fn test_receipt_does_not_reload_until_acknowledged() {
        let (client, nav, orchestrator) = setup(Arc::new(FixedPicker(Some(asset(10))))).await;
        nav.descend(&homework(&nav)).await.unwrap();
        client.clear_calls().await;

        let receipt = orchestrator
            .upload_from(AssetSource::Library)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(receipt.location, "Homework");
        assert_eq!(client.call_count().await, 1);
        assert!(nav.current_view().files.is_empty());

        receipt.acknowledge(&nav).await.unwrap();
        assert_eq!(nav.current_view().files.len(), 1);
        assert!(!orchestrator.is_busy());
    }

    #[tokio::test]
    async fn test_cancelled_pick_uploads_nothing() {
        let (client, nav, orchestrator) = setup(Arc::new(FixedPicker(None))).await;
        nav.descend(&homework(&nav)).await.unwrap();
        client.clear_calls().await;

        assert!(orchestrator.upload_from(AssetSource::Camera).await.unwrap().is_none());
        assert_eq!(client.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_root_upload_is_denied_by_server_flag() {
        let (client, _nav, orchestrator) = setup(Arc::new(FixedPicker(Some(asset(10))))).await;
        client.clear_calls().await;

        let err = orchestrator.upload_asset(asset(10)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PermissionDenied);
        assert_eq!(client.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_oversized_asset_is_rejected_locally() {
        let (client, nav, orchestrator) = setup(Arc::new(FixedPicker(None))).await;
        nav.descend(&homework(&nav)).await.unwrap();
        client.clear_calls().await;

        let err = orchestrator.upload_asset(asset(4096)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(client.call_count().await, 0);
        assert!(!orchestrator.is_busy());
    }

    #[tokio::test]
    async fn test_second_upload_while_busy_fails() {
        let picker = Arc::new(GatedPicker::default());
        let (_client, nav, orchestrator) = setup(picker.clone()).await;
        nav.descend(&homework(&nav)).await.unwrap();
        let orchestrator = Arc::new(orchestrator);

        let first = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move { orchestrator.upload_from(AssetSource::Library).await })
        };
        picker.opened.notified().await;

        let err = orchestrator.upload_asset(asset(10)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Busy);

        picker.release.notify_one();
        let receipt = first.await.unwrap().unwrap();
        assert!(receipt.is_some());
        assert!(!orchestrator.is_busy());
    }

    #[tokio::test]
    async fn test_subfolder_override_restored_after_rejection() {
        let (client, nav, orchestrator) = setup(Arc::new(FixedPicker(Some(asset(10))))).await;
        nav.descend(&homework(&nav)).await.unwrap();
        let week = nav
            .current_view()
            .folders
            .into_iter()
            .find(|f| f.name == "Week 1")
            .unwrap();
        client.clear_calls().await;
        client.fail_next(AppError::remote(413, "File too large")).await;

        let err = orchestrator
            .upload_into_subfolder(&week, AssetSource::Document)
            .await
            .unwrap_err();
        assert_eq!(err.message, "File too large");
        assert_eq!(nav.active_folder_id(), Some(FolderId::from("homework")));

        let calls = client.calls().await;
        assert_eq!(calls[0].operation, TreeOperation::Upload);
        assert_eq!(calls[0].target.as_deref(), Some("homework-week-1"));
    }
}
