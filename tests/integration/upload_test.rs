//! Integration tests for the upload flow.

mod helpers;

use classvault_client::memory::TreeOperation;
use classvault_core::{AppError, ErrorKind};
use classvault_entity::file::AssetSource;
use classvault_entity::identity::Actor;
use classvault_service::NavOutcome;

use helpers::{TEACHER_NAME, TestBrowser, ScriptedPicker, asset, folder_named};

fn teacher_with(assets: Vec<classvault_entity::file::PickedAsset>) -> TestBrowser {
    TestBrowser::with_picker(Actor::named(TEACHER_NAME), ScriptedPicker::returning(assets))
}

async fn upload_calls(ctx: &TestBrowser) -> usize {
    ctx.client
        .calls()
        .await
        .iter()
        .filter(|c| c.operation == TreeOperation::Upload)
        .count()
}

#[tokio::test]
async fn test_upload_refreshes_only_after_acknowledge() {
    let ctx = teacher_with(vec![asset("Long division.pdf", "application/pdf", 4_096)]);
    ctx.open_path(&["Homework", "Week 1"]).await;
    ctx.client.clear_calls().await;

    let receipt = ctx
        .browser
        .uploads()
        .upload_from(AssetSource::Document)
        .await
        .unwrap()
        .expect("asset picked");
    assert_eq!(receipt.location, "Week 1");
    assert_eq!(receipt.file.name, "Long division.pdf");
    assert_eq!(
        receipt.folder_id.as_ref().map(|id| id.as_str()),
        Some("homework-week-1")
    );

    // Nothing reloaded yet.
    assert_eq!(ctx.client.call_count().await, 1);
    assert_eq!(ctx.browser.current_view().files.len(), 1);

    let outcome = receipt.acknowledge(ctx.browser.navigation()).await.unwrap();
    assert_eq!(outcome, NavOutcome::Committed);
    assert_eq!(ctx.browser.current_view().files.len(), 2);

    let calls = ctx.client.calls().await;
    assert_eq!(calls[1].operation, TreeOperation::ListFolder);
    assert_eq!(calls[1].target.as_deref(), Some("homework-week-1"));
}

#[tokio::test]
async fn test_cancelled_pick_sends_nothing() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Homework"]).await;

    let receipt = ctx
        .browser
        .uploads()
        .upload_from(AssetSource::Camera)
        .await
        .unwrap();
    assert!(receipt.is_none());
    assert_eq!(upload_calls(&ctx).await, 0);
    assert!(!ctx.browser.uploads().is_busy());
}

#[tokio::test]
async fn test_upload_into_subfolder_without_navigating() {
    let ctx = teacher_with(vec![asset("Quiz.png", "image/png", 1_024)]);
    ctx.open_path(&["Homework"]).await;
    let week = folder_named(&ctx.browser.current_view(), "Week 2");

    let receipt = ctx
        .browser
        .uploads()
        .upload_into_subfolder(&week, AssetSource::Library)
        .await
        .unwrap()
        .expect("asset picked");
    assert_eq!(receipt.location, "Week 2");

    let calls = ctx.client.calls().await;
    let upload = calls
        .iter()
        .find(|c| c.operation == TreeOperation::Upload)
        .unwrap();
    assert_eq!(upload.target.as_deref(), Some("homework-week-2"));

    let navigation = ctx.browser.navigation();
    assert_eq!(navigation.breadcrumb().len(), 1);
    assert_eq!(
        navigation.active_folder_id().map(|id| id.to_string()),
        Some("homework".to_string())
    );

    let stored = ctx.client.workspace(helpers::TEACHER_TOKEN).await.unwrap();
    assert!(stored.contains_file(receipt.file.id.as_str()));
}

#[tokio::test]
async fn test_rejected_subfolder_upload_restores_active_folder() {
    let ctx = teacher_with(vec![asset("Lab video.mp4", "video/mp4", 8_192)]);
    ctx.open_path(&["Homework"]).await;
    let week = folder_named(&ctx.browser.current_view(), "Week 1");

    ctx.client
        .fail_next(AppError::remote(413, "File exceeds the 25 MB limit"))
        .await;
    let err = ctx
        .browser
        .uploads()
        .upload_into_subfolder(&week, AssetSource::Camera)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RemoteRejection);
    assert_eq!(err.message, "File exceeds the 25 MB limit");

    assert_eq!(
        ctx.browser
            .navigation()
            .active_folder_id()
            .map(|id| id.to_string()),
        Some("homework".to_string())
    );
    assert!(!ctx.browser.uploads().is_busy());
}

#[tokio::test]
async fn test_subfolder_without_upload_right_is_refused() {
    let ctx = teacher_with(vec![asset("map.png", "image/png", 100)]);
    ctx.open_path(&[]).await;
    let library = folder_named(&ctx.browser.current_view(), "Library");
    ctx.client.clear_calls().await;

    let err = ctx
        .browser
        .uploads()
        .upload_into_subfolder(&library, AssetSource::Document)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::PermissionDenied);
    assert_eq!(ctx.client.call_count().await, 0);
    assert_eq!(ctx.browser.navigation().active_folder_id(), None);
}

#[tokio::test]
async fn test_oversized_asset_is_rejected_locally() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Shared Projects"]).await;

    let err = ctx
        .browser
        .perform_upload(asset("Assembly.mov", "video/quicktime", 60 * 1024 * 1024))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(upload_calls(&ctx).await, 0);
}

#[tokio::test]
async fn test_missing_mime_type_falls_back_to_octet_stream() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Shared Projects"]).await;

    let receipt = ctx
        .browser
        .perform_upload(asset("diagram", "", 512))
        .await
        .unwrap();
    assert_eq!(receipt.file.mime_type, "application/octet-stream");
    receipt.acknowledge(ctx.browser.navigation()).await.unwrap();
    assert_eq!(ctx.browser.current_view().files.len(), 2);
}
