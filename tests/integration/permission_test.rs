//! Integration tests for locally resolved upload, create-folder, and delete
//! permissions.

mod helpers;

use classvault_client::memory::TreeOperation;
use classvault_core::ErrorKind;
use classvault_entity::identity::Actor;
use classvault_entity::workspace::BrowserItem;

use helpers::{TEACHER_NAME, TestBrowser, asset, folder_named};

fn item_named(ctx: &TestBrowser, name: &str) -> BrowserItem {
    ctx.browser
        .current_view()
        .items()
        .into_iter()
        .find(|item| item.name() == name)
        .unwrap_or_else(|| panic!("no item named '{name}'"))
}

#[tokio::test]
async fn test_owner_cannot_delete_top_level_folder() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&[]).await;
    ctx.client.clear_calls().await;

    let homework = item_named(&ctx, "Homework");
    assert!(!ctx.browser.can_delete(&homework));

    let err = ctx.browser.perform_delete(&homework).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::PermissionDenied);
    assert_eq!(
        err.message,
        "Only administrators can delete the top-level folder 'Homework'"
    );
    assert_eq!(ctx.client.call_count().await, 0);
}

#[tokio::test]
async fn test_administrator_deletes_top_level_folder() {
    let ctx = TestBrowser::new(Actor::administrator("Principal Adeyemi"));
    ctx.open_path(&[]).await;
    ctx.client.clear_calls().await;

    let library = item_named(&ctx, "Library");
    assert!(ctx.browser.can_delete(&library));
    ctx.browser.perform_delete(&library).await.unwrap();

    let calls = ctx.client.calls().await;
    assert_eq!(calls[0].operation, TreeOperation::Delete);
    assert_eq!(calls[0].target.as_deref(), Some("library"));
    assert_eq!(calls[1].operation, TreeOperation::ListRoot);

    let view = ctx.browser.current_view();
    assert!(view.folders.iter().all(|f| f.name != "Library"));
    assert_eq!(view.folders.len(), 2);
}

#[tokio::test]
async fn test_owner_deletes_nested_folder() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Homework"]).await;

    let week = item_named(&ctx, "Week 1");
    assert!(ctx.browser.can_delete(&week));
    ctx.browser.perform_delete(&week).await.unwrap();

    let names: Vec<_> = ctx
        .browser
        .current_view()
        .folders
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, vec!["Week 2".to_string()]);
}

#[tokio::test]
async fn test_non_owner_cannot_delete_unmanaged_folder() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Library"]).await;
    ctx.client.clear_calls().await;

    let reading = item_named(&ctx, "Reading Lists");
    let err = ctx.browser.perform_delete(&reading).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::PermissionDenied);
    assert_eq!(err.message, "You don't have permission to delete 'Reading Lists'");
    assert_eq!(ctx.client.call_count().await, 0);
}

#[tokio::test]
async fn test_managed_folder_allows_deleting_others_files() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Shared Projects"]).await;

    let poster = item_named(&ctx, "Science fair.jpg");
    assert!(ctx.browser.can_delete(&poster));
    ctx.browser.perform_delete(&poster).await.unwrap();
    assert!(ctx.browser.current_view().files.is_empty());
}

#[tokio::test]
async fn test_search_results_have_no_managing_container() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Shared Projects"]).await;
    ctx.browser.navigation().show_search("Science").await.unwrap();

    let poster = item_named(&ctx, "Science fair.jpg");
    assert!(!ctx.browser.can_delete(&poster));
}

#[tokio::test]
async fn test_server_flag_blocks_upload_before_any_request() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Library"]).await;
    ctx.client.clear_calls().await;

    assert!(!ctx.browser.can_upload_here());
    let err = ctx
        .browser
        .perform_upload(asset("notes.txt", "text/plain", 12))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::PermissionDenied);
    assert_eq!(err.message, "You don't have permission to upload to 'Library'");
    assert_eq!(ctx.client.call_count().await, 0);
}

#[tokio::test]
async fn test_administrator_overrides_server_flag() {
    let ctx = TestBrowser::new(Actor::administrator("Principal Adeyemi"));
    ctx.open_path(&[]).await;
    assert!(ctx.browser.can_upload_here());
    assert!(ctx.browser.can_create_folder_here());

    let ctx = TestBrowser::teacher();
    ctx.open_path(&[]).await;
    assert!(!ctx.browser.can_upload_here());
    assert!(!ctx.browser.can_create_folder_here());
}

#[tokio::test]
async fn test_owner_creates_folder_in_own_folder() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Homework"]).await;
    assert!(ctx.browser.can_create_folder_here());

    let created = ctx.browser.perform_create_folder("  Week 3 ").await.unwrap();
    assert_eq!(created.name, "Week 3");
    assert_eq!(created.creator_name.as_deref(), Some(TEACHER_NAME));

    let view = ctx.browser.current_view();
    let week = folder_named(&view, "Week 3");
    assert_eq!(week.id, created.id);
}
