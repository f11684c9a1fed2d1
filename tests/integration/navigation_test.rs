//! Integration tests for breadcrumb navigation and response ordering.

mod helpers;

use classvault_client::memory::TreeOperation;
use classvault_core::{AppError, ErrorKind};
use classvault_entity::folder::Folder;
use classvault_entity::navigation::ViewMode;
use classvault_service::{NavOutcome, NavigationIntent};

use helpers::{TestBrowser, folder_named};

#[tokio::test]
async fn test_descend_twice_then_ascend() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Homework", "Week 1"]).await;

    let view = ctx.browser.current_view();
    assert_eq!(view.breadcrumb_label(), "Main Campus / Homework / Week 1");
    assert_eq!(view.files.len(), 1);
    assert_eq!(view.files[0].name, "Fractions worksheet.pdf");

    let outcome = ctx.browser.navigation().ascend().await.unwrap();
    assert_eq!(outcome, NavOutcome::Committed);

    let view = ctx.browser.current_view();
    assert_eq!(view.mode, ViewMode::Folder);
    assert_eq!(view.breadcrumb_label(), "Main Campus / Homework");
    let names: Vec<_> = view.folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Week 1", "Week 2"]);
}

#[tokio::test]
async fn test_ascend_from_first_level_reloads_root() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Library"]).await;
    ctx.client.clear_calls().await;

    let navigation = ctx.browser.navigation();
    assert_eq!(navigation.ascend().await.unwrap(), NavOutcome::Committed);
    assert_eq!(navigation.mode(), ViewMode::Structure);
    assert!(navigation.breadcrumb().is_empty());
    assert_eq!(navigation.active_folder_id(), None);

    let calls = ctx.client.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].operation, TreeOperation::ListRoot);

    // At the root there is nowhere left to go.
    assert_eq!(navigation.ascend().await.unwrap(), NavOutcome::ExitRequested);
    assert_eq!(ctx.client.call_count().await, 1);
}

#[tokio::test]
async fn test_stale_folder_response_is_discarded() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&[]).await;
    let root = ctx.browser.current_view();
    let homework = folder_named(&root, "Homework");
    let library = folder_named(&root, "Library");

    let gate = ctx.client.hold_folder("homework").await;
    let navigation = ctx.browser.navigation();

    let (slow, fast) = tokio::join!(navigation.descend(&homework), async {
        // Wait until the first request is in flight.
        loop {
            let calls = ctx.client.calls().await;
            if calls
                .iter()
                .any(|c| c.target.as_deref() == Some("homework"))
            {
                break;
            }
            tokio::task::yield_now().await;
        }
        let outcome = navigation.descend(&library).await;
        gate.notify_one();
        outcome
    });

    assert_eq!(fast.unwrap(), NavOutcome::Committed);
    assert_eq!(slow.unwrap(), NavOutcome::Discarded);

    // The second descend is planned on top of the pending one.
    let view = ctx.browser.current_view();
    assert_eq!(view.breadcrumb_label(), "Main Campus / Homework / Library");
    assert_eq!(view.folders.len(), 1);
    assert_eq!(view.folders[0].name, "Reading Lists");
    assert_eq!(
        navigation.active_folder_id().map(|id| id.to_string()),
        Some("library".to_string())
    );
}

#[tokio::test]
async fn test_stale_failure_is_not_reported() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&[]).await;
    // Removed on the server after the root was listed.
    let vanished = Folder::new("old-clubs", "Clubs");

    let gate = ctx.client.hold_folder("old-clubs").await;
    let navigation = ctx.browser.navigation();

    let (slow, fast) = tokio::join!(navigation.descend(&vanished), async {
        loop {
            if ctx.client.call_count().await >= 2 {
                break;
            }
            tokio::task::yield_now().await;
        }
        let outcome = navigation.reset().await;
        gate.notify_one();
        outcome
    });

    assert_eq!(fast.unwrap(), NavOutcome::Committed);
    assert_eq!(slow.unwrap(), NavOutcome::Discarded);
    assert_eq!(navigation.mode(), ViewMode::Structure);
    assert!(navigation.breadcrumb().is_empty());
}

#[tokio::test]
async fn test_ascend_while_descend_in_flight_returns_to_parent() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Homework"]).await;
    let week = folder_named(&ctx.browser.current_view(), "Week 1");
    let before = ctx.browser.navigation().breadcrumb();

    let gate = ctx.client.hold_folder("homework-week-1").await;
    let navigation = ctx.browser.navigation();

    let (slow, fast) = tokio::join!(navigation.descend(&week), async {
        loop {
            let calls = ctx.client.calls().await;
            if calls
                .iter()
                .any(|c| c.target.as_deref() == Some("homework-week-1"))
            {
                break;
            }
            tokio::task::yield_now().await;
        }
        let outcome = navigation.ascend().await;
        gate.notify_one();
        outcome
    });

    assert_eq!(slow.unwrap(), NavOutcome::Discarded);
    assert_eq!(fast.unwrap(), NavOutcome::Committed);
    assert_eq!(navigation.breadcrumb(), before);
    assert_eq!(navigation.mode(), ViewMode::Folder);

    let calls = ctx.client.calls().await;
    let last = calls.last().unwrap();
    assert_eq!(last.operation, TreeOperation::ListFolder);
    assert_eq!(last.target.as_deref(), Some("homework"));
}

#[tokio::test]
async fn test_failed_in_flight_descend_plans_from_committed_view() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Homework"]).await;
    let week = folder_named(&ctx.browser.current_view(), "Week 1");
    let navigation = ctx.browser.navigation();

    ctx.client
        .fail_next(AppError::remote(500, "Database unavailable"))
        .await;
    navigation.descend(&week).await.unwrap_err();

    // Back from Homework, not from the Week 1 that never opened.
    assert_eq!(navigation.ascend().await.unwrap(), NavOutcome::Committed);
    assert_eq!(navigation.mode(), ViewMode::Structure);
    assert!(navigation.breadcrumb().is_empty());
}

#[tokio::test]
async fn test_failed_descend_keeps_previous_view() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Homework"]).await;
    let before = ctx.browser.current_view();
    let week = folder_named(&before, "Week 2");

    ctx.client
        .fail_next(AppError::remote(403, "You do not have access to this folder"))
        .await;
    let err = ctx.browser.navigation().descend(&week).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::RemoteRejection);
    assert_eq!(err.status, Some(403));
    assert_eq!(err.message, "You do not have access to this folder");

    let after = ctx.browser.current_view();
    assert_eq!(after.breadcrumb, before.breadcrumb);
    assert_eq!(after.folders, before.folders);
}

#[tokio::test]
async fn test_programmatic_reload_keeps_breadcrumb() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Homework", "Week 2"]).await;
    ctx.client.clear_calls().await;

    let navigation = ctx.browser.navigation();
    let outcome = navigation
        .navigate(NavigationIntent::ProgrammaticReload)
        .await
        .unwrap();
    assert_eq!(outcome, NavOutcome::Committed);
    assert_eq!(navigation.breadcrumb().len(), 2);

    let calls = ctx.client.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].operation, TreeOperation::ListFolder);
    assert_eq!(calls[0].target.as_deref(), Some("homework-week-2"));
}

#[tokio::test]
async fn test_return_to_root_clears_breadcrumb() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Library", "Reading Lists"]).await;

    let navigation = ctx.browser.navigation();
    navigation
        .navigate(NavigationIntent::ReturnToRoot)
        .await
        .unwrap();

    let view = ctx.browser.current_view();
    assert_eq!(view.mode, ViewMode::Structure);
    assert_eq!(view.breadcrumb_label(), "Main Campus");
    assert_eq!(view.folders.len(), 3);
}

#[tokio::test]
async fn test_recent_and_stats_overlays() {
    let ctx = TestBrowser::teacher();
    ctx.open_path(&["Homework"]).await;
    let navigation = ctx.browser.navigation();

    navigation.show_recent().await.unwrap();
    let view = ctx.browser.current_view();
    assert_eq!(view.mode, ViewMode::Recent);
    assert_eq!(view.files[0].name, "Science fair.jpg");

    navigation.show_stats().await.unwrap();
    let stats = ctx.browser.current_view().stats.unwrap();
    assert_eq!(stats.total_files, 5);

    navigation.close_overlay().await.unwrap();
    let view = ctx.browser.current_view();
    assert_eq!(view.mode, ViewMode::Folder);
    assert_eq!(view.breadcrumb_label(), "Main Campus / Homework");
}
