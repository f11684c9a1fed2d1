//! Integration tests for acting on behalf of another credential.

mod helpers;

use std::sync::Arc;

use classvault_client::MemoryTreeClient;
use classvault_client::memory::MemoryWorkspace;
use classvault_core::ErrorKind;
use classvault_core::config::{BrowserConfig, SessionConfig};
use classvault_entity::folder::Folder;
use classvault_entity::identity::{ActingIdentity, Actor};
use classvault_service::WorkspaceBrowser;

use helpers::{ScriptedPicker, asset, folder_named};

const STUDENT_TOKEN: &str = "student-token";
const ADMIN_TOKEN: &str = "admin-token";

fn browser(client: &MemoryTreeClient, identity: ActingIdentity, actor: Actor) -> WorkspaceBrowser {
    WorkspaceBrowser::new(
        Arc::new(client.clone()),
        identity,
        actor,
        Arc::new(ScriptedPicker::empty()),
        &BrowserConfig::default(),
    )
}

#[tokio::test]
async fn test_every_call_carries_the_impersonated_credential() {
    let client = MemoryTreeClient::demo(STUDENT_TOKEN, "Amara");
    let browser = browser(
        &client,
        ActingIdentity::acting_as(ADMIN_TOKEN, STUDENT_TOKEN),
        Actor::administrator("Principal Adeyemi"),
    );
    let navigation = browser.navigation();

    navigation.open().await.unwrap();
    let homework = folder_named(&browser.current_view(), "Homework");
    navigation.descend(&homework).await.unwrap();
    navigation.show_search("Week").await.unwrap();
    navigation.show_recent().await.unwrap();
    navigation.show_stats().await.unwrap();
    navigation.close_overlay().await.unwrap();
    browser.perform_create_folder("Week 3").await.unwrap();
    let receipt = browser
        .perform_upload(asset("notes.txt", "text/plain", 64))
        .await
        .unwrap();
    receipt.acknowledge(navigation).await.unwrap();

    let calls = client.calls().await;
    assert!(calls.len() >= 9);
    assert!(calls.iter().all(|c| c.credential == STUDENT_TOKEN));
}

#[tokio::test]
async fn test_impersonated_workspace_is_shown() {
    let office = MemoryWorkspace::new(Folder::new("office-root", "District Office"))
        .owned_by("Principal Adeyemi")
        .with_folder(None, Folder::new("budgets", "Budgets"));
    let client = MemoryTreeClient::demo(STUDENT_TOKEN, "Amara").with_workspace(ADMIN_TOKEN, office);

    let own = browser(
        &client,
        ActingIdentity::own(ADMIN_TOKEN),
        Actor::administrator("Principal Adeyemi"),
    );
    own.navigation().open().await.unwrap();
    assert_eq!(own.current_view().breadcrumb_label(), "District Office");

    let acting = browser(
        &client,
        ActingIdentity::acting_as(ADMIN_TOKEN, STUDENT_TOKEN),
        Actor::administrator("Principal Adeyemi"),
    );
    acting.navigation().open().await.unwrap();
    assert_eq!(acting.current_view().breadcrumb_label(), "Main Campus");
    let homework = folder_named(&acting.current_view(), "Homework");
    assert_eq!(homework.creator_name.as_deref(), Some("Amara"));
}

#[tokio::test]
async fn test_unknown_credential_is_rejected_by_server() {
    let client = MemoryTreeClient::demo(STUDENT_TOKEN, "Amara");
    let browser = browser(
        &client,
        ActingIdentity::acting_as(STUDENT_TOKEN, "expired-token"),
        Actor::named("Amara"),
    );

    let err = browser.navigation().open().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::RemoteRejection);
    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "Invalid or expired token");

    let calls = client.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].credential, "expired-token");
}

#[tokio::test]
async fn test_session_without_impersonation_uses_own_credential() {
    let session = SessionConfig {
        credential: STUDENT_TOKEN.to_string(),
        impersonated_credential: Some("   ".to_string()),
        display_name: "Amara".to_string(),
        user_id: None,
        administrator: false,
    };
    let identity = ActingIdentity::from_session(&session);
    assert!(!identity.is_impersonating());

    let client = MemoryTreeClient::demo(STUDENT_TOKEN, "Amara");
    let browser = browser(&client, identity, Actor::from_session(&session));
    browser.navigation().open().await.unwrap();
    assert_eq!(client.calls().await[0].credential, STUDENT_TOKEN);
}
