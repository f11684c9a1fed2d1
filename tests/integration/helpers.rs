//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use classvault_client::MemoryTreeClient;
use classvault_core::config::BrowserConfig;
use classvault_core::result::AppResult;
use classvault_entity::file::{AssetSource, PickedAsset};
use classvault_entity::folder::Folder;
use classvault_entity::identity::{ActingIdentity, Actor};
use classvault_service::{AssetPicker, BrowserView, WorkspaceBrowser};

/// Credential the demo workspace is registered under.
pub const TEACHER_TOKEN: &str = "teacher-token";

/// Display name that owns the demo's personal folders.
pub const TEACHER_NAME: &str = "Ms. Rivera";

/// Test browser context
pub struct TestBrowser {
    /// The in-memory server, for asserting recorded calls
    pub client: MemoryTreeClient,
    /// The browser under test
    pub browser: WorkspaceBrowser,
}

impl TestBrowser {
    /// A browser over the demo workspace for `actor`.
    pub fn new(actor: Actor) -> Self {
        Self::with_picker(actor, ScriptedPicker::empty())
    }

    /// A browser whose picker hands out `picker`'s assets.
    pub fn with_picker(actor: Actor, picker: ScriptedPicker) -> Self {
        let client = MemoryTreeClient::demo(TEACHER_TOKEN, TEACHER_NAME);
        let browser = WorkspaceBrowser::new(
            Arc::new(client.clone()),
            ActingIdentity::own(TEACHER_TOKEN),
            actor,
            Arc::new(picker),
            &BrowserConfig::default(),
        );
        Self { client, browser }
    }

    /// A browser signed in as the demo teacher.
    pub fn teacher() -> Self {
        Self::new(Actor::named(TEACHER_NAME))
    }

    /// Opens the root, then each named folder in turn.
    pub async fn open_path(&self, names: &[&str]) {
        let navigation = self.browser.navigation();
        navigation.open().await.expect("open root");
        for name in names {
            let folder = folder_named(&self.browser.current_view(), name);
            navigation.descend(&folder).await.expect("descend");
        }
    }
}

/// The folder called `name` in `view`.
pub fn folder_named(view: &BrowserView, name: &str) -> Folder {
    view.folders
        .iter()
        .find(|f| f.name == name)
        .cloned()
        .unwrap_or_else(|| panic!("no folder named '{name}' in view"))
}

/// A small local asset.
pub fn asset(name: &str, mime: &str, size: u64) -> PickedAsset {
    PickedAsset {
        uri: format!("file:///tmp/{name}"),
        mime_type: mime.to_string(),
        display_name: name.to_string(),
        size_bytes: Some(size),
    }
}

/// Picker that returns queued assets in order, then cancels.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    queue: Mutex<Vec<PickedAsset>>,
}

impl ScriptedPicker {
    /// A picker that always cancels.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A picker that returns `assets` one per pick.
    pub fn returning(assets: Vec<PickedAsset>) -> Self {
        Self {
            queue: Mutex::new(assets),
        }
    }
}

#[async_trait]
impl AssetPicker for ScriptedPicker {
    async fn pick(&self, _source: AssetSource) -> AppResult<Option<PickedAsset>> {
        let mut queue = self.queue.lock().await;
        if queue.is_empty() {
            Ok(None)
        } else {
            Ok(Some(queue.remove(0)))
        }
    }
}
