//! # classvault-service
//!
//! Browser-side use cases for ClassVault: the navigation state machine, the
//! upload flow, and the [`WorkspaceBrowser`] facade a renderer drives.
//!
//! Services follow constructor injection: the tree client, identity, and
//! configuration are provided at construction time.

pub mod browser;
pub mod navigation;
pub mod upload;

pub use browser::WorkspaceBrowser;
pub use navigation::{
    ActiveFolderOverride, BrowserView, NavOutcome, NavigationController, NavigationIntent,
};
pub use upload::{AssetPicker, UploadOrchestrator, UploadReceipt};
