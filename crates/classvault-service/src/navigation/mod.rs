//! Navigation state machine over the remote tree.

pub mod controller;
pub mod intent;
pub mod view;

pub use controller::{ActiveFolderOverride, NavigationController};
pub use intent::{NavOutcome, NavigationIntent};
pub use view::BrowserView;
