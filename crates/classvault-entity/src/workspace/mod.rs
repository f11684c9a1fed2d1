//! Workspace-level entities: the root container, search results, and
//! statistics.

pub mod item;
pub mod model;
pub mod search;
pub mod stats;

pub use item::{BrowserItem, ItemKind};
pub use model::Workspace;
pub use search::SearchResults;
pub use stats::{CategoryCount, WorkspaceStats};
