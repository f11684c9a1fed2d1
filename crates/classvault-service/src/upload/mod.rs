//! Upload flow: pick an asset, check permission, send it, hand back a
//! receipt the caller acknowledges to refresh the view.

pub mod orchestrator;
pub mod picker;

pub use orchestrator::{UploadOrchestrator, UploadReceipt};
pub use picker::AssetPicker;
