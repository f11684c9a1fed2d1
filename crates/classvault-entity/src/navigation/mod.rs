//! Navigation value types.

pub mod mode;
pub mod path;

pub use mode::ViewMode;
pub use path::NavigationPathEntry;
