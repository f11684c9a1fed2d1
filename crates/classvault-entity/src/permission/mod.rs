//! Permission value types.

pub mod action;
pub mod flags;

pub use action::PermissionAction;
pub use flags::PermissionFlags;
