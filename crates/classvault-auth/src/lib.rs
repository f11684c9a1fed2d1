//! # classvault-auth
//!
//! Decides locally whether the acting user may upload, create folders, or
//! delete, before any request reaches the tree service.

pub mod permission;

pub use permission::{DeleteTarget, EffectivePermission, PermissionResolver, PermissionSource};
