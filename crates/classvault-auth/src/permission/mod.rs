//! Permission resolution from server flags, ownership, folder management
//! rights, and the administrator role.

pub mod ownership;
pub mod resolver;

pub use resolver::{DeleteTarget, EffectivePermission, PermissionResolver, PermissionSource};
