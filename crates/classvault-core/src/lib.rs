//! # classvault-core
//!
//! Core crate for the ClassVault workspace browser. Contains configuration
//! schemas, typed identifiers, name/size/MIME formatting helpers, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other ClassVault crates.

pub mod config;
pub mod error;
pub mod format;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
