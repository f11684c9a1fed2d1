//! # classvault-entity
//!
//! Domain models for the ClassVault workspace browser. Every struct here is
//! the canonical, already-normalized form of something the tree service
//! returns; wire shapes live in `classvault-client`. Models are transient
//! and only ever held in memory for the lifetime of a view.

pub mod file;
pub mod folder;
pub mod identity;
pub mod navigation;
pub mod permission;
pub mod workspace;
