//! # classvault-client
//!
//! The [`TreeClient`] seam between the browser and the remote workspace
//! service, with an HTTP implementation over the REST API and an in-memory
//! implementation for tests and offline demos.
//!
//! Every call takes the [`ActingIdentity`](classvault_entity::identity::ActingIdentity)
//! explicitly; the effective credential is the only one ever sent. Clients
//! never retry.

pub mod http;
pub mod memory;
pub mod traits;

pub use http::HttpTreeClient;
pub use memory::MemoryTreeClient;
pub use traits::{TreeClient, UploadRequest};
