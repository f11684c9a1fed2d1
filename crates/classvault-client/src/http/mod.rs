//! HTTP tree client over the workspace REST API.

mod client;
mod wire;

pub use client::HttpTreeClient;
