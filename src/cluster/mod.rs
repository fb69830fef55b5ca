//! Cluster API interaction module
//!
//! This module provides the connection to the remote resource store: a
//! Kubernetes-style REST API serving the Halkyon custom resources and core
//! secrets.
//!
//! # Module Structure
//!
//! - [`client`] - Main client holding the server address and acting namespace
//! - [`http`] - HTTP utilities for REST API calls
//! - [`secrets`] - Listing of secrets by type
//!
//! # Example
//!
//! ```ignore
//! use crate::cluster::client::ClusterClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ClusterClient::new("https://127.0.0.1:6443", "dev", None, false)?;
//!     let links = client.get(&client.resource_url(ResourceType::Link)).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod secrets;

pub use client::ClusterClient;
pub use secrets::{SecretCatalog, SecretClient, OPAQUE_SECRET_TYPE};
