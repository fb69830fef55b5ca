//! Resource abstraction layer
//!
//! This module defines the closed set of resource kinds hal manages and the
//! uniform client surface every kind exposes to the operation framework.
//!
//! # Architecture
//!
//! - [`registry`] - Resource kinds, their API coordinates and kind lookup
//! - [`model`] - Typed manifests for components, capabilities and links
//! - [`entity`] - The [`HalkyonEntity`] trait and its cluster-backed client
//!
//! # Example
//!
//! ```ignore
//! use crate::resource::{ResourceClient, ResourceType, HalkyonEntity};
//!
//! async fn list_links(cluster: &ClusterClient) -> HalResult<Vec<String>> {
//!     ResourceClient::new(ResourceType::Link, cluster).list().await
//! }
//! ```

pub mod entity;
pub mod model;
pub mod registry;

pub use entity::{DeleteOptions, HalkyonEntity, PropagationPolicy, ResourceClient};
pub use model::{
    Capability, CapabilitySpec, Component, ComponentSpec, DeploymentMode, EnvVar, Link,
    LinkMechanism, LinkSpec, Manifest, ObjectMeta, Parameter,
};
pub use registry::{known_resource_types, resource_type_for, Object, ResourceDef, ResourceType};
