//! Entity clients
//!
//! [`HalkyonEntity`] is the whole surface the operation framework sees of a
//! resource kind. [`ResourceClient`] implements it against the cluster API,
//! one instance per kind.

use super::model::Manifest;
use super::registry::ResourceType;
use crate::cluster::client::{item_names, ClusterClient};
use crate::error::{HalError, HalResult};
use async_trait::async_trait;
use serde_json::{json, Value};

/// How dependents of a deleted object are cleaned up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropagationPolicy {
    Orphan,
    Background,
    #[default]
    Foreground,
}

impl PropagationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orphan => "Orphan",
            Self::Background => "Background",
            Self::Foreground => "Foreground",
        }
    }
}

/// Options accompanying a delete request
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    pub propagation_policy: PropagationPolicy,
}

impl DeleteOptions {
    fn to_value(&self) -> Value {
        json!({
            "kind": "DeleteOptions",
            "apiVersion": "v1",
            "propagationPolicy": self.propagation_policy.as_str(),
        })
    }
}

/// Operations every resource kind's client provides
#[async_trait]
pub trait HalkyonEntity: Send + Sync {
    /// Kind this client manages
    fn resource_type(&self) -> ResourceType;

    /// Fetch an object by name, `None` if it does not exist
    async fn get(&self, name: &str) -> HalResult<Option<Value>>;

    /// Submit a new object
    async fn create(&self, manifest: &Manifest) -> HalResult<()>;

    async fn delete(&self, name: &str, options: &DeleteOptions) -> HalResult<()>;

    /// Names of all objects of this kind, in server order
    async fn list(&self) -> HalResult<Vec<String>>;

    /// Best-effort variant of [`HalkyonEntity::list`]: empty on failure
    async fn list_known_names(&self) -> Vec<String> {
        match self.list().await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Failed to list {}: {}", self.resource_type(), e);
                Vec::new()
            }
        }
    }

    /// Namespace this client acts in
    fn namespace(&self) -> &str;
}

/// Entity client for one Halkyon kind
pub struct ResourceClient<'a> {
    resource_type: ResourceType,
    client: &'a ClusterClient,
}

impl<'a> ResourceClient<'a> {
    pub fn new(resource_type: ResourceType, client: &'a ClusterClient) -> Self {
        Self {
            resource_type,
            client,
        }
    }
}

#[async_trait]
impl HalkyonEntity for ResourceClient<'_> {
    fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    async fn get(&self, name: &str) -> HalResult<Option<Value>> {
        let url = self.client.named_resource_url(self.resource_type, name);
        Ok(self.client.get_optional(&url).await?)
    }

    async fn create(&self, manifest: &Manifest) -> HalResult<()> {
        let body = manifest.to_value()?;
        let url = self.client.resource_url(self.resource_type);
        tracing::info!("Creating {} '{}'", self.resource_type, manifest.name());
        self.client.post(&url, &body).await?;
        Ok(())
    }

    async fn delete(&self, name: &str, options: &DeleteOptions) -> HalResult<()> {
        if name.is_empty() {
            return Err(HalError::InvalidInput(format!(
                "a {} name is required",
                self.resource_type
            )));
        }
        let url = self.client.named_resource_url(self.resource_type, name);
        tracing::info!("Deleting {} '{}'", self.resource_type, name);
        self.client.delete(&url, Some(&options.to_value())).await?;
        Ok(())
    }

    async fn list(&self) -> HalResult<Vec<String>> {
        let url = self.client.resource_url(self.resource_type);
        let response = self.client.get(&url).await?;
        Ok(item_names(&response))
    }

    fn namespace(&self) -> &str {
        &self.client.namespace
    }
}
