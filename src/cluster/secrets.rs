//! Cluster Secrets
//!
//! Listing of secrets that a Link may reference.

use super::client::ClusterClient;
use crate::error::HalResult;
use async_trait::async_trait;
use serde_json::Value;

/// Secret type holding arbitrary user-defined data
pub const OPAQUE_SECRET_TYPE: &str = "Opaque";

/// Source of secret names in the acting namespace
#[async_trait]
pub trait SecretCatalog: Send + Sync {
    /// List the names of secrets of the given type
    async fn list_secret_names(&self, secret_type: &str) -> HalResult<Vec<String>>;
}

/// Secret catalog backed by the cluster core API
pub struct SecretClient<'a> {
    client: &'a ClusterClient,
}

impl<'a> SecretClient<'a> {
    pub fn new(client: &'a ClusterClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretCatalog for SecretClient<'_> {
    async fn list_secret_names(&self, secret_type: &str) -> HalResult<Vec<String>> {
        let url = self.client.secrets_url(Some(secret_type));
        let response = self.client.get(&url).await?;
        Ok(names_of_type(&response, secret_type))
    }
}

/// Names of listed secrets whose `type` matches; servers ignoring the field
/// selector still yield a correctly filtered list
fn names_of_type(response: &Value, secret_type: &str) -> Vec<String> {
    response
        .get("items")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter(|item| {
                    item.get("type")
                        .and_then(|v| v.as_str())
                        .map(|t| t == secret_type)
                        .unwrap_or(false)
                })
                .filter_map(|item| item.pointer("/metadata/name").and_then(|v| v.as_str()))
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}
