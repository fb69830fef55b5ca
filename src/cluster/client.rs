//! Cluster Client
//!
//! Main client for the cluster API: the server address, the acting namespace
//! and the HTTP connection. Built once at startup and shared by reference.

use super::http::ClusterHttpClient;
use crate::error::{HalError, HalResult};
use crate::resource::ResourceType;
use anyhow::Result;
use serde_json::Value;
use url::Url;

/// Main cluster client
#[derive(Clone)]
pub struct ClusterClient {
    pub http: ClusterHttpClient,
    pub server: String,
    pub namespace: String,
}

impl ClusterClient {
    /// Create a new cluster client
    pub fn new(
        server: &str,
        namespace: &str,
        token: Option<String>,
        insecure: bool,
    ) -> HalResult<Self> {
        let parsed = Url::parse(server)
            .map_err(|e| HalError::InvalidInput(format!("invalid server URL '{}': {}", server, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(HalError::InvalidInput(format!(
                "invalid server URL '{}': scheme must be http or https",
                server
            )));
        }
        if namespace.is_empty() {
            return Err(HalError::InvalidInput("namespace must not be empty".to_string()));
        }

        let http = ClusterHttpClient::new(token, insecure)?;

        Ok(Self {
            http,
            server: server.trim_end_matches('/').to_string(),
            namespace: namespace.to_string(),
        })
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Value> {
        self.http.get(url).await
    }

    /// Make a GET request, `None` when the object does not exist
    pub async fn get_optional(&self, url: &str) -> Result<Option<Value>> {
        self.http.get_optional(url).await
    }

    /// Make a POST request
    pub async fn post(&self, url: &str, body: &Value) -> Result<Value> {
        self.http.post(url, body).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        self.http.delete(url, body).await
    }

    // =========================================================================
    // Halkyon custom resources
    // =========================================================================

    /// Build the collection URL of a Halkyon resource kind
    pub fn resource_url(&self, resource_type: ResourceType) -> String {
        let def = resource_type.definition();
        format!(
            "{}/apis/{}/{}/namespaces/{}/{}",
            self.server,
            def.group,
            def.version,
            urlencoding::encode(&self.namespace),
            def.plural
        )
    }

    /// Build the URL of a single named Halkyon resource
    pub fn named_resource_url(&self, resource_type: ResourceType, name: &str) -> String {
        format!(
            "{}/{}",
            self.resource_url(resource_type),
            urlencoding::encode(name)
        )
    }

    // =========================================================================
    // Core API
    // =========================================================================

    /// Build the secrets URL, optionally restricted to one secret type
    pub fn secrets_url(&self, secret_type: Option<&str>) -> String {
        let base = format!(
            "{}/api/v1/namespaces/{}/secrets",
            self.server,
            urlencoding::encode(&self.namespace)
        );
        match secret_type {
            Some(t) => format!(
                "{}?fieldSelector={}",
                base,
                urlencoding::encode(&format!("type={}", t))
            ),
            None => base,
        }
    }
}

/// Extract the `metadata.name` of every item of a list response
pub fn item_names(response: &Value) -> Vec<String> {
    response
        .get("items")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.pointer("/metadata/name").and_then(|v| v.as_str()))
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> ClusterClient {
        ClusterClient::new("https://cluster.example:6443/", "dev", None, false).unwrap()
    }

    #[test]
    fn test_resource_urls() {
        let c = client();
        assert_eq!(
            c.resource_url(ResourceType::Link),
            "https://cluster.example:6443/apis/halkyon.io/v1beta1/namespaces/dev/links"
        );
        assert_eq!(
            c.named_resource_url(ResourceType::Component, "backend"),
            "https://cluster.example:6443/apis/halkyon.io/v1beta1/namespaces/dev/components/backend"
        );
    }

    #[test]
    fn test_secrets_url_with_field_selector() {
        assert_eq!(
            client().secrets_url(Some("Opaque")),
            "https://cluster.example:6443/api/v1/namespaces/dev/secrets?fieldSelector=type%3DOpaque"
        );
    }

    #[test]
    fn test_rejects_bad_server() {
        assert!(matches!(
            ClusterClient::new("not a url", "dev", None, false),
            Err(HalError::InvalidInput(_))
        ));
        assert!(matches!(
            ClusterClient::new("ftp://cluster", "dev", None, false),
            Err(HalError::InvalidInput(_))
        ));
        assert!(matches!(
            ClusterClient::new("https://cluster", "", None, false),
            Err(HalError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_item_names_skips_unnamed() {
        let response = json!({
            "items": [
                {"metadata": {"name": "a"}},
                {"metadata": {}},
                {"metadata": {"name": "b"}}
            ]
        });
        assert_eq!(item_names(&response), vec!["a", "b"]);
        assert!(item_names(&json!({})).is_empty());
    }
}
