//! Resource manifests
//!
//! Typed shapes of the objects hal submits to the cluster. Each is built
//! once per command from validated input and discarded after submission.

use super::registry::{Object, ResourceType};
use crate::error::{HalError, HalResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Object metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
}

/// Environment variable handed to a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

/// Capability configuration parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

fn type_meta(resource_type: ResourceType) -> (String, String) {
    let def = resource_type.definition();
    (def.api_version(), def.kind.to_string())
}

// =============================================================================
// Link
// =============================================================================

/// How a link injects the target's coordinates into the component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LinkMechanism {
    /// Reference an existing secret
    Secret {
        #[serde(rename = "ref")]
        secret_ref: String,
    },
    /// Inject a list of environment variables
    Env { envs: Vec<EnvVar> },
}

impl LinkMechanism {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Secret { .. } => "Secret",
            Self::Env { .. } => "Env",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSpec {
    pub component_name: String,
    #[serde(flatten)]
    pub mechanism: LinkMechanism,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: LinkSpec,
}

impl Link {
    pub fn new(name: &str, namespace: &str, component_name: &str, mechanism: LinkMechanism) -> Self {
        let (api_version, kind) = type_meta(ResourceType::Link);
        Self {
            api_version,
            kind,
            metadata: ObjectMeta {
                name: name.to_string(),
                namespace: namespace.to_string(),
            },
            spec: LinkSpec {
                component_name: component_name.to_string(),
                mechanism,
            },
        }
    }
}

// =============================================================================
// Component
// =============================================================================

/// Whether a component runs from pushed sources or a built image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    #[default]
    Dev,
    Build,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    pub deployment_mode: DeploymentMode,
    pub runtime: String,
    pub version: String,
    pub port: u16,
    pub expose_service: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: ComponentSpec,
}

impl Component {
    pub fn new(name: &str, namespace: &str, spec: ComponentSpec) -> Self {
        let (api_version, kind) = type_meta(ResourceType::Component);
        Self {
            api_version,
            kind,
            metadata: ObjectMeta {
                name: name.to_string(),
                namespace: namespace.to_string(),
            },
            spec,
        }
    }
}

// =============================================================================
// Capability
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySpec {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: CapabilitySpec,
}

impl Capability {
    pub fn new(name: &str, namespace: &str, spec: CapabilitySpec) -> Self {
        let (api_version, kind) = type_meta(ResourceType::Capability);
        Self {
            api_version,
            kind,
            metadata: ObjectMeta {
                name: name.to_string(),
                namespace: namespace.to_string(),
            },
            spec,
        }
    }
}

// =============================================================================
// Manifest
// =============================================================================

/// Any object hal can submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Manifest {
    Component(Component),
    Capability(Capability),
    Link(Link),
}

impl Manifest {
    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Self::Component(c) => &c.metadata,
            Self::Capability(c) => &c.metadata,
            Self::Link(l) => &l.metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata().name
    }

    pub fn to_value(&self) -> HalResult<Value> {
        let value = match self {
            Self::Component(c) => serde_json::to_value(c),
            Self::Capability(c) => serde_json::to_value(c),
            Self::Link(l) => serde_json::to_value(l),
        };
        value.map_err(|e| HalError::InvalidInput(format!("cannot serialize {}: {}", self.name(), e)))
    }

    pub fn to_yaml(&self) -> HalResult<String> {
        let value = self.to_value()?;
        serde_yaml::to_string(&value)
            .map_err(|e| HalError::InvalidInput(format!("cannot render {}: {}", self.name(), e)))
    }
}

impl Object for Manifest {
    fn kind(&self) -> &str {
        match self {
            Self::Component(c) => &c.kind,
            Self::Capability(c) => &c.kind,
            Self::Link(l) => &l.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::registry::resource_type_for;
    use serde_json::json;

    #[test]
    fn test_secret_link_wire_format() {
        let link = Link::new(
            "api-link",
            "dev",
            "api",
            LinkMechanism::Secret {
                secret_ref: "db-secret".to_string(),
            },
        );
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(
            value,
            json!({
                "apiVersion": "halkyon.io/v1beta1",
                "kind": "Link",
                "metadata": {"name": "api-link", "namespace": "dev"},
                "spec": {"componentName": "api", "type": "Secret", "ref": "db-secret"}
            })
        );
    }

    #[test]
    fn test_env_link_wire_format() {
        let link = Link::new(
            "api-link",
            "dev",
            "api",
            LinkMechanism::Env {
                envs: vec![EnvVar {
                    name: "DB_HOST".to_string(),
                    value: "db".to_string(),
                }],
            },
        );
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["spec"]["type"], "Env");
        assert_eq!(value["spec"]["envs"][0]["name"], "DB_HOST");
        assert!(value["spec"].get("ref").is_none());

        let parsed: Link = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, link);
    }

    #[test]
    fn test_manifest_kind_maps_to_resource_type() {
        let manifest = Manifest::Capability(Capability::new(
            "db",
            "dev",
            CapabilitySpec {
                category: "database".to_string(),
                kind: "postgres".to_string(),
                version: "10".to_string(),
                parameters: vec![],
            },
        ));
        assert_eq!(
            resource_type_for(Some(&manifest as &dyn Object)).unwrap(),
            ResourceType::Capability
        );
        assert_eq!(manifest.name(), "db");
    }

    #[test]
    fn test_component_yaml_rendering() {
        let manifest = Manifest::Component(Component::new(
            "backend",
            "dev",
            ComponentSpec {
                deployment_mode: DeploymentMode::Dev,
                runtime: "spring-boot".to_string(),
                version: "2.1.6.RELEASE".to_string(),
                port: 8080,
                expose_service: true,
                envs: vec![],
            },
        ));
        let yaml = manifest.to_yaml().unwrap();
        assert!(yaml.contains("kind: Component"));
        assert!(yaml.contains("deploymentMode: dev"));
        assert!(yaml.contains("exposeService: true"));
        assert!(!yaml.contains("envs"));
    }
}
