//! Resource Registry - the closed set of manageable resource kinds
//!
//! Every Halkyon kind hal knows about is listed here together with the API
//! coordinates used to reach it.

use crate::error::{HalError, HalResult};
use serde_json::Value;
use std::fmt;

/// API group serving the Halkyon custom resources
pub const HALKYON_GROUP: &str = "halkyon.io";

/// API version of the Halkyon custom resources
pub const HALKYON_VERSION: &str = "v1beta1";

/// API coordinates of a resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDef {
    pub display_name: &'static str,
    /// `kind` as written in manifests
    pub kind: &'static str,
    pub group: &'static str,
    pub version: &'static str,
    /// Path segment of the collection
    pub plural: &'static str,
}

impl ResourceDef {
    /// `apiVersion` as written in manifests
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }
}

const COMPONENT: ResourceDef = ResourceDef {
    display_name: "Components",
    kind: "Component",
    group: HALKYON_GROUP,
    version: HALKYON_VERSION,
    plural: "components",
};

const CAPABILITY: ResourceDef = ResourceDef {
    display_name: "Capabilities",
    kind: "Capability",
    group: HALKYON_GROUP,
    version: HALKYON_VERSION,
    plural: "capabilities",
};

const LINK: ResourceDef = ResourceDef {
    display_name: "Links",
    kind: "Link",
    group: HALKYON_GROUP,
    version: HALKYON_VERSION,
    plural: "links",
};

/// Kind of a manageable resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Component,
    Capability,
    Link,
}

impl ResourceType {
    /// Lowercase name used in messages and generated resource names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Capability => "capability",
            Self::Link => "link",
        }
    }

    pub fn definition(&self) -> &'static ResourceDef {
        match self {
            Self::Component => &COMPONENT,
            Self::Capability => &CAPABILITY,
            Self::Link => &LINK,
        }
    }

    /// Map a declared kind, in any letter case, to a resource type
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind.to_lowercase().as_str() {
            "component" => Some(Self::Component),
            "capability" => Some(Self::Capability),
            "link" => Some(Self::Link),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All known resource types, in listing order
pub fn known_resource_types() -> &'static [ResourceType] {
    &[
        ResourceType::Capability,
        ResourceType::Component,
        ResourceType::Link,
    ]
}

/// Anything that declares a `kind`
pub trait Object {
    fn kind(&self) -> &str;
}

impl Object for Value {
    fn kind(&self) -> &str {
        self.get("kind").and_then(|v| v.as_str()).unwrap_or("")
    }
}

/// Resolve the resource type of an object from its declared kind
pub fn resource_type_for(object: Option<&dyn Object>) -> HalResult<ResourceType> {
    let Some(object) = object else {
        return Err(HalError::InvalidInput("must provide a non-empty object".to_string()));
    };
    let kind = object.kind();
    ResourceType::from_kind(kind)
        .ok_or_else(|| HalError::UnknownResourceType(kind.to_lowercase()))
}
