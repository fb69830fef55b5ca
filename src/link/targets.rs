//! Link target and secret resolution
//!
//! A link target may be a capability or a component. Both catalogs are
//! listed and merged into one list of `"<catalog>: <name>"` entries so the
//! user can pick from a single prompt; [`extract_target_name`] recovers the
//! bare name from the chosen entry.

use crate::cluster::SecretCatalog;
use crate::error::{HalError, HalResult};
use crate::resource::HalkyonEntity;
use std::fmt;

/// Separates the catalog prefix from the name in a rendered candidate
pub const TARGET_SEPARATOR: &str = ": ";

/// Catalog a link target comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCatalog {
    Capability,
    Component,
}

impl TargetCatalog {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Capability => "capability",
            Self::Component => "component",
        }
    }
}

/// A resource a link can point to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCandidate {
    pub catalog: TargetCatalog,
    pub name: String,
}

impl TargetCandidate {
    /// Render as `"<catalog>: <name>"`
    pub fn render(&self) -> String {
        format!("{}{}{}", self.catalog.prefix(), TARGET_SEPARATOR, self.name)
    }
}

impl fmt::Display for TargetCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Recover the bare name from a rendered candidate. The catalog prefixes
/// never contain the separator, so its first occurrence ends the prefix.
pub fn extract_target_name(rendered: &str) -> &str {
    match rendered.find(TARGET_SEPARATOR) {
        Some(index) => &rendered[index + TARGET_SEPARATOR.len()..],
        None => rendered,
    }
}

/// Outcome of listing link targets
#[derive(Debug, Clone)]
pub struct TargetResolution {
    /// Capabilities first, then components, each in server order
    pub candidates: Vec<TargetCandidate>,
    /// Whether the given target names an existing candidate
    pub is_valid: bool,
}

impl TargetResolution {
    pub fn rendered(&self) -> Vec<String> {
        self.candidates.iter().map(TargetCandidate::render).collect()
    }
}

/// List capabilities and components and check `given` against them.
///
/// Fails as a whole if either listing fails, and with
/// [`HalError::NoTargetsAvailable`] when both catalogs are empty.
pub async fn resolve_targets(
    capabilities: &dyn HalkyonEntity,
    components: &dyn HalkyonEntity,
    given: &str,
) -> HalResult<TargetResolution> {
    let mut candidates = Vec::new();

    for (catalog, client) in [
        (TargetCatalog::Capability, capabilities),
        (TargetCatalog::Component, components),
    ] {
        let names = client.list().await?;
        tracing::debug!("Found {} {} target(s)", names.len(), catalog.prefix());
        candidates.extend(names.into_iter().map(|name| TargetCandidate { catalog, name }));
    }

    if candidates.is_empty() {
        return Err(HalError::NoTargetsAvailable(
            "capabilities or components".to_string(),
        ));
    }

    let is_valid = !given.is_empty() && candidates.iter().any(|c| c.name == given);

    Ok(TargetResolution {
        candidates,
        is_valid,
    })
}

/// Outcome of listing secrets a link may reference
#[derive(Debug, Clone)]
pub struct SecretResolution {
    pub secrets: Vec<String>,
    /// Whether the given secret is among `secrets`
    pub is_valid: bool,
}

/// List secrets of `secret_type` and check `given` against them
pub async fn resolve_secrets(
    catalog: &dyn SecretCatalog,
    secret_type: &str,
    given: &str,
) -> HalResult<SecretResolution> {
    let secrets = catalog.list_secret_names(secret_type).await?;
    if secrets.is_empty() {
        return Err(HalError::NoTargetsAvailable("secrets".to_string()));
    }

    let is_valid = !given.is_empty() && secrets.iter().any(|s| s == given);

    Ok(SecretResolution { secrets, is_valid })
}
