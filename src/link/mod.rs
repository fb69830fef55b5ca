//! Links between components and their targets
//!
//! - [`targets`] - Resolution of link targets and referenced secrets
//! - [`create`] - The link create delegate

pub mod create;
pub mod targets;

pub use create::{LinkCreate, LinkCreateOptions};
pub use targets::{
    extract_target_name, resolve_secrets, resolve_targets, SecretResolution, TargetCandidate,
    TargetCatalog, TargetResolution, TARGET_SEPARATOR,
};
