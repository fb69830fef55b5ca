//! hal - create and link Halkyon components, capabilities and links
//!
//! # Module Structure
//!
//! - [`resource`] - Resource kinds, manifests and the per-kind entity client
//! - [`operation`] - The complete/validate/run framework shared by commands
//! - [`link`] - Link target resolution and the link create workflow
//! - [`component`], [`capability`] - Create delegates for the other kinds
//! - [`cluster`] - Connection to the cluster API
//! - [`ui`] - Interactive prompts
//! - [`config`] - Persistent user configuration

pub mod capability;
pub mod cluster;
pub mod component;
pub mod config;
pub mod error;
pub mod link;
pub mod operation;
pub mod resource;
pub mod ui;

pub use error::{HalError, HalResult};
