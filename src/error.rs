//! Error types
//!
//! Every layer below the binary reports failures through [`HalError`]; the
//! variants are the categories a user can act on.

use thiserror::Error;

/// Errors surfaced by hal operations
#[derive(Error, Debug)]
pub enum HalError {
    /// Structurally malformed arguments (e.g. an env pair without `=`)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Otherwise-valid inputs combined in a disallowed way
    #[error("{0}")]
    Validation(String),

    /// An object's kind does not match any known resource type
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    /// A required candidate list is empty
    #[error("no valid {0} currently exist on the cluster")]
    NoTargetsAvailable(String),

    /// The cluster rejected or failed a request
    #[error("remote request failed: {0:#}")]
    Remote(#[from] anyhow::Error),
}

/// Alias for hal results.
pub type HalResult<T> = Result<T, HalError>;
