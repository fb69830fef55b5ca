//! `name=value` pairs
//!
//! Pairs are split on the first `=`: `FOO=bar=baz` names `FOO` with value
//! `bar=baz`. The name must be non-empty and free of whitespace; the value
//! is kept verbatim and may be empty.

use crate::error::{HalError, HalResult};
use crate::resource::{EnvVar, Parameter};

/// Split one `name=value` pair; `what` names the pair in the error
pub fn parse_pair(pair: &str, what: &str) -> HalResult<(String, String)> {
    match pair.split_once('=') {
        Some((name, value)) if !name.is_empty() && !name.contains(char::is_whitespace) => {
            Ok((name.to_string(), value.to_string()))
        },
        _ => Err(HalError::InvalidInput(format!(
            "invalid {}: {}, format must be 'name=value'",
            what, pair
        ))),
    }
}

/// Parse every pair, failing on the first malformed one
pub fn parse_env_pairs(pairs: &[String]) -> HalResult<Vec<EnvVar>> {
    pairs
        .iter()
        .map(|pair| parse_pair(pair, "environment variable").map(|(name, value)| EnvVar { name, value }))
        .collect()
}

pub fn parse_parameters(pairs: &[String]) -> HalResult<Vec<Parameter>> {
    pairs
        .iter()
        .map(|pair| parse_pair(pair, "parameter").map(|(name, value)| Parameter { name, value }))
        .collect()
}
