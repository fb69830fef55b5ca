//! Interactive prompting
//!
//! Delegates never talk to the terminal directly; they ask a [`Prompter`]
//! for selections and confirmations so that workflows can be driven by a
//! scripted prompter in tests.
//!
//! # Architecture
//!
//! - [`select`] - Selection list state (navigation, key handling)
//! - [`terminal`] - Crossterm-backed prompter used by the binary

pub mod select;
pub mod terminal;

use crate::error::HalResult;

pub use terminal::TerminalPrompter;

/// User interaction surface
pub trait Prompter: Send + Sync {
    /// Block until one of `candidates` is chosen; `candidates` must be non-empty
    fn select(&self, prompt: &str, candidates: &[String]) -> HalResult<String>;

    /// Ask a yes/no question
    fn confirm(&self, prompt: &str) -> HalResult<bool>;

    /// Report a choice that has been made, without waiting for input
    fn announce_selection(&self, label: &str, value: &str);
}

/// Prompt text used when an explicitly supplied value was rejected
pub fn select_from_other_error_message(label: &str, value: &str) -> String {
    format!("{} '{}', please select a valid one", label, value)
}
