//! Configuration Management
//!
//! Handles persistent configuration storage for hal.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server used when nothing else is configured
pub const DEFAULT_SERVER: &str = "https://127.0.0.1:6443";

/// Namespace used when nothing else is configured
pub const DEFAULT_NAMESPACE: &str = "default";

pub const SERVER_ENV: &str = "HAL_SERVER";
pub const NAMESPACE_ENV: &str = "HAL_NAMESPACE";
pub const TOKEN_ENV: &str = "HAL_TOKEN";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Cluster API server URL
    #[serde(default)]
    pub server: Option<String>,
    /// Namespace to act in
    #[serde(default)]
    pub namespace: Option<String>,
    /// Bearer token sent to the API server
    #[serde(default)]
    pub token: Option<String>,
    /// Accept self-signed server certificates
    #[serde(default)]
    pub insecure_skip_tls_verify: bool,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hal").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file; missing or unreadable files
    /// yield the defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective server (CLI > environment > config > default)
    pub fn effective_server(&self, cli: Option<&str>) -> String {
        cli.map(|s| s.to_string())
            .or_else(|| env_var(SERVER_ENV))
            .or_else(|| self.server.clone())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string())
    }

    /// Get effective namespace (CLI > environment > config > default)
    pub fn effective_namespace(&self, cli: Option<&str>) -> String {
        cli.map(|s| s.to_string())
            .or_else(|| env_var(NAMESPACE_ENV))
            .or_else(|| self.namespace.clone())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
    }

    /// Get effective token (environment > config)
    pub fn effective_token(&self) -> Option<String> {
        env_var(TOKEN_ENV).or_else(|| self.token.clone())
    }
}
