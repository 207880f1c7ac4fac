//! Configuration structures for receipt verification.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::payment::Provider;
use crate::error::{PayverifyError, Result};

/// Main configuration for payverify.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Registered providers and their receipt URL templates.
    pub providers: Vec<Provider>,

    /// Receipt fetch configuration.
    pub fetch: FetchConfig,

    /// Payment store configuration.
    pub store: StoreConfig,
}

/// Receipt fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Number of body characters to log at debug level after a fetch.
    pub preview_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            preview_chars: 2000,
        }
    }
}

/// Payment store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON-lines file verified payments are appended to.
    pub payments_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            payments_path: PathBuf::from("payments.jsonl"),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| PayverifyError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| PayverifyError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Find a registered provider by exact name.
    pub fn provider(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Register a provider, replacing any entry with the same name.
    pub fn upsert_provider(&mut self, provider: Provider) {
        match self.providers.iter_mut().find(|p| p.name == provider.name) {
            Some(existing) => *existing = provider,
            None => self.providers.push(provider),
        }
    }
}
