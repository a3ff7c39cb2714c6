//! Site configuration model (`site.toml`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::preferences::{ACCESSIBILITY_KEY, COMPARISON_KEY, THEME_KEY};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    pub storage: StorageConfig,
    pub preferences: PreferenceConfig,
    pub logging: LoggingConfig,
}

impl SiteConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under `storage.directory`.
    #[default]
    File,
    /// Process memory; nothing survives a restart.
    Memory,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for the file backend. Defaults to the platform config dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Byte quota for the memory backend, emulating browser storage limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_bytes: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PreferenceConfig {
    pub theme_key: String,
    pub accessibility_key: String,
    pub comparison_key: String,
    /// Maximum number of products in the comparison list; unbounded if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_capacity: Option<usize>,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            theme_key: THEME_KEY.to_string(),
            accessibility_key: ACCESSIBILITY_KEY.to_string(),
            comparison_key: COMPARISON_KEY.to_string(),
            comparison_capacity: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `vent_core=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
