//! Configuration service implementation.
//!
//! Loads the site configuration from `site.toml` (by default
//! `~/.config/vent/site.toml`), writing a default file when none exists.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use vent_core::config::SiteConfig;
use vent_core::error::Result;

use crate::paths::SitePaths;

/// Configuration service that loads and caches the site configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<SiteConfig>>>,
}

impl ConfigService {
    /// Creates a service for the platform default `site.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(SitePaths::config_file()?))
    }

    /// Creates a service for a specific file (tests, custom deployments).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// An unreadable file is logged and the defaults are used.
    pub fn get_config(&self) -> SiteConfig {
        if let Ok(cached) = self.config.read() {
            if let Some(config) = cached.as_ref() {
                return config.clone();
            }
        }

        let loaded = self.load().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Using default site configuration");
            SiteConfig::default()
        });

        if let Ok(mut cache) = self.config.write() {
            *cache = Some(loaded.clone());
        }
        loaded
    }

    /// Reads `site.toml`, creating it with defaults if it does not exist.
    pub fn load(&self) -> Result<SiteConfig> {
        if !self.path.exists() {
            let config = SiteConfig::default();
            self.save(&config)?;
            tracing::info!(path = %self.path.display(), "Created default site configuration");
            return Ok(config);
        }

        let content = fs::read_to_string(&self.path)?;
        SiteConfig::from_toml_str(&content)
    }

    /// Writes `config` to `site.toml` and refreshes the cache.
    pub fn save(&self, config: &SiteConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, config.to_toml_string()?)?;

        if let Ok(mut cache) = self.config.write() {
            *cache = Some(config.clone());
        }
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cache) = self.config.write() {
            *cache = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vent_core::config::StorageBackend;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join("site.toml");
        let service = ConfigService::with_path(&path);

        let config = service.get_config();
        assert_eq!(config, SiteConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_reads_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("site.toml");
        fs::write(&path, "[storage]\nbackend = \"memory\"\n").unwrap();

        let service = ConfigService::with_path(&path);
        assert_eq!(service.get_config().storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_cache_and_invalidate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("site.toml");
        let service = ConfigService::with_path(&path);
        assert_eq!(service.get_config().logging.level, "info");

        fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(service.get_config().logging.level, "info");

        service.invalidate_cache();
        assert_eq!(service.get_config().logging.level, "debug");
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("site.toml");
        fs::write(&path, "[storage\nbackend = ").unwrap();

        let service = ConfigService::with_path(&path);
        assert!(service.load().unwrap_err().is_serialization());
        assert_eq!(service.get_config(), SiteConfig::default());
    }
}
