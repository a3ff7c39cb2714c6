//! Storage backends for visitor preferences.

mod file_store;

pub use file_store::FileStore;

use std::sync::Arc;

use vent_core::config::{StorageBackend, StorageConfig};
use vent_core::error::Result;
use vent_core::preferences::{KeyValueStore, MemoryStore};

use crate::paths::SitePaths;

/// Builds the backend selected by `config`.
///
/// The file backend uses `config.directory`, or the platform preferences
/// directory when none is set.
pub fn open_backend(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::Memory => {
            let store = match config.quota_bytes {
                Some(quota) => MemoryStore::with_quota(quota),
                None => MemoryStore::new(),
            };
            tracing::debug!(quota = ?config.quota_bytes, "Using in-memory preference storage");
            Ok(Arc::new(store))
        }
        StorageBackend::File => {
            let dir = match &config.directory {
                Some(dir) => dir.clone(),
                None => SitePaths::preferences_dir()?,
            };
            tracing::debug!(dir = %dir.display(), "Using file preference storage");
            Ok(Arc::new(FileStore::new(dir)))
        }
    }
}
