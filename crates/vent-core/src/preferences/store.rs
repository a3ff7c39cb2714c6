//! Read-through/write-through access to persisted preference values.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::{Result, VentError};

use super::memory::MemoryStore;

/// Durable string key/value storage, the browser-local-storage seam.
///
/// Implementations must be cheap handles; the same backend is shared by
/// every preference wrapper of a page.
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw stored string, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value stored at `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed JSON access to a [`KeyValueStore`] with default fallback.
///
/// Reads never fail: a missing, unreadable or malformed value resolves to the
/// caller's defaults. When both the stored value and the defaults are JSON
/// objects, the stored keys are merged over the defaults, so a shape that
/// gained a field since the value was written still gets a value for it.
/// A stored `null` is kept (a saved `None` loads as `None`) unless the shape
/// cannot hold it, in which case that key takes its default.
#[derive(Clone)]
pub struct PreferenceStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// A store backed by a fresh, unbounded [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Loads the value at `key`, falling back to `defaults`.
    pub fn load<T>(&self, key: &str, defaults: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        self.load_stored(key, &defaults).unwrap_or(defaults)
    }

    /// Loads the value at `key` only if one is stored and readable.
    ///
    /// Used where "nothing stored" carries meaning, e.g. to keep following an
    /// OS preference until the user makes an explicit choice.
    pub fn load_stored<T>(&self, key: &str, defaults: &T) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read stored preference");
                return None;
            }
        };

        match decode(&raw, defaults) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable stored preference");
                None
            }
        }
    }

    /// Serializes `value` and overwrites `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    /// Removes whatever is stored at `key`.
    pub fn clear(&self, key: &str) -> Result<()> {
        self.backend.remove(key)
    }

    /// Load, mutate, save, return.
    ///
    /// A failed save is logged and the mutated value is still returned, so
    /// the page keeps working with in-memory state when storage is full or
    /// unavailable.
    pub fn update<T, M>(&self, key: &str, defaults: T, mutate: M) -> T
    where
        T: Serialize + DeserializeOwned,
        M: FnOnce(&mut T),
    {
        let mut value = self.load(key, defaults);
        mutate(&mut value);
        self.replace(key, &value);
        value
    }

    /// Load, shallow-merge `patch` (a JSON object) over it, save, return.
    ///
    /// A patch that is not an object, or that produces a value of the wrong
    /// shape, is logged and ignored.
    pub fn merge_patch<T>(&self, key: &str, defaults: T, patch: Value) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let current = self.load(key, defaults);
        match apply_patch(&current, patch) {
            Ok(next) => {
                self.replace(key, &next);
                next
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring preference patch");
                current
            }
        }
    }

    /// Overwrites `key` with `value`, logging instead of failing.
    ///
    /// For holders whose in-memory value is authoritative for the page: a
    /// failed write leaves storage stale but the caller keeps its value.
    pub fn replace<T>(&self, key: &str, value: &T)
    where
        T: Serialize + ?Sized,
    {
        if let Err(e) = self.save(key, value) {
            tracing::warn!(key, error = %e, "Failed to persist preference; keeping in-memory value");
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}

fn decode<T>(raw: &str, defaults: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let stored: Value = serde_json::from_str(raw)?;
    let (stored, base) = match (stored, serde_json::to_value(defaults)?) {
        (Value::Object(stored), Value::Object(base)) => (stored, base),
        (stored, _) => return Ok(serde_json::from_value(stored)?),
    };

    let mut merged = base.clone();
    merge_into(&mut merged, stored.clone());
    match serde_json::from_value(Value::Object(merged)) {
        Ok(value) => Ok(value),
        // A stored null the shape cannot hold takes the default instead.
        Err(e) if stored.values().any(Value::is_null) => {
            tracing::debug!(error = %e, "Retrying stored preference without null entries");
            let mut merged = base;
            merge_into(
                &mut merged,
                stored.into_iter().filter(|(_, value)| !value.is_null()).collect(),
            );
            Ok(serde_json::from_value(Value::Object(merged))?)
        }
        Err(e) => Err(e.into()),
    }
}

fn apply_patch<T>(current: &T, patch: Value) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(patch) = patch else {
        return Err(VentError::serialization("JSON", "patch must be a JSON object"));
    };
    let Value::Object(mut base) = serde_json::to_value(current)? else {
        return Err(VentError::serialization(
            "JSON",
            "only object-shaped preferences can be patched",
        ));
    };
    merge_into(&mut base, patch);
    Ok(serde_json::from_value(Value::Object(base))?)
}

/// Shallow merge: every overlay key replaces the base entry.
fn merge_into(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    base.extend(overlay);
}
