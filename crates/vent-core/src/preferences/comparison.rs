//! Product comparison list.

use serde::{Deserialize, Serialize};

use super::store::PreferenceStore;

/// Ordered set of product identifiers.
///
/// Insertion order is kept for display; an id appears at most once. Stored
/// lists containing duplicates are collapsed on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ComparisonList(Vec<String>);

impl ComparisonList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|existing| existing == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    /// Appends `id` unless present. Returns whether the list changed.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Removes `id` if present. Returns whether the list changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != id);
        self.0.len() != before
    }
}

impl From<Vec<String>> for ComparisonList {
    fn from(ids: Vec<String>) -> Self {
        let mut list = Self::new();
        for id in ids {
            list.insert(id);
        }
        list
    }
}

impl From<ComparisonList> for Vec<String> {
    fn from(list: ComparisonList) -> Self {
        list.0
    }
}

/// Result of [`ComparisonPreferences::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Already in the list; nothing was written.
    AlreadyPresent,
    /// A capacity is configured and has been reached; nothing was written.
    Full,
}

/// Write-through holder of the comparison list for one page load.
///
/// Storage is read once at hydration; every change writes the whole list.
/// A failed write is logged and the change is kept in memory.
#[derive(Debug)]
pub struct ComparisonPreferences {
    store: PreferenceStore,
    key: String,
    capacity: Option<usize>,
    list: ComparisonList,
}

impl ComparisonPreferences {
    /// Loads the stored list. `capacity: None` means unbounded.
    pub fn hydrate(store: PreferenceStore, key: impl Into<String>, capacity: Option<usize>) -> Self {
        let key = key.into();
        let list = store.load(&key, ComparisonList::default());
        tracing::debug!(key = %key, count = list.len(), "Hydrated comparison list");
        Self {
            store,
            key,
            capacity,
            list,
        }
    }

    pub fn list(&self) -> &ComparisonList {
        &self.list
    }

    pub fn ids(&self) -> &[String] {
        self.list.ids()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.list.contains(id)
    }

    pub fn count(&self) -> usize {
        self.list.len()
    }

    /// When empty the floating "compare" button is not rendered.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.list.len() >= cap)
    }

    /// Adds `id`. Adding an id that is already listed is a no-op.
    pub fn add(&mut self, id: impl Into<String>) -> AddOutcome {
        let id = id.into();
        if self.list.contains(&id) {
            return AddOutcome::AlreadyPresent;
        }
        if self.is_full() {
            tracing::debug!(key = %self.key, id = %id, "Comparison list is full");
            return AddOutcome::Full;
        }
        self.list.insert(id);
        self.store.replace(&self.key, &self.list);
        AddOutcome::Added
    }

    /// Removes `id`. Removing an id that is not listed is a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.list.contains(id) {
            return false;
        }
        self.list.remove(id);
        self.store.replace(&self.key, &self.list);
        true
    }

    /// Adds or removes `id` (the product card checkbox). Returns whether the
    /// id is listed afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.list.contains(id) {
            self.remove(id);
            false
        } else {
            self.add(id) == AddOutcome::Added
        }
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.store.clear(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "Failed to clear comparison list");
        }
        self.list = ComparisonList::default();
    }
}
