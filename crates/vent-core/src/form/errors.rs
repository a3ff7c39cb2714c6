use serde::Serialize;
use std::collections::BTreeMap;

/// Per-field validation messages, keyed by field name.
///
/// An absent key means the field is currently valid. Keys always come from
/// the form's registered rules, so the map never names a field the form does
/// not have.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already has one.
    pub(crate) fn insert_first(&mut self, field: &'static str, message: String) {
        self.0.entry(field).or_insert(message);
    }

    pub(crate) fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field names with an error, in alphabetical order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}
