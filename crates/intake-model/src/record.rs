//! The canonical candidate record.
//!
//! A [`CanonicalRecord`] is a two-level mapping: section name → field name →
//! value. It is produced fresh by the field mapper for every raw input and
//! treated as immutable once validated; later pipeline stages return new
//! record values instead of mutating in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path::CanonicalPath;

/// Schema-conformant candidate record, independent of source system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalRecord {
    sections: BTreeMap<String, BTreeMap<String, Value>>,
}

impl CanonicalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value at a canonical path, if present.
    pub fn get(&self, path: &CanonicalPath) -> Option<&Value> {
        self.sections.get(path.section())?.get(path.field())
    }

    /// String value at a canonical path, if present and a string.
    pub fn get_str(&self, path: &CanonicalPath) -> Option<&str> {
        self.get(path)?.as_str()
    }

    /// True only when the value at `path` is an explicit JSON `true`.
    pub fn is_true(&self, path: &CanonicalPath) -> bool {
        self.get(path).and_then(Value::as_bool) == Some(true)
    }

    /// Write a value, creating the section container as needed.
    pub fn set(&mut self, path: &CanonicalPath, value: Value) {
        self.sections
            .entry(path.section().to_string())
            .or_default()
            .insert(path.field().to_string(), value);
    }

    /// All fields of one section, if the section exists.
    pub fn section(&self, name: &str) -> Option<&BTreeMap<String, Value>> {
        self.sections.get(name)
    }

    /// Iterate `(path, value)` over every populated field.
    pub fn fields(&self) -> impl Iterator<Item = (CanonicalPath, &Value)> {
        self.sections.iter().flat_map(|(section, fields)| {
            fields
                .iter()
                .map(move |(field, value)| (CanonicalPath::new(section, field), value))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.sections.values().all(BTreeMap::is_empty)
    }

    /// Number of populated fields across all sections.
    pub fn field_count(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }
}
