//! Per-system mapping tables.
//!
//! A mapping table is read-only configuration translating external path
//! expressions into canonical paths. Tables are checked against the schema
//! registry when loaded; a table referencing an unknown canonical path is
//! refused outright rather than failing per record at sync time.

use intake_model::CanonicalPath;
use intake_schema::SchemaRegistry;

use crate::error::MappingError;
use crate::path::ExternalPath;

/// One `(external path, canonical path)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub external: ExternalPath,
    pub canonical: CanonicalPath,
}

/// Field mapping configuration for one external system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    system_id: String,
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    pub fn new(system_id: impl Into<String>) -> Self {
        Self {
            system_id: system_id.into(),
            entries: Vec::new(),
        }
    }

    /// Add one mapping pair, parsing both sides.
    pub fn with_entry(mut self, external: &str, canonical: &str) -> Result<Self, MappingError> {
        self.entries.push(MappingEntry {
            external: ExternalPath::parse(external)?,
            canonical: CanonicalPath::parse(canonical)?,
        });
        Ok(self)
    }

    /// Build a table from `(external, canonical)` string pairs, preserving
    /// their order.
    pub fn from_pairs<I, A, B>(system_id: impl Into<String>, pairs: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut table = Self::new(system_id);
        for (external, canonical) in pairs {
            table = table.with_entry(external.as_ref(), canonical.as_ref())?;
        }
        Ok(table)
    }

    /// Refuse any entry whose canonical path is not in the registry.
    pub fn validate(&self, registry: &SchemaRegistry) -> Result<(), MappingError> {
        for entry in &self.entries {
            if !registry.contains(&entry.canonical) {
                return Err(MappingError::UnknownCanonicalPath {
                    external: entry.external.to_string(),
                    canonical: entry.canonical.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
