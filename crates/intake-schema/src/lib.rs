//! Canonical candidate field catalog.
//!
//! The registry is the single source of truth for section/field names,
//! required flags, value types and format constraints. It is loaded once at
//! process start (built-in catalog or a TOML override) and read-only
//! thereafter.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod registry;

pub use catalog::builtin_catalog;
pub use error::SchemaError;
pub use loader::catalog_from_toml;
pub use registry::{FieldFormat, FieldSpec, SchemaField, SchemaRegistry, SchemaSection, ValueType};
