//! Validation outcome types.

use serde::Serialize;

/// Kind of a per-field validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    MissingRequired,
    InvalidFormat,
    InvalidEnum,
}

/// One per-field validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Canonical path of the offending field.
    pub path: String,
    pub kind: ErrorKind,
    pub message: String,
}

/// Result of one validation pass over one canonical record.
///
/// Errors are ordered by schema catalog section/field order, so repeated
/// validation of the same record yields identical results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
