//! Canonical paths addressing one field in the candidate schema.
//!
//! A canonical path is always `section.field` (e.g. `personalInfo.email`).
//! Deeper nesting is deliberately not supported; the schema catalog is two
//! levels deep.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PathError;

/// Address of one field in the canonical record: `section.field`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalPath {
    section: String,
    field: String,
}

impl CanonicalPath {
    /// Build a path from already-split parts.
    pub fn new(section: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            field: field.into(),
        }
    }

    /// Parse a `section.field` expression.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(PathError::Empty);
        }
        let mut parts = trimmed.split('.');
        let (Some(section), Some(field), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(PathError::NotSectionField {
                path: trimmed.to_string(),
            });
        };
        if section.is_empty() || field.is_empty() {
            return Err(PathError::EmptySegment {
                path: trimmed.to_string(),
            });
        }
        Ok(Self::new(section, field))
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.field)
    }
}

impl TryFrom<String> for CanonicalPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CanonicalPath> for String {
    fn from(path: CanonicalPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_section_field() {
        let path = CanonicalPath::parse("personalInfo.email").unwrap();
        assert_eq!(path.section(), "personalInfo");
        assert_eq!(path.field(), "email");
        assert_eq!(path.to_string(), "personalInfo.email");
    }

    #[test]
    fn rejects_malformed_paths() {
        assert_eq!(CanonicalPath::parse("  "), Err(PathError::Empty));
        assert!(matches!(
            CanonicalPath::parse("personalInfo"),
            Err(PathError::NotSectionField { .. })
        ));
        assert!(matches!(
            CanonicalPath::parse("a.b.c"),
            Err(PathError::NotSectionField { .. })
        ));
        assert!(matches!(
            CanonicalPath::parse("personalInfo."),
            Err(PathError::EmptySegment { .. })
        ));
    }
}
