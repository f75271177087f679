//! TOML loader for operator-supplied catalog overrides.
//!
//! ```toml
//! [[sections]]
//! name = "personalInfo"
//!
//! [[sections.fields]]
//! name = "email"
//! type = "email"
//! required = true
//!
//! [[sections.fields]]
//! name = "source"
//! type = "enum"
//! allowed = ["ats", "manual"]
//! ```

use serde::Deserialize;

use crate::error::SchemaError;
use crate::registry::{FieldFormat, FieldSpec, SchemaField, SchemaRegistry, SchemaSection, ValueType};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    sections: Vec<SectionEntry>,
}

#[derive(Debug, Deserialize)]
struct SectionEntry {
    name: String,
    #[serde(default)]
    fields: Vec<FieldEntry>,
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
    name: String,
    #[serde(rename = "type")]
    value_type: ValueType,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    allowed: Option<Vec<String>>,
}

/// Parse a catalog from TOML text and build a registry from it.
///
/// All structural rules (uniqueness, enum values, pattern compilation) are
/// enforced here, at load time.
pub fn catalog_from_toml(text: &str) -> Result<SchemaRegistry, SchemaError> {
    let file: CatalogFile = toml::from_str(text)?;
    let sections = file
        .sections
        .into_iter()
        .map(|section| SchemaSection {
            name: section.name,
            fields: section.fields.into_iter().map(into_field).collect(),
        })
        .collect();
    SchemaRegistry::from_sections(sections)
}

fn into_field(entry: FieldEntry) -> SchemaField {
    let format = match (entry.allowed, entry.pattern) {
        (Some(values), _) => Some(FieldFormat::AllowedValues(values)),
        (None, Some(pattern)) => Some(FieldFormat::Pattern(pattern)),
        (None, None) => None,
    };
    SchemaField {
        name: entry.name,
        spec: FieldSpec {
            required: entry.required,
            value_type: entry.value_type,
            format,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_model::CanonicalPath;

    #[test]
    fn loads_catalog_from_toml() {
        let toml = r#"
            [[sections]]
            name = "personalInfo"

            [[sections.fields]]
            name = "email"
            type = "email"
            required = true

            [[sections.fields]]
            name = "employeeCode"
            type = "string"
            pattern = "^[A-Z]{2}-\\d{4}$"

            [[sections.fields]]
            name = "source"
            type = "enum"
            allowed = ["ats", "manual"]
        "#;

        let registry = catalog_from_toml(toml).unwrap();
        assert_eq!(registry.field_count(), 3);

        let email = registry
            .lookup(&CanonicalPath::parse("personalInfo.email").unwrap())
            .unwrap();
        assert!(email.required);
        assert_eq!(email.value_type, ValueType::Email);
    }

    #[test]
    fn enum_without_allowed_values_fails_load() {
        let toml = r#"
            [[sections]]
            name = "applicationInfo"

            [[sections.fields]]
            name = "status"
            type = "enum"
        "#;
        assert!(matches!(
            catalog_from_toml(toml),
            Err(SchemaError::EnumWithoutValues { .. })
        ));
    }

    #[test]
    fn malformed_toml_fails_load() {
        assert!(matches!(
            catalog_from_toml("sections = 3"),
            Err(SchemaError::Toml { .. })
        ));
    }
}
