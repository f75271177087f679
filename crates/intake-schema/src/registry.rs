//! The schema registry: an ordered, read-only catalog of canonical fields.
//!
//! Loaded once at process start (built-in catalog or operator TOML) and
//! never mutated afterwards. Iteration order is definition order; the
//! validator reports errors in this order.

use std::collections::BTreeMap;

use intake_model::CanonicalPath;

use crate::error::SchemaError;

/// Value type of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Email,
    Phone,
    Date,
    Number,
    Boolean,
    Url,
    Array,
    Enum,
}

/// Format constraint attached to a field, if any.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FieldFormat {
    /// Regex the value must satisfy (string fields).
    Pattern(String),
    /// Closed set of allowed values (enum fields).
    AllowedValues(Vec<String>),
}

/// One entry in the schema registry. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldSpec {
    pub required: bool,
    pub value_type: ValueType,
    pub format: Option<FieldFormat>,
}

impl FieldSpec {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            required: false,
            value_type,
            format: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.format = Some(FieldFormat::Pattern(pattern.into()));
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.format = Some(FieldFormat::AllowedValues(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }
}

/// Named field within a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub spec: FieldSpec,
}

/// Ordered group of fields (personal info, contact info, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSection {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

/// The canonical field catalog.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    sections: Vec<SchemaSection>,
    // "section.field" -> (section idx, field idx)
    index: BTreeMap<String, (usize, usize)>,
}

impl SchemaRegistry {
    /// Build a registry, enforcing section/field uniqueness and format
    /// coherence (enum fields need values, patterns must compile).
    pub fn from_sections(sections: Vec<SchemaSection>) -> Result<Self, SchemaError> {
        let mut index = BTreeMap::new();
        let mut seen_sections = BTreeMap::new();
        for (si, section) in sections.iter().enumerate() {
            if seen_sections.insert(section.name.clone(), si).is_some() {
                return Err(SchemaError::DuplicateSection {
                    name: section.name.clone(),
                });
            }
            for (fi, field) in section.fields.iter().enumerate() {
                let path = format!("{}.{}", section.name, field.name);
                check_format(&path, &field.spec)?;
                if index.insert(path.clone(), (si, fi)).is_some() {
                    return Err(SchemaError::DuplicateField { path });
                }
            }
        }
        Ok(Self { sections, index })
    }

    /// Look up the spec for a canonical path.
    ///
    /// # Errors
    ///
    /// `SchemaError::UnknownPath` for paths outside the catalog; callers
    /// must treat this as a configuration error, not a validation result.
    pub fn lookup(&self, path: &CanonicalPath) -> Result<&FieldSpec, SchemaError> {
        let (si, fi) = self
            .index
            .get(&path.to_string())
            .ok_or_else(|| SchemaError::UnknownPath {
                path: path.to_string(),
            })?;
        Ok(&self.sections[*si].fields[*fi].spec)
    }

    pub fn contains(&self, path: &CanonicalPath) -> bool {
        self.index.contains_key(&path.to_string())
    }

    pub fn sections(&self) -> &[SchemaSection] {
        &self.sections
    }

    /// Iterate `(path, spec)` in definition order.
    pub fn fields(&self) -> impl Iterator<Item = (CanonicalPath, &FieldSpec)> {
        self.sections.iter().flat_map(|section| {
            section
                .fields
                .iter()
                .map(|field| (CanonicalPath::new(&section.name, &field.name), &field.spec))
        })
    }

    pub fn field_count(&self) -> usize {
        self.index.len()
    }
}

fn check_format(path: &str, spec: &FieldSpec) -> Result<(), SchemaError> {
    match &spec.format {
        Some(FieldFormat::AllowedValues(values)) if values.is_empty() => {
            Err(SchemaError::EnumWithoutValues {
                path: path.to_string(),
            })
        }
        Some(FieldFormat::Pattern(pattern)) => regex::Regex::new(pattern).map(|_| ()).map_err(
            |error| SchemaError::InvalidPattern {
                path: path.to_string(),
                message: error.to_string(),
            },
        ),
        _ => {
            if spec.value_type == ValueType::Enum
                && !matches!(spec.format, Some(FieldFormat::AllowedValues(_)))
            {
                return Err(SchemaError::EnumWithoutValues {
                    path: path.to_string(),
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str, fields: Vec<(&str, FieldSpec)>) -> SchemaSection {
        SchemaSection {
            name: name.to_string(),
            fields: fields
                .into_iter()
                .map(|(name, spec)| SchemaField {
                    name: name.to_string(),
                    spec,
                })
                .collect(),
        }
    }

    #[test]
    fn lookup_finds_registered_fields() {
        let registry = SchemaRegistry::from_sections(vec![section(
            "personalInfo",
            vec![("email", FieldSpec::new(ValueType::Email).required())],
        )])
        .unwrap();

        let path = CanonicalPath::parse("personalInfo.email").unwrap();
        let spec = registry.lookup(&path).unwrap();
        assert!(spec.required);
        assert_eq!(spec.value_type, ValueType::Email);
    }

    #[test]
    fn lookup_unknown_path_is_schema_error() {
        let registry = SchemaRegistry::from_sections(vec![]).unwrap();
        let path = CanonicalPath::parse("personalInfo.email").unwrap();
        assert!(matches!(
            registry.lookup(&path),
            Err(SchemaError::UnknownPath { .. })
        ));
    }

    #[test]
    fn duplicate_field_rejected() {
        let result = SchemaRegistry::from_sections(vec![section(
            "personalInfo",
            vec![
                ("email", FieldSpec::new(ValueType::Email)),
                ("email", FieldSpec::new(ValueType::String)),
            ],
        )]);
        assert!(matches!(result, Err(SchemaError::DuplicateField { .. })));
    }

    #[test]
    fn enum_without_values_rejected() {
        let result = SchemaRegistry::from_sections(vec![section(
            "applicationInfo",
            vec![("status", FieldSpec::new(ValueType::Enum))],
        )]);
        assert!(matches!(result, Err(SchemaError::EnumWithoutValues { .. })));
    }

    #[test]
    fn bad_pattern_rejected_at_load() {
        let result = SchemaRegistry::from_sections(vec![section(
            "personalInfo",
            vec![(
                "code",
                FieldSpec::new(ValueType::String).with_pattern("(unclosed"),
            )],
        )]);
        assert!(matches!(result, Err(SchemaError::InvalidPattern { .. })));
    }

    #[test]
    fn fields_iterate_in_definition_order() {
        let registry = SchemaRegistry::from_sections(vec![
            section("zeta", vec![("b", FieldSpec::new(ValueType::String))]),
            section("alpha", vec![("a", FieldSpec::new(ValueType::String))]),
        ])
        .unwrap();

        let order: Vec<String> = registry.fields().map(|(p, _)| p.to_string()).collect();
        assert_eq!(order, vec!["zeta.b", "alpha.a"]);
    }
}
