//! Built-in candidate field catalog.
//!
//! This is the default registry used when the operator supplies no catalog
//! override. Section order here is the order validation errors are reported
//! in.

use crate::registry::{FieldSpec, SchemaField, SchemaRegistry, SchemaSection, ValueType};

/// Sources a candidate record may arrive from.
const APPLICATION_SOURCES: &[&str] = &["ats", "hrms", "referral", "careerSite", "manual"];

/// Pipeline stages a candidate may be in.
const APPLICATION_STATUSES: &[&str] = &[
    "new",
    "screening",
    "interview",
    "offer",
    "hired",
    "rejected",
];

/// Build the default candidate catalog.
pub fn builtin_catalog() -> SchemaRegistry {
    let sections = vec![
        section(
            "personalInfo",
            vec![
                ("fullName", FieldSpec::new(ValueType::String).required()),
                ("email", FieldSpec::new(ValueType::Email).required()),
                ("phone", FieldSpec::new(ValueType::Phone)),
                ("dateOfBirth", FieldSpec::new(ValueType::Date)),
                ("nationality", FieldSpec::new(ValueType::String)),
            ],
        ),
        section(
            "contactInfo",
            vec![
                ("address", FieldSpec::new(ValueType::String)),
                ("city", FieldSpec::new(ValueType::String)),
                ("country", FieldSpec::new(ValueType::String)),
                ("linkedinUrl", FieldSpec::new(ValueType::Url)),
            ],
        ),
        section(
            "professionalInfo",
            vec![
                ("currentTitle", FieldSpec::new(ValueType::String)),
                ("currentEmployer", FieldSpec::new(ValueType::String)),
                ("yearsOfExperience", FieldSpec::new(ValueType::Number)),
                ("skills", FieldSpec::new(ValueType::Array)),
                ("education", FieldSpec::new(ValueType::String)),
            ],
        ),
        section(
            "applicationInfo",
            vec![
                (
                    "appliedPosition",
                    FieldSpec::new(ValueType::String).required(),
                ),
                (
                    "source",
                    FieldSpec::new(ValueType::Enum)
                        .with_allowed_values(APPLICATION_SOURCES.iter().copied()),
                ),
                ("applicationDate", FieldSpec::new(ValueType::Date)),
                ("expectedSalary", FieldSpec::new(ValueType::Number)),
                (
                    "status",
                    FieldSpec::new(ValueType::Enum)
                        .with_allowed_values(APPLICATION_STATUSES.iter().copied()),
                ),
            ],
        ),
        section(
            "complianceInfo",
            vec![
                ("gdprConsent", FieldSpec::new(ValueType::Boolean)),
                ("dataProcessingConsent", FieldSpec::new(ValueType::Boolean)),
                ("consentDate", FieldSpec::new(ValueType::Date)),
                ("dataRetentionPeriod", FieldSpec::new(ValueType::Number)),
                ("dataRetentionUntil", FieldSpec::new(ValueType::Date)),
                ("processingPurpose", FieldSpec::new(ValueType::String)),
                ("canTransferData", FieldSpec::new(ValueType::Boolean)),
                ("rightToWithdraw", FieldSpec::new(ValueType::Boolean)),
            ],
        ),
    ];

    // The built-in catalog is statically coherent; from_sections only fails
    // on duplicates or malformed formats, covered by tests below.
    SchemaRegistry::from_sections(sections).unwrap_or_else(|error| {
        panic!("built-in catalog is invalid: {error}");
    })
}

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

#[cfg(test)]
mod tests {
    use super::*;
    use intake_model::CanonicalPath;

    #[test]
    fn builtin_catalog_loads() {
        let registry = builtin_catalog();
        assert_eq!(registry.sections().len(), 5);
        assert_eq!(registry.field_count(), 27);
    }

    #[test]
    fn scenario_fields_are_registered() {
        let registry = builtin_catalog();
        for path in [
            "personalInfo.fullName",
            "personalInfo.email",
            "applicationInfo.appliedPosition",
            "complianceInfo.gdprConsent",
        ] {
            let path = CanonicalPath::parse(path).unwrap();
            assert!(registry.contains(&path), "missing {path}");
        }
    }

    #[test]
    fn required_flags_match_catalog() {
        let registry = builtin_catalog();
        let required: Vec<String> = registry
            .fields()
            .filter(|(_, spec)| spec.required)
            .map(|(path, _)| path.to_string())
            .collect();
        assert_eq!(
            required,
            vec![
                "personalInfo.fullName",
                "personalInfo.email",
                "applicationInfo.appliedPosition",
            ]
        );
    }
}
