//! Canonical record validation against the schema registry.
//!
//! Validation is a pure function of the record, the registry and the active
//! rule toggles: no side effects, deterministic, errors reported in catalog
//! order. Record fields outside the catalog are ignored so newer producers
//! stay compatible with older catalogs.

use intake_model::{CanonicalPath, CanonicalRecord, ValidationRules};
use intake_schema::{FieldFormat, FieldSpec, SchemaRegistry, ValueType};
use serde_json::Value;

use crate::format::{is_valid_email, is_valid_phone};
use crate::result::{ErrorKind, FieldError, ValidationResult};

/// Validation context.
pub struct Validator<'a> {
    registry: &'a SchemaRegistry,
    rules: ValidationRules,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            rules: ValidationRules::default(),
        }
    }

    /// Apply operator rule toggles.
    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Validate one canonical record.
    pub fn validate(&self, record: &CanonicalRecord) -> ValidationResult {
        let mut errors = Vec::new();

        for (path, spec) in self.registry.fields() {
            let value = record.get(&path);

            if self.is_required(&path, spec) && value.is_none_or(is_empty_value) {
                errors.push(FieldError {
                    path: path.to_string(),
                    kind: ErrorKind::MissingRequired,
                    message: format!("required field {path} is missing or empty"),
                });
                continue;
            }

            let Some(value) = value.filter(|v| !is_empty_value(v)) else {
                continue;
            };
            errors.extend(self.check_value(&path, spec, value));
        }

        ValidationResult::from_errors(errors)
    }

    fn is_required(&self, path: &CanonicalPath, spec: &FieldSpec) -> bool {
        if self.rules.required_fields.is_empty() {
            spec.required
        } else {
            self.rules.required_fields.contains(&path.to_string())
        }
    }

    fn check_value(
        &self,
        path: &CanonicalPath,
        spec: &FieldSpec,
        value: &Value,
    ) -> Option<FieldError> {
        match spec.value_type {
            ValueType::Email if self.rules.email_format => {
                let ok = value.as_str().is_some_and(is_valid_email);
                (!ok).then(|| invalid_format(path, "not a valid email address"))
            }
            ValueType::Phone if self.rules.phone_format => {
                let ok = value.as_str().is_some_and(is_valid_phone);
                (!ok).then(|| invalid_format(path, "not a valid phone number"))
            }
            ValueType::Enum if self.rules.custom_validation => self.check_enum(path, spec, value),
            ValueType::String if self.rules.custom_validation => {
                self.check_pattern(path, spec, value)
            }
            _ => None,
        }
    }

    fn check_enum(
        &self,
        path: &CanonicalPath,
        spec: &FieldSpec,
        value: &Value,
    ) -> Option<FieldError> {
        let Some(FieldFormat::AllowedValues(allowed)) = &spec.format else {
            return None;
        };
        let member = value
            .as_str()
            .is_some_and(|s| allowed.iter().any(|a| a == s.trim()));
        (!member).then(|| FieldError {
            path: path.to_string(),
            kind: ErrorKind::InvalidEnum,
            message: format!("value must be one of: {}", allowed.join(", ")),
        })
    }

    fn check_pattern(
        &self,
        path: &CanonicalPath,
        spec: &FieldSpec,
        value: &Value,
    ) -> Option<FieldError> {
        let Some(FieldFormat::Pattern(pattern)) = &spec.format else {
            return None;
        };
        // Patterns are compiled once at registry load to prove validity;
        // recompiling here keeps the validator stateless.
        let ok = regex::Regex::new(pattern)
            .map(|re| value.as_str().is_some_and(|s| re.is_match(s)))
            .unwrap_or(false);
        (!ok).then(|| invalid_format(path, &format!("does not match pattern {pattern}")))
    }
}

fn invalid_format(path: &CanonicalPath, detail: &str) -> FieldError {
    FieldError {
        path: path.to_string(),
        kind: ErrorKind::InvalidFormat,
        message: format!("{path}: {detail}"),
    }
}

/// Absent-equivalent values: null, blank strings, empty arrays.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
