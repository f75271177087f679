//! Operator-facing configuration surface.
//!
//! Every recognized option is an explicit struct validated at load time.
//! Nothing in the engine reads configuration ad hoc; a config that passes
//! `validate()` cannot produce configuration errors at run time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ConfigError;
use crate::path::CanonicalPath;

/// Retention windows (days) an operator may choose from.
pub const ALLOWED_RETENTION_DAYS: &[u32] = &[90, 180, 365, 730, 1095];

/// Recurring sync intervals (minutes) an operator may choose from.
pub const ALLOWED_SYNC_INTERVALS: &[u32] = &[5, 15, 30, 60, 240];

/// Identifying field used to compare an incoming record against an existing
/// candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchField {
    Email,
    Phone,
    FullName,
}

impl MatchField {
    /// Canonical path holding this field's value.
    pub fn canonical_path(self) -> CanonicalPath {
        match self {
            Self::Email => CanonicalPath::new("personalInfo", "email"),
            Self::Phone => CanonicalPath::new("personalInfo", "phone"),
            Self::FullName => CanonicalPath::new("personalInfo", "fullName"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::FullName => "fullName",
        }
    }
}

/// What to do with an incoming record once duplicates are found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateAction {
    #[default]
    Skip,
    Update,
    Merge,
}

/// Duplicate detection settings, read by the detector at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DuplicateDetectionConfig {
    pub enabled: bool,
    /// Ordered subset of {email, phone, fullName}.
    pub match_criteria: Vec<MatchField>,
    pub action: DuplicateAction,
}

impl Default for DuplicateDetectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            match_criteria: vec![MatchField::Email],
            action: DuplicateAction::Skip,
        }
    }
}

impl DuplicateDetectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.match_criteria.is_empty() {
            return Err(ConfigError::EmptyMatchCriteria);
        }
        let mut seen = BTreeSet::new();
        for field in &self.match_criteria {
            if !seen.insert(field) {
                return Err(ConfigError::DuplicateMatchCriterion {
                    field: field.as_str().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Data-compliance policy applied when a record is enriched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompliancePolicy {
    pub data_retention_days: u32,
    pub consent_required: bool,
    pub anonymize_after_days: u32,
    pub processing_purpose: String,
    pub allow_data_transfer: bool,
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self {
            data_retention_days: 365,
            consent_required: true,
            anonymize_after_days: 730,
            processing_purpose: "recruitment".to_string(),
            allow_data_transfer: false,
        }
    }
}

impl CompliancePolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !ALLOWED_RETENTION_DAYS.contains(&self.data_retention_days) {
            return Err(ConfigError::InvalidRetentionDays {
                days: self.data_retention_days,
                allowed: ALLOWED_RETENTION_DAYS,
            });
        }
        if self.processing_purpose.trim().is_empty() {
            return Err(ConfigError::EmptyProcessingPurpose);
        }
        Ok(())
    }
}

/// Toggles selecting which validator checks are active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    pub email_format: bool,
    pub phone_format: bool,
    /// When non-empty, replaces the schema catalog's required flags.
    pub required_fields: BTreeSet<String>,
    /// Gates pattern and enum checks.
    pub custom_validation: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            email_format: true,
            phone_format: true,
            required_fields: BTreeSet::new(),
            custom_validation: true,
        }
    }
}

impl ValidationRules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in &self.required_fields {
            CanonicalPath::parse(path)
                .map_err(|source| ConfigError::InvalidRequiredField { source })?;
        }
        Ok(())
    }
}

/// Recurring synchronization schedule for one external system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncSchedule {
    pub real_time_sync_enabled: bool,
    pub sync_interval_minutes: Option<u32>,
}

impl SyncSchedule {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(minutes) = self.sync_interval_minutes
            && !ALLOWED_SYNC_INTERVALS.contains(&minutes)
        {
            return Err(ConfigError::InvalidSyncInterval {
                minutes,
                allowed: ALLOWED_SYNC_INTERVALS,
            });
        }
        if self.real_time_sync_enabled && self.sync_interval_minutes.is_none() {
            return Err(ConfigError::MissingSyncInterval);
        }
        Ok(())
    }
}

/// Everything the pipeline needs for one sync run, bundled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub duplicate_detection: DuplicateDetectionConfig,
    pub gdpr_settings: CompliancePolicy,
    pub validation_rules: ValidationRules,
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.duplicate_detection.validate()?;
        self.gdpr_settings.validate()?;
        self.validation_rules.validate()?;
        Ok(())
    }
}
