use thiserror::Error;

/// Errors from canonical path parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty canonical path")]
    Empty,
    #[error("canonical path {path:?} must be 'section.field'")]
    NotSectionField { path: String },
    #[error("canonical path {path:?} has an empty segment")]
    EmptySegment { path: String },
}

/// Errors from configuration validation at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("dataRetentionDays must be one of {allowed:?}, got {days}")]
    InvalidRetentionDays { days: u32, allowed: &'static [u32] },
    #[error("processingPurpose must not be empty")]
    EmptyProcessingPurpose,
    #[error("duplicate detection is enabled but matchCriteria is empty")]
    EmptyMatchCriteria,
    #[error("matchCriteria lists {field} more than once")]
    DuplicateMatchCriterion { field: String },
    #[error("syncIntervalMinutes must be one of {allowed:?}, got {minutes}")]
    InvalidSyncInterval { minutes: u32, allowed: &'static [u32] },
    #[error("recurring sync is enabled but no interval is configured")]
    MissingSyncInterval,
    #[error("invalid canonical path in requiredFields: {source}")]
    InvalidRequiredField {
        #[source]
        source: PathError,
    },
}
