//! Shared data model: canonical records, canonical paths and the operator
//! configuration surface.

pub mod config;
pub mod error;
pub mod path;
pub mod record;

pub use config::{
    ALLOWED_RETENTION_DAYS, ALLOWED_SYNC_INTERVALS, CompliancePolicy, DuplicateAction,
    DuplicateDetectionConfig, EngineSettings, MatchField, SyncSchedule, ValidationRules,
};
pub use error::{ConfigError, PathError};
pub use path::CanonicalPath;
pub use record::CanonicalRecord;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_round_trips_through_json() {
        let mut record = CanonicalRecord::new();
        record.set(
            &CanonicalPath::parse("personalInfo.fullName").unwrap(),
            json!("Jane Doe"),
        );

        let text = serde_json::to_string(&record).expect("serialize record");
        let round: CanonicalRecord = serde_json::from_str(&text).expect("deserialize record");
        assert_eq!(round, record);
    }
}
