//! Confidence scoring properties.

use intake_dedupe::{ExistingRecordSummary, detect};
use intake_model::{
    CanonicalPath, CanonicalRecord, DuplicateAction, DuplicateDetectionConfig, MatchField,
};
use proptest::prelude::*;
use serde_json::json;

fn record(email: Option<&str>, phone: Option<&str>, name: Option<&str>) -> CanonicalRecord {
    let mut record = CanonicalRecord::new();
    if let Some(email) = email {
        record.set(&CanonicalPath::new("personalInfo", "email"), json!(email));
    }
    if let Some(phone) = phone {
        record.set(&CanonicalPath::new("personalInfo", "phone"), json!(phone));
    }
    if let Some(name) = name {
        record.set(&CanonicalPath::new("personalInfo", "fullName"), json!(name));
    }
    record
}

fn opt_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        "[a-c]{1,3}".prop_map(Some),
    ]
}

proptest! {
    /// Every emitted match has 0 < confidence <= 1, and confidence is 1
    /// exactly when all configured criteria matched.
    #[test]
    fn confidence_stays_in_bounds(
        in_email in opt_value(),
        in_phone in opt_value(),
        in_name in opt_value(),
        ex_email in opt_value(),
        ex_phone in opt_value(),
        ex_name in opt_value(),
    ) {
        let config = DuplicateDetectionConfig {
            enabled: true,
            match_criteria: vec![MatchField::Email, MatchField::Phone, MatchField::FullName],
            action: DuplicateAction::Skip,
        };
        let incoming = record(in_email.as_deref(), in_phone.as_deref(), in_name.as_deref());
        let mut existing = ExistingRecordSummary::new("cand-1");
        existing.email = ex_email;
        existing.phone = ex_phone;
        existing.full_name = ex_name;

        for found in detect(&incoming, &[existing], &config) {
            prop_assert!(found.confidence > 0.0);
            prop_assert!(found.confidence <= 1.0);
            let full = found.matched_fields.len() == config.match_criteria.len();
            prop_assert_eq!(found.confidence == 1.0, full);
        }
    }
}
