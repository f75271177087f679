//! Compliance enrichment.

use chrono::{DateTime, Days, Utc};
use intake_model::{CanonicalPath, CanonicalRecord, CompliancePolicy};
use serde_json::json;

use crate::error::ComplianceError;

fn compliance_path(field: &str) -> CanonicalPath {
    CanonicalPath::new("complianceInfo", field)
}

/// Attach consent/retention metadata to a record.
///
/// When the policy requires consent, the record must already carry an
/// explicit `complianceInfo.gdprConsent = true`; anything else is a hard
/// stop. On success a new record is returned with the compliance section
/// populated; all other fields are carried over untouched.
pub fn enrich(
    record: CanonicalRecord,
    policy: &CompliancePolicy,
    now: DateTime<Utc>,
) -> Result<CanonicalRecord, ComplianceError> {
    let consent_given = record.is_true(&compliance_path("gdprConsent"));
    if policy.consent_required && !consent_given {
        return Err(ComplianceError::ConsentMissing);
    }

    let retention_until = now
        .checked_add_days(Days::new(u64::from(policy.data_retention_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let mut enriched = record;
    enriched.set(&compliance_path("gdprConsent"), json!(consent_given));
    enriched.set(&compliance_path("dataProcessingConsent"), json!(true));
    enriched.set(
        &compliance_path("consentDate"),
        json!(now.date_naive().to_string()),
    );
    enriched.set(
        &compliance_path("dataRetentionPeriod"),
        json!(policy.data_retention_days),
    );
    enriched.set(
        &compliance_path("dataRetentionUntil"),
        json!(retention_until.date_naive().to_string()),
    );
    enriched.set(
        &compliance_path("processingPurpose"),
        json!(policy.processing_purpose),
    );
    enriched.set(
        &compliance_path("canTransferData"),
        json!(policy.allow_data_transfer),
    );
    enriched.set(&compliance_path("rightToWithdraw"), json!(true));
    Ok(enriched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    fn policy(consent_required: bool, days: u32) -> CompliancePolicy {
        CompliancePolicy {
            data_retention_days: days,
            consent_required,
            ..CompliancePolicy::default()
        }
    }

    fn record_with_consent(value: Value) -> CanonicalRecord {
        let mut record = CanonicalRecord::new();
        record.set(&compliance_path("gdprConsent"), value);
        record
    }

    #[test]
    fn consent_gate_rejects_missing_consent() {
        let now = Utc::now();
        let result = enrich(CanonicalRecord::new(), &policy(true, 365), now);
        assert_eq!(result, Err(ComplianceError::ConsentMissing));
    }

    #[test]
    fn consent_gate_rejects_non_boolean_true() {
        let now = Utc::now();
        for value in [json!(false), json!("true"), json!(1), json!(null)] {
            let result = enrich(record_with_consent(value.clone()), &policy(true, 365), now);
            assert_eq!(
                result,
                Err(ComplianceError::ConsentMissing),
                "value {value} must not pass the gate"
            );
        }
    }

    #[test]
    fn explicit_consent_passes_the_gate() {
        let now = Utc::now();
        let enriched = enrich(record_with_consent(json!(true)), &policy(true, 365), now).unwrap();
        assert!(enriched.is_true(&compliance_path("gdprConsent")));
        assert!(enriched.is_true(&compliance_path("rightToWithdraw")));
    }

    #[test]
    fn retention_math_365_days_from_2024() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let enriched = enrich(CanonicalRecord::new(), &policy(false, 365), now).unwrap();

        assert_eq!(
            enriched.get_str(&compliance_path("dataRetentionUntil")),
            Some("2024-12-31")
        );
        assert_eq!(
            enriched.get_str(&compliance_path("consentDate")),
            Some("2024-01-01")
        );
        assert_eq!(
            enriched.get(&compliance_path("dataRetentionPeriod")),
            Some(&json!(365))
        );
    }

    #[test]
    fn enrichment_adds_fields_without_clobbering_others() {
        let now = Utc::now();
        let mut record = record_with_consent(json!(true));
        record.set(
            &CanonicalPath::new("personalInfo", "fullName"),
            json!("Jane Doe"),
        );

        let enriched = enrich(record, &policy(true, 365), now).unwrap();
        assert_eq!(
            enriched.get_str(&CanonicalPath::new("personalInfo", "fullName")),
            Some("Jane Doe")
        );
        assert_eq!(enriched.section("complianceInfo").map(|s| s.len()), Some(8));
    }

    #[test]
    fn policy_values_flow_into_the_record() {
        let now = Utc::now();
        let policy = CompliancePolicy {
            data_retention_days: 730,
            consent_required: false,
            anonymize_after_days: 1095,
            processing_purpose: "talent pool".to_string(),
            allow_data_transfer: true,
        };

        let enriched = enrich(CanonicalRecord::new(), &policy, now).unwrap();
        assert_eq!(
            enriched.get_str(&compliance_path("processingPurpose")),
            Some("talent pool")
        );
        assert!(enriched.is_true(&compliance_path("canTransferData")));
        assert!(enriched.is_true(&compliance_path("dataProcessingConsent")));
    }
}
