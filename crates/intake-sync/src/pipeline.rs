//! The per-cycle record pipeline: map → validate → dedupe → enrich → commit.
//!
//! Per-record failures (validation, consent) are counted and never abort
//! the batch; remaining records keep flowing.

use chrono::{DateTime, Utc};
use intake_compliance::{ComplianceError, enrich};
use intake_dedupe::detect;
use intake_map::{MappingTable, map_record};
use intake_model::{DuplicateAction, EngineSettings};
use intake_schema::SchemaRegistry;
use intake_validate::Validator;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::report::SyncReport;
use crate::sink::{CommitOutcome, ProcessedRecord, RecordSink};

/// Run one fetched batch through the pipeline, updating the report counts.
pub(crate) async fn process_batch(
    registry: &SchemaRegistry,
    table: &MappingTable,
    settings: &EngineSettings,
    sink: &dyn RecordSink,
    system_id: &str,
    raws: Vec<Value>,
    now: DateTime<Utc>,
    report: &mut SyncReport,
) {
    let validator = Validator::new(registry).with_rules(settings.validation_rules.clone());

    // One population snapshot per cycle. The sink's commit-time
    // check-then-write remains the authority on concurrent inserts, so a
    // snapshot failure degrades detection but does not stop the batch.
    let population = match sink.existing_candidates().await {
        Ok(population) => population,
        Err(failure) => {
            error!(system = system_id, %failure, "existing-candidate snapshot unavailable");
            Vec::new()
        }
    };

    for raw in raws {
        let record = map_record(table, &raw);

        let result = validator.validate(&record);
        if !result.valid {
            debug!(
                system = system_id,
                errors = result.errors.len(),
                first = %result.errors[0].path,
                "record failed validation"
            );
            report.validation_failures += 1;
            continue;
        }

        let matches = detect(&record, &population, &settings.duplicate_detection);
        let action = settings.duplicate_detection.action;
        if !matches.is_empty() && action == DuplicateAction::Skip {
            debug!(
                system = system_id,
                matches = matches.len(),
                "duplicate skipped per policy"
            );
            report.duplicates_skipped += 1;
            continue;
        }

        let enriched = match enrich(record, &settings.gdpr_settings, now) {
            Ok(enriched) => enriched,
            Err(ComplianceError::ConsentMissing) => {
                warn!(system = system_id, "record rejected: consent missing");
                report.compliance_rejections += 1;
                continue;
            }
        };

        let processed = ProcessedRecord {
            system_id: system_id.to_string(),
            record: enriched,
            matches,
            action,
        };
        match sink.commit(processed).await {
            Ok(CommitOutcome::Inserted) => report.new_records += 1,
            Ok(CommitOutcome::Updated) => report.updated_records += 1,
            Ok(CommitOutcome::Skipped) => report.duplicates_skipped += 1,
            Err(failure) => {
                error!(system = system_id, %failure, "commit failed");
            }
        }
    }
}
