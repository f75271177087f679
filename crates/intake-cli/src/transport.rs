//! File-backed transport and in-memory sink for offline runs.
//!
//! The `run` command drives the real orchestrator, but its collaborators
//! read record batches from local JSON files and commit into process memory.
//! Connectivity maps to file readability, so connect/sync failures can be
//! exercised from the command line.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use intake_dedupe::ExistingRecordSummary;
use intake_model::{CanonicalPath, CanonicalRecord, DuplicateAction};
use intake_sync::{
    CommitOutcome, ProcessedRecord, RecordSink, SinkError, Transport, TransportError,
};
use serde_json::Value;
use tracing::debug;

/// Serves each system's batch from a JSON file (a top-level array of raw
/// records).
pub struct FileTransport {
    batches: BTreeMap<String, PathBuf>,
}

impl FileTransport {
    pub fn new(batches: BTreeMap<String, PathBuf>) -> Self {
        Self { batches }
    }

    fn path_for(&self, system_id: &str) -> Result<&PathBuf, TransportError> {
        self.batches
            .get(system_id)
            .ok_or_else(|| TransportError::Connect {
                system_id: system_id.to_string(),
                message: "no records file configured".to_string(),
            })
    }
}

#[async_trait]
impl Transport for FileTransport {
    async fn fetch_records(&self, system_id: &str) -> Result<Vec<Value>, TransportError> {
        let path = self.path_for(system_id)?;
        let text = std::fs::read_to_string(path).map_err(|error| TransportError::Fetch {
            system_id: system_id.to_string(),
            message: format!("{}: {error}", path.display()),
        })?;
        let parsed: Value =
            serde_json::from_str(&text).map_err(|error| TransportError::Fetch {
                system_id: system_id.to_string(),
                message: format!("{}: {error}", path.display()),
            })?;
        match parsed {
            Value::Array(records) => Ok(records),
            other => Ok(vec![other]),
        }
    }

    async fn test_connection(&self, system_id: &str) -> Result<(), TransportError> {
        let path = self.path_for(system_id)?;
        std::fs::metadata(path)
            .map(|_| ())
            .map_err(|error| TransportError::Connect {
                system_id: system_id.to_string(),
                message: format!("{}: {error}", path.display()),
            })
    }
}

struct StoredCandidate {
    id: String,
    record: CanonicalRecord,
}

/// In-memory hiring pipeline.
///
/// Commit performs the check-then-write under one lock: an insert that
/// collides on email with an already-stored candidate becomes an update, so
/// concurrent cycles cannot store the same person twice.
#[derive(Default)]
pub struct MemorySink {
    stored: Mutex<Vec<StoredCandidate>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the sink with an already-known candidate population.
    pub fn with_existing(self, records: Vec<CanonicalRecord>) -> Self {
        {
            let mut stored = self.lock_stored();
            for record in records {
                let id = format!("cand-{:04}", stored.len() + 1);
                stored.push(StoredCandidate { id, record });
            }
        }
        self
    }

    pub fn stored_count(&self) -> usize {
        self.lock_stored().len()
    }

    fn lock_stored(&self) -> MutexGuard<'_, Vec<StoredCandidate>> {
        self.stored.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn existing_candidates(&self) -> Result<Vec<ExistingRecordSummary>, SinkError> {
        let stored = self.lock_stored();
        Ok(stored.iter().map(summarize).collect())
    }

    async fn commit(&self, processed: ProcessedRecord) -> Result<CommitOutcome, SinkError> {
        let mut stored = self.lock_stored();

        let target = processed
            .matches
            .first()
            .map(|matched| matched.existing_record_id.clone())
            .or_else(|| {
                // Commit-time backstop: a record inserted by a concurrent
                // cycle after this cycle took its population snapshot.
                let email = processed.record.get_str(&email_path());
                email.and_then(|email| {
                    stored
                        .iter()
                        .find(|candidate| {
                            candidate.record.get_str(&email_path()) == Some(email)
                        })
                        .map(|candidate| candidate.id.clone())
                })
            });

        if let Some(id) = target {
            // Matches under a skip policy never reach commit, so a collision
            // here came from the backstop; the skip policy still applies.
            if processed.action == DuplicateAction::Skip {
                debug!(system = %processed.system_id, candidate = %id, "duplicate dropped at commit");
                return Ok(CommitOutcome::Skipped);
            }
            let candidate = stored
                .iter_mut()
                .find(|candidate| candidate.id == id)
                .ok_or_else(|| SinkError::new(format!("matched candidate {id} disappeared")))?;
            match processed.action {
                DuplicateAction::Merge => merge_into(&mut candidate.record, &processed.record),
                _ => overwrite_into(&mut candidate.record, &processed.record),
            }
            debug!(system = %processed.system_id, candidate = %id, "updated existing candidate");
            return Ok(CommitOutcome::Updated);
        }

        let id = format!("cand-{:04}", stored.len() + 1);
        debug!(system = %processed.system_id, candidate = %id, "stored new candidate");
        stored.push(StoredCandidate {
            id,
            record: processed.record,
        });
        Ok(CommitOutcome::Inserted)
    }
}

fn summarize(candidate: &StoredCandidate) -> ExistingRecordSummary {
    let mut summary = ExistingRecordSummary::new(&candidate.id);
    if let Some(email) = candidate.record.get_str(&email_path()) {
        summary = summary.with_email(email);
    }
    if let Some(phone) = candidate.record.get_str(&CanonicalPath::new("personalInfo", "phone")) {
        summary = summary.with_phone(phone);
    }
    if let Some(name) = candidate.record.get_str(&CanonicalPath::new("personalInfo", "fullName")) {
        summary = summary.with_full_name(name);
    }
    summary
}

fn email_path() -> CanonicalPath {
    CanonicalPath::new("personalInfo", "email")
}

/// Update semantics: incoming fields replace stored ones.
fn overwrite_into(existing: &mut CanonicalRecord, incoming: &CanonicalRecord) {
    for (path, value) in incoming.fields() {
        existing.set(&path, value.clone());
    }
}

/// Merge semantics: incoming fields fill gaps, stored values win.
fn merge_into(existing: &mut CanonicalRecord, incoming: &CanonicalRecord) {
    for (path, value) in incoming.fields() {
        let occupied = existing
            .get(&path)
            .is_some_and(|current| !current.is_null());
        if !occupied {
            existing.set(&path, value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_dedupe::DuplicateMatch;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn record(email: &str, name: &str) -> CanonicalRecord {
        let mut record = CanonicalRecord::new();
        record.set(&email_path(), json!(email));
        record.set(
            &CanonicalPath::new("personalInfo", "fullName"),
            json!(name),
        );
        record
    }

    fn processed(record: CanonicalRecord, action: DuplicateAction) -> ProcessedRecord {
        ProcessedRecord {
            system_id: "greenhouse".to_string(),
            record,
            matches: Vec::new(),
            action,
        }
    }

    #[tokio::test]
    async fn commit_inserts_then_backstops_on_email() {
        let sink = MemorySink::new();

        let first = sink
            .commit(processed(record("ada@example.com", "Ada"), DuplicateAction::Skip))
            .await
            .unwrap();
        assert_eq!(first, CommitOutcome::Inserted);

        // Same email, no matches carried: the commit-side check catches it.
        let second = sink
            .commit(processed(
                record("ada@example.com", "Ada Lovelace"),
                DuplicateAction::Update,
            ))
            .await
            .unwrap();
        assert_eq!(second, CommitOutcome::Updated);
        assert_eq!(sink.stored_count(), 1);
    }

    #[tokio::test]
    async fn skip_policy_holds_at_the_commit_backstop() {
        let sink = MemorySink::new().with_existing(vec![record("ada@example.com", "Ada")]);

        // Colliding email, no matches carried: the cycle's snapshot missed
        // this candidate, and skip must still drop the record.
        let outcome = sink
            .commit(processed(
                record("ada@example.com", "Ada Impostor"),
                DuplicateAction::Skip,
            ))
            .await
            .unwrap();
        assert_eq!(outcome, CommitOutcome::Skipped);
        assert_eq!(sink.stored_count(), 1);

        let stored = sink.existing_candidates().await.unwrap();
        assert_eq!(stored[0].full_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn merge_keeps_stored_values() {
        let sink = MemorySink::new().with_existing(vec![record("ada@example.com", "Ada")]);
        let summaries = sink.existing_candidates().await.unwrap();
        assert_eq!(summaries.len(), 1);

        let mut incoming = record("ada@example.com", "Ada L.");
        incoming.set(
            &CanonicalPath::new("contactInfo", "city"),
            json!("London"),
        );
        let matched = ProcessedRecord {
            system_id: "greenhouse".to_string(),
            record: incoming,
            matches: vec![DuplicateMatch {
                existing_record_id: summaries[0].id.clone(),
                matched_fields: BTreeSet::new(),
                confidence: 1.0,
            }],
            action: DuplicateAction::Merge,
        };
        let outcome = sink.commit(matched).await.unwrap();
        assert_eq!(outcome, CommitOutcome::Updated);

        let stored = sink.existing_candidates().await.unwrap();
        // The stored name wins; the new city fills the gap.
        assert_eq!(stored[0].full_name.as_deref(), Some("Ada"));
        assert_eq!(sink.stored_count(), 1);
    }

    #[tokio::test]
    async fn file_transport_reports_missing_file_on_connect() {
        let transport = FileTransport::new(BTreeMap::from([(
            "greenhouse".to_string(),
            PathBuf::from("/definitely/not/here.json"),
        )]));
        let result = transport.test_connection("greenhouse").await;
        assert!(matches!(result, Err(TransportError::Connect { .. })));

        let unknown = transport.test_connection("workday").await;
        assert!(matches!(unknown, Err(TransportError::Connect { .. })));
    }
}
