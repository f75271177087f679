//! Hiring-pipeline collaborator boundary.
//!
//! The sink is the commit point where persistence happens. The engine hands
//! it every processed record together with the duplicate matches considered
//! and the action resolved from configuration; the sink owns the atomic
//! check-then-write so two concurrent cycles cannot both insert the same
//! person.

use async_trait::async_trait;
use intake_dedupe::{DuplicateMatch, ExistingRecordSummary};
use intake_model::{CanonicalRecord, DuplicateAction};
use serde::Serialize;

use crate::error::SinkError;

/// A record that finished the pipeline, ready to commit.
#[derive(Debug, Clone)]
pub struct ProcessedRecord {
    pub system_id: String,
    pub record: CanonicalRecord,
    /// Duplicate matches the orchestrator considered, population order.
    pub matches: Vec<DuplicateMatch>,
    /// Action resolved from duplicate-detection configuration.
    pub action: DuplicateAction,
}

/// What the sink actually did at the commit point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitOutcome {
    Inserted,
    Updated,
    /// The sink's own check-then-write found a duplicate the cycle's
    /// population snapshot missed, and the skip policy dropped the record.
    Skipped,
}

/// The downstream hiring pipeline.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Snapshot of the existing candidate population's identifying fields,
    /// read once per sync cycle. Concurrent cycles may call this
    /// concurrently.
    async fn existing_candidates(&self) -> Result<Vec<ExistingRecordSummary>, SinkError>;

    /// Commit one processed record. Must apply an atomic check-then-write
    /// per matched identity.
    async fn commit(&self, processed: ProcessedRecord) -> Result<CommitOutcome, SinkError>;
}
