//! Duplicate detection.
//!
//! The detector only reports: it compares an incoming record's identifying
//! fields against summaries of the existing candidate population and scores
//! each overlap. Applying the configured action (skip/update/merge) is the
//! caller's policy decision.

use std::collections::BTreeSet;

use intake_model::{CanonicalRecord, DuplicateDetectionConfig, MatchField};
use serde::Serialize;

/// Identifying fields of one already-known candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExistingRecordSummary {
    pub id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub full_name: Option<String>,
}

impl ExistingRecordSummary {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    fn value_for(&self, field: MatchField) -> Option<&str> {
        match field {
            MatchField::Email => self.email.as_deref(),
            MatchField::Phone => self.phone.as_deref(),
            MatchField::FullName => self.full_name.as_deref(),
        }
    }
}

/// One scored overlap between the incoming record and an existing candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateMatch {
    pub existing_record_id: String,
    pub matched_fields: BTreeSet<MatchField>,
    /// |matched fields| / |configured criteria|, in (0.0, 1.0].
    pub confidence: f64,
}

/// Compare one incoming record against the existing population.
///
/// Returns matches in population order; summaries with no overlap are
/// omitted entirely. Disabled configuration short-circuits to empty. The
/// population is never mutated.
pub fn detect(
    record: &CanonicalRecord,
    population: &[ExistingRecordSummary],
    config: &DuplicateDetectionConfig,
) -> Vec<DuplicateMatch> {
    if !config.enabled || config.match_criteria.is_empty() {
        return Vec::new();
    }

    let criteria_total = config.match_criteria.len();
    population
        .iter()
        .filter_map(|existing| {
            let matched: BTreeSet<MatchField> = config
                .match_criteria
                .iter()
                .copied()
                .filter(|field| values_match(record, existing, *field))
                .collect();
            if matched.is_empty() {
                return None;
            }
            #[allow(clippy::cast_precision_loss)]
            let confidence = matched.len() as f64 / criteria_total as f64;
            Some(DuplicateMatch {
                existing_record_id: existing.id.clone(),
                matched_fields: matched,
                confidence,
            })
        })
        .collect()
}

/// Exact string equality after trimming.
fn values_match(
    record: &CanonicalRecord,
    existing: &ExistingRecordSummary,
    field: MatchField,
) -> bool {
    let Some(incoming) = record.get_str(&field.canonical_path()) else {
        return false;
    };
    let Some(known) = existing.value_for(field) else {
        return false;
    };
    let incoming = incoming.trim();
    !incoming.is_empty() && incoming == known.trim()
}
