//! Per-cycle sync reports.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate outcome of one sync cycle for one system.
///
/// Every cycle produces a report, including a cycle that fetched nothing
/// because the transport failed (`transport_error` carries the reason).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub system_id: String,
    pub total_fetched: usize,
    pub new_records: usize,
    pub updated_records: usize,
    pub duplicates_skipped: usize,
    pub validation_failures: usize,
    pub compliance_rejections: usize,
    pub transport_error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl SyncReport {
    pub(crate) fn empty(system_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            system_id: system_id.into(),
            total_fetched: 0,
            new_records: 0,
            updated_records: 0,
            duplicates_skipped: 0,
            validation_failures: 0,
            compliance_rejections: 0,
            transport_error: None,
            timestamp,
        }
    }

    /// Records that made it through the whole pipeline.
    pub fn accepted(&self) -> usize {
        self.new_records + self.updated_records
    }
}
