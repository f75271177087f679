//! Duplicate detection for incoming candidate records.

pub mod detector;

pub use detector::{DuplicateMatch, ExistingRecordSummary, detect};
