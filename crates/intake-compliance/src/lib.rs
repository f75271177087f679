//! Consent gating and retention enrichment.
//!
//! The last pipeline stage before a record is considered ready. Pure aside
//! from the `now` timestamp the caller passes in.

pub mod enricher;
pub mod error;

pub use enricher::enrich;
pub use error::ComplianceError;
