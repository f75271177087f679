//! Sync orchestration for external candidate-record sources.
//!
//! Coordinates per-system connection state machines and drives fetched raw
//! records through the mapping, validation, duplicate-detection and
//! compliance stages, emitting one [`SyncReport`] per cycle.

pub mod error;
pub mod orchestrator;
mod pipeline;
pub mod report;
pub mod sink;
pub mod state;
pub mod transport;

pub use error::{SinkError, SyncError, TransportError};
pub use orchestrator::SyncOrchestrator;
pub use report::SyncReport;
pub use sink::{CommitOutcome, ProcessedRecord, RecordSink};
pub use state::{SyncState, SyncStatus, SystemConfig};
pub use transport::Transport;
