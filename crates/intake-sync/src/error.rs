use intake_map::MappingError;
use intake_model::ConfigError;
use thiserror::Error;

use crate::state::SyncStatus;

/// Transport-level failures. Recoverable: the orchestrator keeps the prior
/// connection state and retries on the next cycle or manual action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("failed to connect to {system_id}: {message}")]
    Connect { system_id: String, message: String },

    #[error("fetch from {system_id} failed: {message}")]
    Fetch { system_id: String, message: String },

    #[error("fetch from {system_id} timed out after {seconds}s")]
    Timeout { system_id: String, seconds: u64 },
}

/// Failure reported by the hiring-pipeline collaborator at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("commit failed: {message}")]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Orchestrator-level errors, scoped to one system and one operation.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("unknown external system: {0}")]
    UnknownSystem(String),

    #[error("system {system_id} cannot {operation} while {status}")]
    InvalidState {
        system_id: String,
        operation: &'static str,
        status: SyncStatus,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}
