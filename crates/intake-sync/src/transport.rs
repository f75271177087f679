//! Transport collaborator boundary.
//!
//! The engine never talks to an external system directly; a transport hands
//! it raw records or reports failure. Raw records are opaque nested
//! structures; nothing beyond path-addressability is assumed.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

/// Capability for reaching one or more external ATS/HRMS systems.
///
/// Test doubles implement this deterministically; real implementations
/// perform I/O with their own retry policy underneath.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the current batch of raw candidate records for a system.
    async fn fetch_records(&self, system_id: &str) -> Result<Vec<Value>, TransportError>;

    /// Probe connectivity without fetching. Used both for the connect
    /// handshake and for the side-effect-free "test connection" operation.
    async fn test_connection(&self, system_id: &str) -> Result<(), TransportError>;
}
