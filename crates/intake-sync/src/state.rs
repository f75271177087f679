//! Per-system connection state.

use std::fmt;

use chrono::{DateTime, Utc};
use intake_map::MappingTable;
use intake_model::SyncSchedule;
use serde::Serialize;

/// Connection status of one external system.
///
/// Transitions are driven only by the orchestrator:
/// `Disconnected → Connecting → Connected ⇄ Syncing`, plus
/// `Connecting → Disconnected` on connect failure and
/// `Connected → Disconnected` on explicit disconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Disconnected,
    Connecting,
    Connected,
    Syncing,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Syncing => "syncing",
        };
        f.write_str(text)
    }
}

/// Observable sync state for one external system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncState {
    pub status: SyncStatus,
    pub last_sync_at: Option<DateTime<Utc>>,
    pub interval_minutes: Option<u32>,
}

impl SyncState {
    pub(crate) fn disconnected() -> Self {
        Self {
            status: SyncStatus::Disconnected,
            last_sync_at: None,
            interval_minutes: None,
        }
    }
}

/// Registration-time configuration for one external system.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    pub display_name: String,
    pub mapping: MappingTable,
    pub schedule: SyncSchedule,
}

impl SystemConfig {
    pub fn new(display_name: impl Into<String>, mapping: MappingTable) -> Self {
        Self {
            display_name: display_name.into(),
            mapping,
            schedule: SyncSchedule::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: SyncSchedule) -> Self {
        self.schedule = schedule;
        self
    }
}
