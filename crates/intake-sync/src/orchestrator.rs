//! The sync orchestrator.
//!
//! Owns per-system connection state and drives the
//! fetch → map → validate → dedupe → enrich pipeline. Each system's state is
//! independent; one system's failure never touches another's schedule.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use intake_model::{EngineSettings, SyncSchedule};
use intake_schema::SchemaRegistry;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{SyncError, TransportError};
use crate::pipeline::process_batch;
use crate::report::SyncReport;
use crate::sink::RecordSink;
use crate::state::{SyncState, SyncStatus, SystemConfig};
use crate::transport::Transport;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

struct SystemEntry {
    config: SystemConfig,
    settings: EngineSettings,
    state: SyncState,
    timer: Option<CancellationToken>,
}

/// Coordinates connection state and sync cycles across external systems.
pub struct SyncOrchestrator {
    registry: Arc<SchemaRegistry>,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn RecordSink>,
    fetch_timeout: Duration,
    systems: Mutex<BTreeMap<String, SystemEntry>>,
}

impl SyncOrchestrator {
    pub fn new(
        registry: Arc<SchemaRegistry>,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn RecordSink>,
    ) -> Self {
        Self {
            registry,
            transport,
            sink,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            systems: Mutex::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Register an external system, starting disconnected.
    ///
    /// Settings and the mapping table are validated here; a table that
    /// references an unknown canonical path never reaches a sync cycle.
    pub fn register(
        &self,
        system_id: &str,
        config: SystemConfig,
        settings: EngineSettings,
    ) -> Result<(), SyncError> {
        settings.validate()?;
        config.schedule.validate()?;
        config.mapping.validate(&self.registry)?;

        let mut systems = self.lock_systems();
        if let Some(existing) = systems.get(system_id)
            && existing.state.status != SyncStatus::Disconnected
        {
            return Err(SyncError::InvalidState {
                system_id: system_id.to_string(),
                operation: "register",
                status: existing.state.status,
            });
        }
        systems.insert(
            system_id.to_string(),
            SystemEntry {
                config,
                settings,
                state: SyncState::disconnected(),
                timer: None,
            },
        );
        Ok(())
    }

    /// Current observable state of a system.
    pub fn state(&self, system_id: &str) -> Result<SyncState, SyncError> {
        let systems = self.lock_systems();
        systems
            .get(system_id)
            .map(|entry| entry.state.clone())
            .ok_or_else(|| SyncError::UnknownSystem(system_id.to_string()))
    }

    /// Establish a connection: `disconnected → connecting → connected`, or
    /// back to `disconnected` if the transport probe fails (reported, not
    /// retried automatically).
    pub async fn connect(self: &Arc<Self>, system_id: &str) -> Result<(), SyncError> {
        let schedule = {
            let mut systems = self.lock_systems();
            let entry = get_mut(&mut systems, system_id)?;
            if entry.state.status != SyncStatus::Disconnected {
                return Err(SyncError::InvalidState {
                    system_id: system_id.to_string(),
                    operation: "connect",
                    status: entry.state.status,
                });
            }
            entry.state.status = SyncStatus::Connecting;
            entry.config.schedule
        };

        match self.transport.test_connection(system_id).await {
            Ok(()) => {
                {
                    let mut systems = self.lock_systems();
                    let entry = get_mut(&mut systems, system_id)?;
                    // A disconnect issued mid-handshake wins.
                    if entry.state.status != SyncStatus::Connecting {
                        return Ok(());
                    }
                    entry.state.status = SyncStatus::Connected;
                    entry.state.interval_minutes = schedule
                        .real_time_sync_enabled
                        .then_some(schedule.sync_interval_minutes)
                        .flatten();
                }
                info!(system = system_id, "connected");
                if schedule.real_time_sync_enabled
                    && let Some(minutes) = schedule.sync_interval_minutes
                {
                    self.start_timer(system_id, minutes);
                }
                Ok(())
            }
            Err(failure) => {
                let mut systems = self.lock_systems();
                if let Ok(entry) = get_mut(&mut systems, system_id) {
                    entry.state.status = SyncStatus::Disconnected;
                }
                warn!(system = system_id, error = %failure, "connect failed");
                Err(SyncError::Transport(failure))
            }
        }
    }

    /// Tear down a system's connection: any recurring timer is cancelled
    /// atomically and the connection configuration is discarded. An
    /// in-flight sync cycle is allowed to finish; its report is still
    /// recorded, but no further ticks fire.
    pub fn disconnect(&self, system_id: &str) -> Result<(), SyncError> {
        let timer = {
            let mut systems = self.lock_systems();
            let entry = get_mut(&mut systems, system_id)?;
            entry.state.status = SyncStatus::Disconnected;
            entry.state.interval_minutes = None;
            entry.config.schedule = SyncSchedule::default();
            entry.timer.take()
        };
        if let Some(token) = timer {
            token.cancel();
        }
        info!(system = system_id, "disconnected");
        Ok(())
    }

    /// Side-effect-free connectivity probe: exercises the same connect
    /// logic without altering stored state, even on failure.
    pub async fn test_connection(&self, system_id: &str) -> Result<(), SyncError> {
        {
            let systems = self.lock_systems();
            if !systems.contains_key(system_id) {
                return Err(SyncError::UnknownSystem(system_id.to_string()));
            }
        }
        self.transport
            .test_connection(system_id)
            .await
            .map_err(SyncError::Transport)
    }

    /// Run one sync cycle: `connected → syncing → connected`.
    ///
    /// Always yields a report, even when the fetch fails entirely; the
    /// failure reason is carried in `transport_error` and the prior
    /// connection survives for the next attempt.
    pub async fn trigger_sync(&self, system_id: &str) -> Result<SyncReport, SyncError> {
        let (table, settings) = {
            let mut systems = self.lock_systems();
            let entry = get_mut(&mut systems, system_id)?;
            if entry.state.status != SyncStatus::Connected {
                return Err(SyncError::InvalidState {
                    system_id: system_id.to_string(),
                    operation: "sync",
                    status: entry.state.status,
                });
            }
            entry.state.status = SyncStatus::Syncing;
            (entry.config.mapping.clone(), entry.settings.clone())
        };

        let now = Utc::now();
        let mut report = SyncReport::empty(system_id, now);

        let fetched =
            tokio::time::timeout(self.fetch_timeout, self.transport.fetch_records(system_id))
                .await
                .map_err(|_| TransportError::Timeout {
                    system_id: system_id.to_string(),
                    seconds: self.fetch_timeout.as_secs(),
                })
                .and_then(|result| result);

        match fetched {
            Ok(raws) => {
                report.total_fetched = raws.len();
                process_batch(
                    &self.registry,
                    &table,
                    &settings,
                    self.sink.as_ref(),
                    system_id,
                    raws,
                    now,
                    &mut report,
                )
                .await;
            }
            Err(failure) => {
                warn!(system = system_id, error = %failure, "sync cycle failed");
                report.transport_error = Some(failure.to_string());
            }
        }

        {
            let mut systems = self.lock_systems();
            if let Ok(entry) = get_mut(&mut systems, system_id) {
                // A disconnect during the cycle wins; otherwise back to
                // connected whether the cycle succeeded or not.
                if entry.state.status == SyncStatus::Syncing {
                    entry.state.status = SyncStatus::Connected;
                }
                entry.state.last_sync_at = Some(Utc::now());
            }
        }

        info!(
            system = system_id,
            fetched = report.total_fetched,
            accepted = report.accepted(),
            skipped = report.duplicates_skipped,
            invalid = report.validation_failures,
            "sync cycle finished"
        );
        Ok(report)
    }

    /// Replace a system's recurring schedule. Any previous timer is
    /// cancelled first; a new one starts only while the system is
    /// connected.
    pub fn set_recurring(
        self: &Arc<Self>,
        system_id: &str,
        schedule: SyncSchedule,
    ) -> Result<(), SyncError> {
        schedule.validate()?;

        let (old_timer, start) = {
            let mut systems = self.lock_systems();
            let entry = get_mut(&mut systems, system_id)?;
            let old = entry.timer.take();
            entry.config.schedule = schedule;
            entry.state.interval_minutes = schedule
                .real_time_sync_enabled
                .then_some(schedule.sync_interval_minutes)
                .flatten();
            let connected = matches!(
                entry.state.status,
                SyncStatus::Connected | SyncStatus::Syncing
            );
            (old, connected.then_some(entry.state.interval_minutes).flatten())
        };

        if let Some(token) = old_timer {
            token.cancel();
        }
        if let Some(minutes) = start {
            self.start_timer(system_id, minutes);
        }
        Ok(())
    }

    fn start_timer(self: &Arc<Self>, system_id: &str, minutes: u32) {
        let token = CancellationToken::new();
        let tick_token = token.clone();
        let weak = Arc::downgrade(self);
        let id = system_id.to_string();
        let period = Duration::from_secs(u64::from(minutes) * 60);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; swallow it so the first
            // real cycle fires one full period after scheduling.
            ticker.tick().await;
            loop {
                tokio::select! {
                    () = tick_token.cancelled() => break,
                    _ = ticker.tick() => {
                        let Some(orchestrator) = weak.upgrade() else { break };
                        match orchestrator.trigger_sync(&id).await {
                            Ok(report) => debug!(
                                system = %id,
                                accepted = report.accepted(),
                                "recurring sync completed"
                            ),
                            Err(error) => {
                                warn!(system = %id, %error, "recurring sync skipped");
                            }
                        }
                    }
                }
            }
        });

        let mut systems = self.lock_systems();
        if let Some(entry) = systems.get_mut(system_id) {
            entry.timer = Some(token);
        } else {
            token.cancel();
        }
    }

    fn lock_systems(&self) -> MutexGuard<'_, BTreeMap<String, SystemEntry>> {
        self.systems.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn get_mut<'a>(
    systems: &'a mut BTreeMap<String, SystemEntry>,
    system_id: &str,
) -> Result<&'a mut SystemEntry, SyncError> {
    systems
        .get_mut(system_id)
        .ok_or_else(|| SyncError::UnknownSystem(system_id.to_string()))
}
