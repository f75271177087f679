//! Command implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use intake_map::MappingTable;
use intake_model::CanonicalRecord;
use intake_schema::{SchemaRegistry, builtin_catalog, catalog_from_toml};
use intake_sync::{SyncOrchestrator, SyncReport, SystemConfig};
use intake_validate::{ValidationResult, Validator};
use tracing::{info, warn};

use crate::cli::{RunArgs, SchemaArgs, ValidateArgs};
use crate::config::load_run_config;
use crate::summary::print_schema;
use crate::transport::{FileTransport, MemorySink};

/// Outcome of one `run` invocation across all configured systems.
pub struct RunOutcome {
    pub reports: Vec<SyncReport>,
    /// Systems that never reached the connected state, with the reason.
    pub connect_failures: Vec<(String, String)>,
}

impl RunOutcome {
    pub fn has_errors(&self) -> bool {
        !self.connect_failures.is_empty()
            || self.reports.iter().any(|report| report.transport_error.is_some())
    }
}

pub fn run_schema(args: &SchemaArgs) -> anyhow::Result<()> {
    let registry = load_registry(args.catalog.as_deref())?;
    print_schema(&registry);
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<ValidationResult> {
    let registry = load_registry(args.catalog.as_deref())?;
    let text = std::fs::read_to_string(&args.record)
        .with_context(|| format!("failed to read record file {}", args.record.display()))?;
    let record: CanonicalRecord = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse record file {}", args.record.display()))?;
    Ok(Validator::new(&registry).validate(&record))
}

pub fn run_sync(args: &RunArgs) -> anyhow::Result<RunOutcome> {
    let config = load_run_config(&args.config)?;
    anyhow::ensure!(!config.systems.is_empty(), "no systems configured");
    let config_dir = args
        .config
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    let registry = load_registry(
        config
            .catalog
            .as_ref()
            .map(|path| config_dir.join(path))
            .as_deref(),
    )?;

    let mut batches = BTreeMap::new();
    for system in &config.systems {
        batches.insert(system.id.clone(), config_dir.join(&system.records));
    }

    let orchestrator = Arc::new(SyncOrchestrator::new(
        Arc::new(registry),
        Arc::new(FileTransport::new(batches)),
        Arc::new(MemorySink::new()),
    ));

    for system in &config.systems {
        let mapping = MappingTable::from_pairs(&system.id, &system.mapping)
            .with_context(|| format!("invalid mapping for system {}", system.id))?;
        let display_name = system.name.clone().unwrap_or_else(|| system.id.clone());
        orchestrator
            .register(
                &system.id,
                SystemConfig::new(display_name, mapping).with_schedule(system.schedule),
                config.settings.clone(),
            )
            .with_context(|| format!("failed to register system {}", system.id))?;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let outcome = runtime.block_on(drive_cycles(&orchestrator, &config.systems));
    Ok(outcome)
}

/// Connect every system, run one cycle per connected system concurrently,
/// then tear the connections down.
async fn drive_cycles(
    orchestrator: &Arc<SyncOrchestrator>,
    systems: &[crate::config::SystemEntry],
) -> RunOutcome {
    let mut connect_failures = Vec::new();
    let mut connected = Vec::new();
    for system in systems {
        match orchestrator.connect(&system.id).await {
            Ok(()) => connected.push(system.id.clone()),
            Err(error) => {
                warn!(system = %system.id, %error, "skipping system");
                connect_failures.push((system.id.clone(), error.to_string()));
            }
        }
    }

    let mut handles = Vec::new();
    for system_id in &connected {
        let orchestrator = Arc::clone(orchestrator);
        let id = system_id.clone();
        handles.push(tokio::spawn(
            async move { orchestrator.trigger_sync(&id).await },
        ));
    }

    let mut reports = Vec::new();
    for (system_id, handle) in connected.iter().zip(handles) {
        match handle.await {
            Ok(Ok(report)) => reports.push(report),
            Ok(Err(error)) => connect_failures.push((system_id.clone(), error.to_string())),
            Err(error) => connect_failures.push((system_id.clone(), error.to_string())),
        }
    }

    for system_id in &connected {
        if let Err(error) = orchestrator.disconnect(system_id) {
            warn!(system = %system_id, %error, "disconnect failed");
        }
    }

    info!(
        systems = systems.len(),
        synced = reports.len(),
        "run finished"
    );
    RunOutcome {
        reports,
        connect_failures,
    }
}

fn load_registry(catalog: Option<&Path>) -> anyhow::Result<SchemaRegistry> {
    match catalog {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog file {}", path.display()))?;
            catalog_from_toml(&text)
                .with_context(|| format!("invalid catalog file {}", path.display()))
        }
        None => Ok(builtin_catalog()),
    }
}
