//! The intake run configuration file (TOML).
//!
//! ```toml
//! [settings.duplicateDetection]
//! enabled = true
//! matchCriteria = ["email", "fullName"]
//! action = "skip"
//!
//! [settings.gdprSettings]
//! dataRetentionDays = 365
//! consentRequired = true
//!
//! [[system]]
//! id = "greenhouse"
//! name = "Greenhouse"
//! records = "data/greenhouse.json"
//!
//! [system.mapping]
//! "name" = "personalInfo.fullName"
//! "email_addresses[0].value" = "personalInfo.email"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use intake_model::{EngineSettings, SyncSchedule};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    #[serde(default)]
    pub settings: EngineSettings,
    /// Optional catalog override (TOML), relative to the config file.
    pub catalog: Option<PathBuf>,
    #[serde(default, rename = "system")]
    pub systems: Vec<SystemEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemEntry {
    pub id: String,
    pub name: Option<String>,
    /// JSON file holding this system's raw record batch.
    pub records: PathBuf,
    /// External path expression -> canonical path.
    #[serde(default)]
    pub mapping: BTreeMap<String, String>,
    #[serde(default)]
    pub schedule: SyncSchedule,
}

/// Load and validate a run configuration.
pub fn load_run_config(path: &Path) -> anyhow::Result<RunConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: RunConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    config.settings.validate().context("invalid settings")?;
    for system in &config.systems {
        system
            .schedule
            .validate()
            .with_context(|| format!("invalid schedule for system {}", system.id))?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_model::{DuplicateAction, MatchField};

    #[test]
    fn parses_full_config() {
        let toml = r#"
            [settings.duplicateDetection]
            enabled = true
            matchCriteria = ["email", "phone"]
            action = "update"

            [settings.gdprSettings]
            dataRetentionDays = 730
            consentRequired = false

            [[system]]
            id = "greenhouse"
            name = "Greenhouse"
            records = "data/greenhouse.json"

            [system.mapping]
            "name" = "personalInfo.fullName"
            "email_addresses[0].value" = "personalInfo.email"

            [system.schedule]
            realTimeSyncEnabled = true
            syncIntervalMinutes = 15
        "#;

        let config: RunConfig = toml::from_str(toml).unwrap();
        config.settings.validate().unwrap();

        assert_eq!(
            config.settings.duplicate_detection.match_criteria,
            vec![MatchField::Email, MatchField::Phone]
        );
        assert_eq!(
            config.settings.duplicate_detection.action,
            DuplicateAction::Update
        );
        assert_eq!(config.systems.len(), 1);
        assert_eq!(config.systems[0].mapping.len(), 2);
        assert_eq!(config.systems[0].schedule.sync_interval_minutes, Some(15));
    }

    #[test]
    fn defaults_apply_when_sections_missing() {
        let config: RunConfig = toml::from_str("").unwrap();
        assert!(config.systems.is_empty());
        config.settings.validate().unwrap();
    }
}
