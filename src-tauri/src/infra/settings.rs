//! Usage: Persisted application settings (schema + read/write helpers).

use crate::app_paths;
use crate::domain::clock::ClockMode;
use crate::domain::power::MAX_POWER;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 2;
const SCHEMA_VERSION_ADD_CLOCK_MODE: u32 = 2;
pub const DEFAULT_PUSH_INTERVAL_MS: u64 = 37;
pub const DEFAULT_POWER_SAMPLE_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_INITIAL_POWER: i32 = 100;
const DEFAULT_LOG_LEVEL: &str = "info";
const MIN_PUSH_INTERVAL_MS: u64 = 10;
const MAX_PUSH_INTERVAL_MS: u64 = 60 * 1000;
const MIN_POWER_SAMPLE_INTERVAL_MS: u64 = 100;
const MAX_POWER_SAMPLE_INTERVAL_MS: u64 = 60 * 60 * 1000;
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub schema_version: u32,
    // Interval of the per-window `system_state_update` pump.
    pub push_interval_ms: u64,
    pub power_sample_interval_ms: u64,
    pub initial_power: i32,
    pub clock_mode: ClockMode,
    // Default tracing filter when RUST_LOG is unset.
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            push_interval_ms: DEFAULT_PUSH_INTERVAL_MS,
            power_sample_interval_ms: DEFAULT_POWER_SAMPLE_INTERVAL_MS,
            initial_power: DEFAULT_INITIAL_POWER,
            clock_mode: ClockMode::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn sanitize_intervals(settings: &mut AppSettings) -> bool {
    let mut changed = false;

    let push = settings
        .push_interval_ms
        .clamp(MIN_PUSH_INTERVAL_MS, MAX_PUSH_INTERVAL_MS);
    if push != settings.push_interval_ms {
        settings.push_interval_ms = push;
        changed = true;
    }

    let sample = settings
        .power_sample_interval_ms
        .clamp(MIN_POWER_SAMPLE_INTERVAL_MS, MAX_POWER_SAMPLE_INTERVAL_MS);
    if sample != settings.power_sample_interval_ms {
        settings.power_sample_interval_ms = sample;
        changed = true;
    }

    changed
}

fn sanitize_initial_power(settings: &mut AppSettings) -> bool {
    let power = settings.initial_power.clamp(0, MAX_POWER);
    if power == settings.initial_power {
        return false;
    }
    settings.initial_power = power;
    true
}

fn sanitize_log_level(settings: &mut AppSettings) -> bool {
    let normalized = settings.log_level.trim().to_ascii_lowercase();
    let normalized = if LOG_LEVELS.contains(&normalized.as_str()) {
        normalized
    } else {
        DEFAULT_LOG_LEVEL.to_string()
    };
    if normalized == settings.log_level {
        return false;
    }
    settings.log_level = normalized;
    true
}

fn migrate_add_clock_mode(settings: &mut AppSettings, schema_version_present: bool) -> bool {
    // v2: Add clock_mode. Older files were written by builds that only showed uptime.
    if schema_version_present && settings.schema_version >= SCHEMA_VERSION_ADD_CLOCK_MODE {
        return false;
    }

    // A missing schema_version still forces a write so we don't keep "migrating" on every startup.
    if schema_version_present {
        settings.clock_mode = ClockMode::Uptime;
    }
    settings.schema_version = SCHEMA_VERSION_ADD_CLOCK_MODE;
    true
}

fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join("settings.json"))
}

fn parse_settings_json(content: &str) -> Result<(AppSettings, bool), String> {
    let raw: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    let schema_version_present = raw.get("schema_version").is_some();
    let settings: AppSettings =
        serde_json::from_value(raw).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    Ok((settings, schema_version_present))
}

fn read_from(path: &Path) -> Result<AppSettings, String> {
    if !path.exists() {
        let settings = AppSettings::default();
        // Best-effort: create default settings.json on first read to make the config discoverable/editable.
        let _ = write_to(path, &settings);
        return Ok(settings);
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read settings: {e}"))?;
    let (mut settings, schema_version_present) = parse_settings_json(&content)?;

    let mut repaired = false;
    repaired |= migrate_add_clock_mode(&mut settings, schema_version_present);
    repaired |= sanitize_intervals(&mut settings);
    repaired |= sanitize_initial_power(&mut settings);
    repaired |= sanitize_log_level(&mut settings);
    if repaired {
        // Best-effort: persist repaired values while keeping read semantics.
        let _ = write_to(path, &settings);
    }

    Ok(settings)
}

fn validate(settings: &AppSettings) -> Result<(), String> {
    if !(MIN_PUSH_INTERVAL_MS..=MAX_PUSH_INTERVAL_MS).contains(&settings.push_interval_ms) {
        return Err(format!(
            "SEC_INVALID_INPUT: push_interval_ms must be between {MIN_PUSH_INTERVAL_MS} and {MAX_PUSH_INTERVAL_MS}"
        ));
    }
    if !(MIN_POWER_SAMPLE_INTERVAL_MS..=MAX_POWER_SAMPLE_INTERVAL_MS)
        .contains(&settings.power_sample_interval_ms)
    {
        return Err(format!(
            "SEC_INVALID_INPUT: power_sample_interval_ms must be between {MIN_POWER_SAMPLE_INTERVAL_MS} and {MAX_POWER_SAMPLE_INTERVAL_MS}"
        ));
    }
    if !(0..=MAX_POWER).contains(&settings.initial_power) {
        return Err(format!(
            "SEC_INVALID_INPUT: initial_power must be between 0 and {MAX_POWER}"
        ));
    }
    if !LOG_LEVELS.contains(&settings.log_level.as_str()) {
        return Err(format!(
            "SEC_INVALID_INPUT: log_level must be one of {}",
            LOG_LEVELS.join(", ")
        ));
    }
    Ok(())
}

fn write_to(path: &Path, settings: &AppSettings) -> Result<AppSettings, String> {
    validate(settings)?;

    let mut settings = settings.clone();
    settings.schema_version = SCHEMA_VERSION;

    let tmp_path = path.with_file_name("settings.json.tmp");
    let backup_path = path.with_file_name("settings.json.bak");

    let content = serde_json::to_vec_pretty(&settings)
        .map_err(|e| format!("failed to serialize settings: {e}"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create settings dir: {e}"))?;
    }

    std::fs::write(&tmp_path, content)
        .map_err(|e| format!("failed to write temp settings file: {e}"))?;

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    if path.exists() {
        std::fs::rename(path, &backup_path)
            .map_err(|e| format!("failed to create settings backup: {e}"))?;
    }

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::rename(&backup_path, path);
        return Err(format!("failed to finalize settings: {e}"));
    }

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    Ok(settings)
}

pub fn read(app: &tauri::AppHandle) -> Result<AppSettings, String> {
    read_from(&settings_path(app)?)
}

pub fn write(app: &tauri::AppHandle, settings: &AppSettings) -> Result<AppSettings, String> {
    write_to(&settings_path(app)?, settings)
}
