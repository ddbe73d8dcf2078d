//! Configuration primitives for the LocalPros profile data layer.
//!
//! Stored in a machine-readable TOML file located at
//! `<workspace>/config/config.toml`, where the workspace root is
//! `$LOCALPROS_HOME` or the OS data directory. Every section falls back to
//! defaults so a missing or partial file is never an error.

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the workspace root.
pub const HOME_ENV_VAR: &str = "LOCALPROS_HOME";

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Where profile records are persisted and under which slot name.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Knobs for the on-demand bio regeneration flow.
    #[serde(default)]
    pub regeneration: RegenerationSettings,
    /// Remote spreadsheet mirroring.
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Persistent slot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Name of the key-value slot holding the serialized profile collection.
    #[serde(default = "default_slot_name")]
    pub slot_name: String,
    /// Directory holding slot files. Defaults to `<workspace>/data`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            slot_name: default_slot_name(),
            data_dir: None,
        }
    }
}

fn default_slot_name() -> String {
    "localProfiles".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegenerationSettings {
    /// Artificial delay (ms) applied before a bio is regenerated.
    #[serde(default = "default_regeneration_delay_ms")]
    pub delay_ms: u64,
}

impl RegenerationSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RegenerationSettings {
    fn default() -> Self {
        Self {
            delay_ms: default_regeneration_delay_ms(),
        }
    }
}

const fn default_regeneration_delay_ms() -> u64 {
    2_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Whether newly submitted profiles are mirrored to the remote sheet.
    #[serde(default = "default_sync_enabled")]
    pub enabled: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            enabled: default_sync_enabled(),
        }
    }
}

const fn default_sync_enabled() -> bool {
    true
}

/// Logging output preferences. `RUST_LOG` takes precedence over `filter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Returns the root directory where LocalPros stores data.
///
/// Order of precedence:
/// 1. `LOCALPROS_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var(HOME_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("LocalPros"))
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(workspace_root()?.join("config"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    load_from(config_file_path()?)
}

/// Loads the configuration at `path`, returning defaults when it does not exist.
pub fn load_from<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let cfg: AppConfig =
        toml::from_str(&data).with_context(|| format!("Failed to parse config file {:?}", path))?;
    Ok(cfg)
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    save_to(config, config_file_path()?)
}

pub fn save_to<P: AsRef<Path>>(config: &AppConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;
    }
    let data = toml::to_string_pretty(config)?;
    fs::write(path, data).with_context(|| format!("Failed to write config file {:?}", path))?;
    Ok(())
}

/// Resolves the directory holding slot files for `config`.
pub fn data_dir(config: &AppConfig) -> Result<PathBuf> {
    match &config.storage.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(workspace_root()?.join("data")),
    }
}
