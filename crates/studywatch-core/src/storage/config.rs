//! TOML-based application configuration.
//!
//! Stores the small set of tuning constants the widget runs on:
//! - Break pacing: divisors, long-session threshold, eligibility cutoff
//! - Display cadence and window transparency levels
//! - Adjustment step for fast-forward/rewind
//!
//! Configuration is stored at `~/.config/studywatch/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::session::BreakPolicy;

/// Break pacing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_study_cutoff_secs")]
    pub study_cutoff_secs: i64,
    #[serde(default = "default_long_break_threshold_secs")]
    pub long_break_threshold_secs: i64,
    #[serde(default = "default_long_break_divisor")]
    pub long_break_divisor: f64,
    #[serde(default = "default_short_break_divisor")]
    pub short_break_divisor: f64,
}

/// Display configuration.
///
/// The alpha levels belong to the desktop shell; the terminal driver
/// only reads the tick interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_active_alpha")]
    pub active_alpha: f64,
    #[serde(default = "default_idle_alpha")]
    pub idle_alpha: f64,
}

/// Input adjustment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsConfig {
    #[serde(default = "default_adjust_step_secs")]
    pub adjust_step_secs: i64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studywatch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
}

// Default functions
fn default_study_cutoff_secs() -> i64 {
    300
}
fn default_long_break_threshold_secs() -> i64 {
    3000
}
fn default_long_break_divisor() -> f64 {
    3.5
}
fn default_short_break_divisor() -> f64 {
    5.0
}
fn default_tick_interval_ms() -> u64 {
    100
}
fn default_active_alpha() -> f64 {
    0.9
}
fn default_idle_alpha() -> f64 {
    0.6
}
fn default_adjust_step_secs() -> i64 {
    10
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            study_cutoff_secs: default_study_cutoff_secs(),
            long_break_threshold_secs: default_long_break_threshold_secs(),
            long_break_divisor: default_long_break_divisor(),
            short_break_divisor: default_short_break_divisor(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            active_alpha: default_active_alpha(),
            idle_alpha: default_idle_alpha(),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            adjust_step_secs: default_adjust_step_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: PolicyConfig::default(),
            display: DisplayConfig::default(),
            controls: ControlsConfig::default(),
        }
    }
}

fn value_at<'a>(root: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_value_at(root: &mut toml::Value, key: &str, raw: &str) -> Result<(), ConfigError> {
    let unknown = || ConfigError::UnknownKey(key.to_string());
    let mut parts = key.split('.').peekable();
    let mut current = root;
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            let table = current.as_table_mut().ok_or_else(unknown)?;
            let slot = table.get_mut(part).ok_or_else(unknown)?;
            *slot = parse_as(slot, raw, key)?;
            return Ok(());
        }
        current = current.get_mut(part).ok_or_else(unknown)?;
    }
    Err(unknown())
}

/// Parse `raw` with the type of the value it replaces, so `set` cannot
/// silently change a field's type.
fn parse_as(existing: &toml::Value, raw: &str, key: &str) -> Result<toml::Value, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };
    match existing {
        toml::Value::Boolean(_) => raw
            .parse::<bool>()
            .map(toml::Value::Boolean)
            .map_err(|e| invalid(e.to_string())),
        toml::Value::Integer(_) => raw
            .parse::<i64>()
            .map(toml::Value::Integer)
            .map_err(|e| invalid(e.to_string())),
        toml::Value::Float(_) => raw
            .parse::<f64>()
            .map(toml::Value::Float)
            .map_err(|e| invalid(e.to_string())),
        _ => Ok(toml::Value::String(raw.to_string())),
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning defaults on any error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let root = toml::Value::try_from(self).ok()?;
        match value_at(&root, key)? {
            toml::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed with the field's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut root = toml::Value::try_from(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        set_value_at(&mut root, key, value)?;
        *self = root.try_into().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()
    }

    /// Break policy assembled from the `[policy]` section.
    pub fn break_policy(&self) -> BreakPolicy {
        BreakPolicy {
            study_cutoff_secs: self.policy.study_cutoff_secs,
            long_threshold_secs: self.policy.long_break_threshold_secs,
            long_divisor: self.policy.long_break_divisor,
            short_divisor: self.policy.short_break_divisor,
        }
    }
}
