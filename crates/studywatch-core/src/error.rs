//! Core error types for studywatch-core.
//!
//! Transition operations return plain `Result` values; turning a rejection
//! into a bell, a colored notice, or a log line is the display driver's job.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studywatch-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A state-incompatible transition attempt. Recoverable: the session
    /// is left exactly as it was.
    #[error("invalid operation: {0}")]
    InvalidOperation(#[from] InvalidOperation),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Break log errors
    #[error("break log error: {0}")]
    BreakLog(#[from] BreakLogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal-consistency failure. The triggering operation is aborted
    /// and the session left untouched; callers must report this loudly,
    /// never substitute a default.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

/// A transition attempt the current state does not allow.
///
/// Rejections carry enough context for the driver to play an alert and
/// write a diagnostic entry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOperation {
    /// Pausing is only meaningful for study time; a running break cannot
    /// be suspended.
    #[error("cannot pause while a break is running")]
    PauseDuringBreak,

    /// Not enough study time accumulated to earn a break.
    #[error("{studied_secs}s studied; {required_secs}s required before a break")]
    BreakTooEarly {
        studied_secs: i64,
        required_secs: i64,
    },

    /// The session already ended; there is no break to toggle.
    #[error("session is over; no break to toggle")]
    BreakWhileStopped,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Break log errors.
#[derive(Error, Debug)]
pub enum BreakLogError {
    /// Reading or writing the record file failed
    #[error("break log IO at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record file exists but does not parse
    #[error("malformed break record: {0}")]
    Malformed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
