mod break_log;
mod config;

pub use break_log::{BreakLog, BreakRecord};
pub use config::Config;

use std::path::PathBuf;

/// Returns `~/.config/studywatch[-dev]/` based on STUDYWATCH_ENV.
///
/// Set STUDYWATCH_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYWATCH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studywatch-dev")
    } else {
        base_dir.join("studywatch")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
