//! Most-recent-break log.
//!
//! One CSV record: an RFC 3339 timestamp and the break length in whole
//! seconds. The file always holds the single latest break; each break
//! start overwrites the previous record.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::data_dir;
use crate::error::BreakLogError;

/// A recorded break start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakRecord {
    pub started_at: DateTime<Utc>,
    pub break_secs: i64,
}

/// Single-record break log backed by a CSV file.
#[derive(Debug, Clone)]
pub struct BreakLog {
    path: PathBuf,
}

impl BreakLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Log at the default location, `data_dir()/break_log.csv`.
    pub fn open_default() -> Result<Self, BreakLogError> {
        let dir = data_dir().map_err(|source| BreakLogError::Io {
            path: PathBuf::from("~/.config"),
            source,
        })?;
        Ok(Self::new(dir.join("break_log.csv")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `record`, replacing whatever break was logged before.
    pub fn record(&self, record: &BreakRecord) -> Result<(), BreakLogError> {
        let line = format!("{},{}\n", record.started_at.to_rfc3339(), record.break_secs);
        std::fs::write(&self.path, line).map_err(|source| BreakLogError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// The most recent break, or `None` if nothing was ever logged.
    pub fn last(&self) -> Result<Option<BreakRecord>, BreakLogError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(BreakLogError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let line = content.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (stamp, secs) = line
            .split_once(',')
            .ok_or_else(|| BreakLogError::Malformed(line.to_string()))?;
        let started_at = DateTime::parse_from_rfc3339(stamp)
            .map_err(|e| BreakLogError::Malformed(format!("{stamp}: {e}")))?
            .with_timezone(&Utc);
        let break_secs = secs
            .trim()
            .parse::<i64>()
            .map_err(|e| BreakLogError::Malformed(format!("{secs}: {e}")))?;
        Ok(Some(BreakRecord {
            started_at,
            break_secs,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn log_in(dir: &tempfile::TempDir) -> BreakLog {
        BreakLog::new(dir.path().join("break_log.csv"))
    }

    #[test]
    fn record_then_last_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        let record = BreakRecord {
            started_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 10, 0).unwrap(),
            break_secs: 120,
        };
        log.record(&record).unwrap();
        assert_eq!(log.last().unwrap(), Some(record));
    }

    #[test]
    fn a_new_record_replaces_the_old_one() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        let first = BreakRecord {
            started_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 10, 0).unwrap(),
            break_secs: 120,
        };
        let second = BreakRecord {
            started_at: Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap(),
            break_secs: 900,
        };
        log.record(&first).unwrap();
        log.record(&second).unwrap();

        assert_eq!(log.last().unwrap(), Some(second));
        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn missing_file_means_no_break_yet() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        assert_eq!(log.last().unwrap(), None);
    }

    #[test]
    fn malformed_record_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        std::fs::write(log.path(), "not a record\n").unwrap();
        assert!(matches!(log.last(), Err(BreakLogError::Malformed(_))));
    }
}
