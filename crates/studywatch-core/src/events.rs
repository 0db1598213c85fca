use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionState;

/// Every accepted transition produces an Event.
/// The display driver interprets events at the boundary: alert sounds,
/// break-log records, and the final study report all happen there.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Study time started or resumed accumulating.
    SessionResumed {
        studied_secs: i64,
        at: DateTime<Utc>,
    },
    /// Study time frozen at the accumulated value.
    SessionPaused {
        studied_secs: i64,
        at: DateTime<Utc>,
    },
    /// A break began with the given allowance. This is the event the
    /// break log records.
    BreakStarted {
        studied_secs: i64,
        break_secs: i64,
        at: DateTime<Utc>,
    },
    /// Break ended early by the user; study resumes immediately.
    BreakEnded {
        at: DateTime<Utc>,
    },
    /// The break allowance ran out; the session is stopped.
    BreakCompleted {
        at: DateTime<Utc>,
    },
    /// The reference point moved to now, discarding elapsed time for the
    /// current state.
    Reset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SessionState,
        studied_secs: i64,
        break_remaining_secs: i64,
        at: DateTime<Utc>,
    },
}
