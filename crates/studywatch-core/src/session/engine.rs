//! Session engine implementation.
//!
//! The engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically, and for turning returned events and rejections into
//! user-visible alerts.
//!
//! ## State Transitions
//!
//! ```text
//! Paused <-> Running -> Breaking -> (Running | Stopped) -> Running
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionEngine::new(BreakPolicy::default(), Utc::now());
//! engine.toggle_run(Utc::now())?;
//! // In a loop:
//! let tick = engine.tick(Utc::now()); // tick.event is Some on break expiry
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::policy::BreakPolicy;
use crate::error::{CoreError, InvalidOperation};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Paused,
    Running,
    Breaking,
    /// A break ran its allowance out. Only toggle-run leaves this state,
    /// and it starts a fresh session.
    Stopped,
}

/// Result of one elapsed-or-remaining query.
#[derive(Debug, Clone)]
pub struct Tick {
    /// Duration to display: accumulated study time in Paused/Running,
    /// remaining allowance in Breaking, the last reported value after
    /// a break ran out.
    pub display: Duration,
    /// Break completion, emitted exactly once when the allowance runs out.
    pub event: Option<Event>,
}

/// Core session engine.
///
/// Operates on caller-supplied wall-clock timestamps -- no internal
/// thread and no hidden clock. Single-threaded by design: all mutation
/// happens through `&mut self` from one event-processing context.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    state: SessionState,
    /// Reference point for the current state: study origin while
    /// Running, break origin while Breaking.
    started_at: DateTime<Utc>,
    /// Accumulated study time. Canonical while Running (refreshed on
    /// every tick), frozen in the other states.
    studied: Duration,
    /// Break budget set at break start; cleared only when a break runs
    /// its allowance out.
    allowance: Duration,
    policy: BreakPolicy,
}

impl SessionEngine {
    /// Create an engine in the Paused state with no accumulated time.
    pub fn new(policy: BreakPolicy, now: DateTime<Utc>) -> Self {
        Self {
            state: SessionState::Paused,
            started_at: now,
            studied: Duration::zero(),
            allowance: Duration::zero(),
            policy,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn policy(&self) -> &BreakPolicy {
        &self.policy
    }

    /// Canonical accumulated study time for the current state.
    pub fn studied(&self, now: DateTime<Utc>) -> Duration {
        match self.state {
            SessionState::Running => now - self.started_at,
            _ => self.studied,
        }
    }

    /// Break allowance still ahead of `now`; the full budget outside of
    /// a break.
    pub fn break_remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.state {
            SessionState::Breaking => self.allowance - (now - self.started_at),
            _ => self.allowance,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            state: self.state,
            studied_secs: self.studied(now).num_seconds(),
            break_remaining_secs: self.break_remaining(now).num_seconds(),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Toggle between accumulating and frozen study time.
    ///
    /// From Stopped this starts a fresh session. During a break the
    /// toggle is rejected: a break cannot be suspended.
    pub fn toggle_run(&mut self, now: DateTime<Utc>) -> Result<Event, CoreError> {
        match self.state {
            SessionState::Paused => {
                // Place the origin so that now - started_at == studied.
                self.started_at = now - self.studied;
                self.state = SessionState::Running;
                Ok(Event::SessionResumed {
                    studied_secs: self.studied.num_seconds(),
                    at: now,
                })
            }
            SessionState::Stopped => {
                self.studied = Duration::zero();
                self.started_at = now;
                self.state = SessionState::Running;
                Ok(Event::SessionResumed {
                    studied_secs: 0,
                    at: now,
                })
            }
            SessionState::Running => {
                self.studied = now - self.started_at;
                self.state = SessionState::Paused;
                Ok(Event::SessionPaused {
                    studied_secs: self.studied.num_seconds(),
                    at: now,
                })
            }
            SessionState::Breaking => Err(InvalidOperation::PauseDuringBreak.into()),
        }
    }

    /// Start a break, or end one early.
    ///
    /// Starting requires the accumulated study time to have reached the
    /// eligibility cutoff; the allowance is computed once here and never
    /// recomputed mid-break.
    pub fn toggle_break(&mut self, now: DateTime<Utc>) -> Result<Event, CoreError> {
        match self.state {
            SessionState::Running | SessionState::Paused => {
                let studied = self.studied(now);
                if !self.policy.eligible(studied) {
                    return Err(InvalidOperation::BreakTooEarly {
                        studied_secs: studied.num_seconds(),
                        required_secs: self.policy.study_cutoff_secs,
                    }
                    .into());
                }
                let allowance = self.policy.break_length(studied);
                if allowance <= Duration::zero() {
                    return Err(CoreError::Invariant(format!(
                        "computed break allowance {}s for {}s studied",
                        allowance.num_seconds(),
                        studied.num_seconds()
                    )));
                }
                self.studied = studied;
                self.allowance = allowance;
                self.started_at = now;
                self.state = SessionState::Breaking;
                Ok(Event::BreakStarted {
                    studied_secs: studied.num_seconds(),
                    break_secs: allowance.num_seconds(),
                    at: now,
                })
            }
            SessionState::Breaking => {
                // Ending a break early resumes study from the break
                // origin; the unused allowance is kept until a break
                // runs out naturally.
                self.state = SessionState::Running;
                Ok(Event::BreakEnded { at: now })
            }
            SessionState::Stopped => Err(InvalidOperation::BreakWhileStopped.into()),
        }
    }

    /// The elapsed-or-remaining query. Call on every display refresh.
    ///
    /// While Running this refreshes the accumulated study time; while
    /// Breaking it detects expiry, reports zero and stops the session,
    /// emitting `BreakCompleted` exactly once.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Tick {
        match self.state {
            SessionState::Running => {
                self.studied = now - self.started_at;
                Tick {
                    display: self.studied,
                    event: None,
                }
            }
            SessionState::Breaking => {
                let elapsed = now - self.started_at;
                if elapsed >= self.allowance {
                    self.allowance = Duration::zero();
                    self.state = SessionState::Stopped;
                    Tick {
                        display: Duration::zero(),
                        event: Some(Event::BreakCompleted { at: now }),
                    }
                } else {
                    Tick {
                        display: self.allowance - elapsed,
                        event: None,
                    }
                }
            }
            SessionState::Paused => Tick {
                display: self.studied,
                event: None,
            },
            SessionState::Stopped => Tick {
                display: Duration::zero(),
                event: None,
            },
        }
    }

    /// Move the origin back by `step`: more perceived study time while
    /// Running/Paused, less remaining break while Breaking (hastening
    /// the break's end). No-op once stopped.
    pub fn fast_forward(&mut self, now: DateTime<Utc>, step: Duration) {
        match self.state {
            SessionState::Running | SessionState::Paused => {
                self.anchor(now);
                self.started_at = self.started_at - step;
                self.studied = now - self.started_at;
            }
            SessionState::Breaking => {
                self.started_at = self.started_at - step;
            }
            SessionState::Stopped => {}
        }
    }

    /// Move the origin forward by `step`: study time shrinks, collapsing
    /// to zero when less than a full step has accumulated. A break in
    /// progress is extended instead, with no clamp.
    pub fn rewind(&mut self, now: DateTime<Utc>, step: Duration) {
        match self.state {
            SessionState::Running | SessionState::Paused => {
                self.anchor(now);
                let elapsed = (now - self.started_at).max(Duration::zero());
                self.started_at = self.started_at + step.min(elapsed);
                self.studied = now - self.started_at;
            }
            SessionState::Breaking => {
                self.started_at = self.started_at + step;
            }
            SessionState::Stopped => {}
        }
    }

    /// Move the reference point to `now`, discarding elapsed time for
    /// the current state. Frozen study time and an unexpired break
    /// allowance are left alone.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Event {
        self.started_at = now;
        Event::Reset { at: now }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Re-place the origin of a paused session so adjustments operate on
    /// the frozen value through the same arithmetic as a running one.
    fn anchor(&mut self, now: DateTime<Utc>) {
        if self.state == SessionState::Paused {
            self.started_at = now - self.studied;
        }
    }
}
