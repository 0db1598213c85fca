//! Break-length policy.
//!
//! A break is earned by studying: the allowance is the accumulated study
//! time divided by a pacing ratio, with a steeper ratio once a session
//! passes the long-session threshold.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Maps accumulated study time to a break allowance.
///
/// The allowance is computed once, at break start, from the just-frozen
/// study duration; it is never recomputed mid-break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakPolicy {
    /// Minimum study time before a break may start.
    pub study_cutoff_secs: i64,
    /// Study time at which the long-session ratio applies.
    pub long_threshold_secs: i64,
    /// Divisor for sessions at or past the threshold.
    pub long_divisor: f64,
    /// Divisor for shorter sessions.
    pub short_divisor: f64,
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            study_cutoff_secs: 300,
            long_threshold_secs: 3000,
            long_divisor: 3.5,
            short_divisor: 5.0,
        }
    }
}

impl BreakPolicy {
    /// Whether `studied` has reached the break eligibility cutoff.
    pub fn eligible(&self, studied: Duration) -> bool {
        studied >= self.cutoff()
    }

    pub fn cutoff(&self) -> Duration {
        Duration::seconds(self.study_cutoff_secs)
    }

    /// Break allowance for the given accumulated study time.
    pub fn break_length(&self, studied: Duration) -> Duration {
        let divisor = if studied >= Duration::seconds(self.long_threshold_secs) {
            self.long_divisor
        } else {
            self.short_divisor
        };
        Duration::milliseconds((studied.num_milliseconds() as f64 / divisor) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_sessions_divide_by_five() {
        let policy = BreakPolicy::default();
        let allowance = policy.break_length(Duration::seconds(600));
        assert_eq!(allowance, Duration::seconds(120));
    }

    #[test]
    fn long_sessions_divide_by_three_and_a_half() {
        let policy = BreakPolicy::default();
        let allowance = policy.break_length(Duration::seconds(3500));
        assert_eq!(allowance, Duration::seconds(1000));
    }

    #[test]
    fn threshold_is_inclusive() {
        let policy = BreakPolicy::default();
        // 3000s is already a long session: 3000 / 3.5, not 3000 / 5.
        let at = policy.break_length(Duration::seconds(3000));
        assert_eq!(at.num_milliseconds(), 857_142);
        let below = policy.break_length(Duration::seconds(2999));
        assert_eq!(below.num_milliseconds(), 599_800);
    }

    #[test]
    fn cutoff_is_inclusive() {
        let policy = BreakPolicy::default();
        assert!(!policy.eligible(Duration::seconds(299)));
        assert!(policy.eligible(Duration::seconds(300)));
    }
}
