//! Minute display formatting.
//!
//! The widget shows whole minutes only, zero-padded to two digits.

use chrono::Duration;

/// Rendered when a derived duration is negative, which means the wall
/// clock moved behind the reference point. Never shown for a valid time.
pub const INVALID_DISPLAY: &str = "--";

/// Two-digit minute rendering of a duration.
///
/// A negative duration is not a time; it renders [`INVALID_DISPLAY`]
/// instead of a misleading number.
pub fn minutes(d: Duration) -> String {
    if d < Duration::zero() {
        return INVALID_DISPLAY.to_string();
    }
    format!("{:02}", d.num_minutes())
}
