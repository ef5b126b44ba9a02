//! Reminder timing
//!
//! A point-in-time test, not a trigger. Whatever polls this must do so at
//! least every [`REMINDER_TOLERANCE_HOURS`] or a reminder window can be
//! skipped entirely.

use chrono::{DateTime, Local};
use ridepolicy_config::SchedulingPolicy;
use ridepolicy_util::hours_until;

/// How close (inclusive) the time to departure must be to an offset
pub const REMINDER_TOLERANCE_HOURS: f64 = 0.5;

/// Whether any configured reminder offset is due at `now`
pub fn should_send_reminder(
    policy: &SchedulingPolicy,
    departure: &DateTime<Local>,
    now: &DateTime<Local>,
) -> bool {
    due_reminder(policy, departure, now).is_some()
}

/// The configured offset that is due at `now`, if any.
///
/// When offsets are closer together than the tolerance more than one can
/// match; the nearest wins.
pub fn due_reminder(
    policy: &SchedulingPolicy,
    departure: &DateTime<Local>,
    now: &DateTime<Local>,
) -> Option<f64> {
    let hours = hours_until(departure, now);

    policy
        .send_reminder_hours
        .iter()
        .copied()
        .filter(|offset| (offset - hours).abs() <= REMINDER_TOLERANCE_HOURS)
        .min_by(|a, b| (a - hours).abs().total_cmp(&(b - hours).abs()))
}
