//! Time utilities for ridepolicy
//!
//! All policy decisions are made against local wall-clock time. Callers pass
//! `now` explicitly; `now()` here is only the default source for front ends.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `RIDEPOLICY_MOCK_TIME` environment variable can be set
//! to override the system time returned by [`now`]. This is useful for
//! exercising booking windows and deadlines by hand.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2024-06-09 18:59:00`)
//!
//! Example:
//! ```bash
//! RIDEPOLICY_MOCK_TIME="2024-06-09 18:59:00" ridepolicy check --trip-date 2024-06-10 --departure "2024-06-10 08:00"
//! ```

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday};
use std::sync::OnceLock;

use crate::{RidePolicyError, Result};

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "RIDEPOLICY_MOCK_TIME";

/// Format accepted for full timestamps on the command line and in mock time
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format accepted for departure times without seconds
pub const DATETIME_MINUTES_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format accepted for trip dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_DAY: i64 = 86_400_000;

/// Cached mock time offset from the real time when the process started.
/// This allows mock time to advance naturally.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

#[allow(clippy::disallowed_methods)] // This is the internal implementation that wraps Local::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            let mock_time_str = std::env::var(MOCK_TIME_ENV_VAR).ok()?;
            match parse_local_datetime(&mock_time_str) {
                Ok(mock_dt) => {
                    let offset = mock_dt.signed_duration_since(chrono::Local::now());
                    tracing::info!(
                        mock_time = %mock_time_str,
                        offset_secs = offset.num_seconds(),
                        "Mock time enabled"
                    );
                    Some(offset)
                }
                Err(e) => {
                    tracing::warn!(mock_time = %mock_time_str, error = %e, "Ignoring mock time");
                    None
                }
            }
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
#[allow(clippy::disallowed_methods)] // This is the wrapper that provides mock time support
pub fn now() -> DateTime<Local> {
    let real_now = chrono::Local::now();

    match get_mock_time_offset() {
        Some(offset) => real_now + offset,
        None => real_now,
    }
}

/// Format an hour of the day (0-23) on a 12-hour clock.
///
/// The output appears verbatim in denial reasons, so the shape is fixed:
/// `0 -> "12:00 AM"`, `12 -> "12:00 PM"`, `13 -> "1:00 PM"`.
pub fn format_hour(hour: u32) -> String {
    match hour {
        0 => "12:00 AM".to_string(),
        12 => "12:00 PM".to_string(),
        h if h < 12 => format!("{}:00 AM", h),
        h => format!("{}:00 PM", h - 12),
    }
}

/// Format a trip date for user-facing messages, e.g. `June 9, 2024`.
pub fn format_trip_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Signed number of hours from `now` until `target`.
///
/// Negative once `target` has passed.
pub fn hours_until(target: &DateTime<Local>, now: &DateTime<Local>) -> f64 {
    target.signed_duration_since(*now).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Whole days from `now` until local midnight at the start of `date`,
/// rounded up. A partial day counts as a full one.
pub fn days_until(date: NaiveDate, now: &DateTime<Local>) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    let millis = midnight
        .signed_duration_since(now.naive_local())
        .num_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY) + i64::from(millis.rem_euclid(MILLIS_PER_DAY) != 0)
}

/// Whether the date falls on a Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parse a local timestamp in `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD HH:MM` form.
pub fn parse_local_datetime(s: &str) -> Result<DateTime<Local>> {
    let invalid = || RidePolicyError::InvalidTime {
        value: s.to_string(),
        expected: "YYYY-MM-DD HH:MM[:SS] in local time",
    };

    let naive = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, DATETIME_MINUTES_FORMAT))
        .map_err(|_| invalid())?;

    // Ambiguous local times (DST fall-back) resolve to the earlier instant
    Local.from_local_datetime(&naive).earliest().ok_or_else(invalid)
}

/// Parse a trip date in `YYYY-MM-DD` form.
pub fn parse_trip_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| RidePolicyError::InvalidTime {
        value: s.to_string(),
        expected: "YYYY-MM-DD",
    })
}
