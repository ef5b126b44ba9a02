//! Policy validation

use crate::policy::SchedulingPolicy;
use std::collections::HashSet;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be an hour between 0 and 23, got {value}")]
    HourOutOfRange { field: &'static str, value: u32 },

    #[error("Booking window starts at hour {start} but ends at hour {end}")]
    InvertedWindow { start: u32, end: u32 },

    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("bookingWindowDaysBefore must be at least 1")]
    ZeroDaysBefore,

    #[error("Duplicate reminder offset: {0} hours")]
    DuplicateReminder(f64),
}

/// Validate a policy, returning every problem found
pub fn validate_policy(policy: &SchedulingPolicy) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_window(policy));

    check_non_negative(&mut errors, "minBookingNoticeHours", policy.min_booking_notice_hours);
    check_non_negative(&mut errors, "cutoffHours", policy.cutoff_hours);
    check_non_negative(
        &mut errors,
        "cancellationDeadlineHours",
        policy.cancellation_deadline_hours,
    );
    check_non_negative(
        &mut errors,
        "rescheduleDeadlineHours",
        policy.reschedule_deadline_hours,
    );

    errors.extend(validate_pricing(policy));
    errors.extend(validate_reminders(&policy.send_reminder_hours));

    errors
}

fn validate_window(policy: &SchedulingPolicy) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let start = policy.booking_window_start_hour;
    let end = policy.booking_window_end_hour;

    if start > 23 {
        errors.push(ValidationError::HourOutOfRange {
            field: "bookingWindowStartHour",
            value: start,
        });
    }
    if end > 23 {
        errors.push(ValidationError::HourOutOfRange {
            field: "bookingWindowEndHour",
            value: end,
        });
    }
    // No overnight wrap: the window lives inside a single local day
    if start > end {
        errors.push(ValidationError::InvertedWindow { start, end });
    }
    if policy.booking_window_days_before == 0 {
        errors.push(ValidationError::ZeroDaysBefore);
    }

    errors
}

fn validate_pricing(policy: &SchedulingPolicy) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let peak = policy.peak_hour_multiplier;
    if !(peak.is_finite() && peak > 0.0) {
        errors.push(ValidationError::OutOfRange {
            field: "peakHourMultiplier",
            value: peak,
            expected: "greater than 0",
        });
    }

    let off_peak = policy.off_peak_discount;
    if !(off_peak > 0.0 && off_peak <= 1.0) {
        errors.push(ValidationError::OutOfRange {
            field: "offPeakDiscount",
            value: off_peak,
            expected: "greater than 0 and at most 1",
        });
    }

    let student = policy.student_discount_percent;
    if !(0.0..=100.0).contains(&student) {
        errors.push(ValidationError::OutOfRange {
            field: "studentDiscountPercent",
            value: student,
            expected: "between 0 and 100",
        });
    }

    errors
}

fn validate_reminders(hours: &[f64]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for &offset in hours {
        if !(offset.is_finite() && offset >= 0.0) {
            errors.push(ValidationError::OutOfRange {
                field: "sendReminderHours",
                value: offset,
                expected: "a non-negative number of hours",
            });
            continue;
        }
        // Adding 0.0 folds -0.0 into 0.0
        let key = (offset + 0.0).to_bits();
        if !seen.insert(key) {
            errors.push(ValidationError::DuplicateReminder(offset));
        }
    }

    errors
}

fn check_non_negative(errors: &mut Vec<ValidationError>, field: &'static str, value: f64) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(ValidationError::OutOfRange {
            field,
            value,
            expected: "a non-negative number of hours",
        });
    }
}
