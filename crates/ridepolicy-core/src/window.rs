//! Day-before booking window

use chrono::{DateTime, Days, Local, NaiveDate, Timelike};
use ridepolicy_api::{BookingDecision, BookingWindow, DenialReason};
use ridepolicy_config::SchedulingPolicy;

/// The calendar day on which a trip's booking window is open
pub fn expected_booking_date(policy: &SchedulingPolicy, trip_date: NaiveDate) -> NaiveDate {
    let days = Days::new(u64::from(policy.booking_window_days_before));
    trip_date.checked_sub_days(days).unwrap_or(NaiveDate::MIN)
}

/// Check whether `now` falls inside the trip's booking window.
///
/// The date is checked before the hour, so a wrong day always reports the
/// required date. The window closes at the top of the end hour: with an end
/// hour of 19 the last bookable minute is 18:59.
pub fn check_time_window(
    policy: &SchedulingPolicy,
    trip_date: NaiveDate,
    now: &DateTime<Local>,
) -> BookingDecision {
    if !policy.enable_booking_time_window {
        return BookingDecision::Allowed;
    }

    let start_hour = policy.booking_window_start_hour;
    let end_hour = policy.booking_window_end_hour;
    let required_date = expected_booking_date(policy, trip_date);

    if now.date_naive() != required_date {
        return BookingDecision::denied(DenialReason::OutsideBookingDay {
            required_date,
            start_hour,
            end_hour,
        });
    }

    let minute_of_day = now.hour() * 60 + now.minute();
    if now.hour() < start_hour || minute_of_day >= end_hour * 60 {
        return BookingDecision::denied(DenialReason::OutsideBookingHours {
            start_hour,
            end_hour,
            days_before: policy.booking_window_days_before,
        });
    }

    BookingDecision::Allowed
}

/// Project the booking window for a trip, or `None` when the window is off
pub fn next_booking_window(policy: &SchedulingPolicy, trip_date: NaiveDate) -> Option<BookingWindow> {
    if !policy.enable_booking_time_window {
        return None;
    }

    Some(BookingWindow::new(
        expected_booking_date(policy, trip_date),
        policy.booking_window_start_hour,
        policy.booking_window_end_hour,
    ))
}
