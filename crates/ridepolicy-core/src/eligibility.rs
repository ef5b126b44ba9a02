//! Booking eligibility chain

use chrono::{DateTime, Local, NaiveDate};
use ridepolicy_api::{BookingDecision, DenialReason};
use ridepolicy_config::SchedulingPolicy;
use ridepolicy_util::{days_until, hours_until, is_weekend};
use tracing::debug;

use crate::check_time_window;

/// The trip and instant a booking decision is made for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    pub trip_date: NaiveDate,
    pub departure: DateTime<Local>,
    pub now: DateTime<Local>,
}

impl BookingRequest {
    pub fn new(trip_date: NaiveDate, departure: DateTime<Local>, now: DateTime<Local>) -> Self {
        Self {
            trip_date,
            departure,
            now,
        }
    }

    fn hours_to_departure(&self) -> f64 {
        hours_until(&self.departure, &self.now)
    }
}

type Guard = fn(&SchedulingPolicy, &BookingRequest) -> BookingDecision;

/// Guards in evaluation order. The first denial wins.
const GUARDS: [(&str, Guard); 6] = [
    ("time_window", time_window_guard),
    ("advance_window", advance_window_guard),
    ("min_notice", min_notice_guard),
    ("cutoff", cutoff_guard),
    ("same_day", same_day_guard),
    ("weekend", weekend_guard),
];

/// Run the booking eligibility chain
pub fn evaluate_booking(policy: &SchedulingPolicy, request: &BookingRequest) -> BookingDecision {
    for (name, guard) in GUARDS {
        let decision = guard(policy, request);
        if !decision.is_allowed() {
            debug!(guard = name, trip_date = %request.trip_date, "Booking denied");
            return decision;
        }
    }

    BookingDecision::Allowed
}

fn time_window_guard(policy: &SchedulingPolicy, request: &BookingRequest) -> BookingDecision {
    check_time_window(policy, request.trip_date, &request.now)
}

fn advance_window_guard(policy: &SchedulingPolicy, request: &BookingRequest) -> BookingDecision {
    let days_ahead = days_until(request.trip_date, &request.now);
    if days_ahead > i64::from(policy.booking_advance_days) {
        return BookingDecision::denied(DenialReason::BeyondAdvanceWindow {
            max_days: policy.booking_advance_days,
        });
    }
    BookingDecision::Allowed
}

fn min_notice_guard(policy: &SchedulingPolicy, request: &BookingRequest) -> BookingDecision {
    if request.hours_to_departure() < policy.min_booking_notice_hours {
        return BookingDecision::denied(DenialReason::InsufficientNotice {
            required_hours: policy.min_booking_notice_hours,
        });
    }
    BookingDecision::Allowed
}

fn cutoff_guard(policy: &SchedulingPolicy, request: &BookingRequest) -> BookingDecision {
    if request.hours_to_departure() < policy.cutoff_hours {
        return BookingDecision::denied(DenialReason::PastCutoff {
            cutoff_hours: policy.cutoff_hours,
        });
    }
    BookingDecision::Allowed
}

fn same_day_guard(policy: &SchedulingPolicy, request: &BookingRequest) -> BookingDecision {
    if request.trip_date == request.now.date_naive() && !policy.allow_same_day_booking {
        return BookingDecision::denied(DenialReason::SameDayNotAllowed);
    }
    BookingDecision::Allowed
}

fn weekend_guard(policy: &SchedulingPolicy, request: &BookingRequest) -> BookingDecision {
    if is_weekend(request.trip_date) && !policy.weekend_scheduling_enabled {
        return BookingDecision::denied(DenialReason::WeekendNotAllowed);
    }
    BookingDecision::Allowed
}
