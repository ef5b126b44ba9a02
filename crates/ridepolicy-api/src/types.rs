//! Shared types for the ridepolicy API

use chrono::NaiveDate;
use ridepolicy_util::{format_hour, format_trip_date};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a booking guard or of the whole eligibility chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingDecision {
    Allowed,
    Denied(DenialReason),
}

impl BookingDecision {
    pub fn denied(reason: DenialReason) -> Self {
        Self::Denied(reason)
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Structured reason, if denied
    pub fn denial(&self) -> Option<&DenialReason> {
        match self {
            Self::Allowed => None,
            Self::Denied(reason) => Some(reason),
        }
    }

    /// Human-readable reason, if denied
    pub fn reason(&self) -> Option<String> {
        self.denial().map(ToString::to_string)
    }

    /// Flatten into the `{allowed, reason}` shape collaborators render
    pub fn to_view(&self) -> DecisionView {
        DecisionView {
            allowed: self.is_allowed(),
            reason: self.reason(),
        }
    }
}

/// Flat view of a decision for display or transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionView {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Structured reason codes for why a booking is not allowed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DenialReason {
    /// Today is not the day the trip's booking window is open
    OutsideBookingDay {
        required_date: NaiveDate,
        start_hour: u32,
        end_hour: u32,
    },
    /// Right day, but outside the allowed hours
    OutsideBookingHours {
        start_hour: u32,
        end_hour: u32,
        days_before: u32,
    },
    /// Trip is further ahead than bookings may be made
    BeyondAdvanceWindow { max_days: u32 },
    /// Departure is closer than the minimum notice period
    InsufficientNotice { required_hours: f64 },
    /// Departure is inside the final cutoff
    PastCutoff { cutoff_hours: f64 },
    SameDayNotAllowed,
    WeekendNotAllowed,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideBookingDay {
                required_date,
                start_hour,
                end_hour,
            } => write!(
                f,
                "Booking for this trip is only available on {} between {} and {}. \
                 This trip requires admin approval to enable scheduling.",
                format_trip_date(*required_date),
                format_hour(*start_hour),
                format_hour(*end_hour)
            ),
            Self::OutsideBookingHours {
                start_hour,
                end_hour,
                days_before,
            } => {
                let when = if *days_before == 1 {
                    "the day before travel".to_string()
                } else {
                    format!("{} days before travel", days_before)
                };
                write!(
                    f,
                    "Booking is only allowed between {} and {} on {}.",
                    format_hour(*start_hour),
                    format_hour(*end_hour),
                    when
                )
            }
            Self::BeyondAdvanceWindow { max_days } => write!(
                f,
                "Bookings can only be made up to {} days in advance.",
                max_days
            ),
            Self::InsufficientNotice { required_hours } => write!(
                f,
                "Bookings require at least {} hours notice before departure.",
                required_hours
            ),
            Self::PastCutoff { cutoff_hours } => write!(
                f,
                "Booking closes {} hours before departure.",
                cutoff_hours
            ),
            Self::SameDayNotAllowed => write!(f, "Same-day booking is not allowed."),
            Self::WeekendNotAllowed => write!(f, "Scheduling is not available on weekends."),
        }
    }
}

/// The day and hours during which a trip may be booked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

impl BookingWindow {
    pub fn new(date: NaiveDate, start_hour: u32, end_hour: u32) -> Self {
        Self {
            date,
            start_time: format_hour(start_hour),
            end_time: format_hour(end_hour),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_booking_day_message() {
        let reason = DenialReason::OutsideBookingDay {
            required_date: NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(),
            start_hour: 0,
            end_hour: 19,
        };
        assert_eq!(
            reason.to_string(),
            "Booking for this trip is only available on June 9, 2024 between 12:00 AM and 7:00 PM. \
             This trip requires admin approval to enable scheduling."
        );
    }

    #[test]
    fn outside_booking_hours_message() {
        let reason = DenialReason::OutsideBookingHours {
            start_hour: 8,
            end_hour: 19,
            days_before: 1,
        };
        assert_eq!(
            reason.to_string(),
            "Booking is only allowed between 8:00 AM and 7:00 PM on the day before travel."
        );

        let reason = DenialReason::OutsideBookingHours {
            start_hour: 8,
            end_hour: 12,
            days_before: 3,
        };
        assert!(reason.to_string().ends_with("on 3 days before travel."));
    }

    #[test]
    fn decision_view_flattens_reason() {
        assert_eq!(
            BookingDecision::Allowed.to_view(),
            DecisionView {
                allowed: true,
                reason: None
            }
        );

        let denied = BookingDecision::denied(DenialReason::WeekendNotAllowed);
        let view = denied.to_view();
        assert!(!view.allowed);
        assert_eq!(
            view.reason.as_deref(),
            Some("Scheduling is not available on weekends.")
        );
    }

    #[test]
    fn decision_serializes_with_tags() {
        let denied = BookingDecision::denied(DenialReason::BeyondAdvanceWindow { max_days: 30 });
        let json = serde_json::to_value(&denied).unwrap();
        assert_eq!(json["status"], "denied");
        assert_eq!(json["code"], "beyond_advance_window");
        assert_eq!(json["max_days"], 30);

        let back: BookingDecision = serde_json::from_value(json).unwrap();
        assert_eq!(back, denied);
    }

    #[test]
    fn allowed_view_omits_reason() {
        let json = serde_json::to_string(&BookingDecision::Allowed.to_view()).unwrap();
        assert_eq!(json, r#"{"allowed":true}"#);
    }

    #[test]
    fn booking_window_formats_hours() {
        let window = BookingWindow::new(NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(), 0, 19);
        assert_eq!(window.start_time, "12:00 AM");
        assert_eq!(window.end_time, "7:00 PM");
    }
}
