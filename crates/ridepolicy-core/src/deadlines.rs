//! Cancellation and reschedule deadlines

use chrono::{DateTime, Local};
use ridepolicy_config::SchedulingPolicy;
use ridepolicy_util::hours_until;

/// Whether a booking may still be cancelled. Exactly at the deadline is allowed.
pub fn can_cancel(policy: &SchedulingPolicy, departure: &DateTime<Local>, now: &DateTime<Local>) -> bool {
    hours_until(departure, now) >= policy.cancellation_deadline_hours
}

/// Whether a booking may still be moved to another trip
pub fn can_reschedule(
    policy: &SchedulingPolicy,
    departure: &DateTime<Local>,
    now: &DateTime<Local>,
) -> bool {
    hours_until(departure, now) >= policy.reschedule_deadline_hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(d: u32, h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, d, h, m, 0).unwrap()
    }

    #[test]
    fn cancellation_deadline_is_inclusive() {
        let policy = SchedulingPolicy {
            cancellation_deadline_hours: 24.0,
            ..Default::default()
        };
        let departure = local(10, 8, 0);

        assert!(can_cancel(&policy, &departure, &local(9, 7, 0)));
        assert!(can_cancel(&policy, &departure, &local(9, 8, 0)));
        assert!(!can_cancel(&policy, &departure, &local(9, 8, 1)));
    }

    #[test]
    fn reschedule_uses_its_own_deadline() {
        let policy = SchedulingPolicy {
            cancellation_deadline_hours: 24.0,
            reschedule_deadline_hours: 2.0,
            ..Default::default()
        };
        let departure = local(10, 8, 0);
        let now = local(10, 5, 0);

        assert!(!can_cancel(&policy, &departure, &now));
        assert!(can_reschedule(&policy, &departure, &now));
        assert!(!can_reschedule(&policy, &departure, &local(10, 6, 30)));
    }

    #[test]
    fn zero_deadline_allows_until_departure() {
        let policy = SchedulingPolicy {
            cancellation_deadline_hours: 0.0,
            ..Default::default()
        };
        let departure = local(10, 8, 0);

        assert!(can_cancel(&policy, &departure, &departure));
        assert!(!can_cancel(&policy, &departure, &local(10, 8, 1)));
    }
}
