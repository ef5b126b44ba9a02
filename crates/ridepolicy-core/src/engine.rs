//! Policy engine service

use chrono::{DateTime, Local, NaiveDate};
use ridepolicy_api::{BookingDecision, BookingWindow};
use ridepolicy_config::SchedulingPolicy;
use ridepolicy_store::PolicyStore;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    apply_student_discount, calculate_price, can_cancel, can_reschedule, check_time_window,
    due_reminder, evaluate_booking, next_booking_window, BookingRequest,
};

/// The booking policy engine.
///
/// Each decision loads the policy exactly once and evaluates against that
/// snapshot, so a concurrent update never splits a single decision across
/// two policy versions.
#[derive(Clone)]
pub struct PolicyEngine {
    store: PolicyStore,
}

impl PolicyEngine {
    /// Create a new engine over the given policy store
    pub fn new(store: PolicyStore) -> Self {
        info!(healthy = store.is_healthy(), "Policy engine initialized");
        Self { store }
    }

    /// Current effective policy
    pub fn settings(&self) -> SchedulingPolicy {
        self.store.load()
    }

    /// Replace the stored policy
    pub fn save_settings(&self, policy: &SchedulingPolicy) -> bool {
        self.store.save(policy)
    }

    /// Update a single stored setting by name
    pub fn update_setting(&self, key: &str, value: Value) -> bool {
        self.store.update_setting(key, value)
    }

    /// Get the underlying policy store
    pub fn store(&self) -> &PolicyStore {
        &self.store
    }

    /// Full booking eligibility decision for a trip
    pub fn is_booking_allowed(
        &self,
        trip_date: NaiveDate,
        departure: DateTime<Local>,
        now: DateTime<Local>,
    ) -> BookingDecision {
        let policy = self.store.load();
        let decision = evaluate_booking(&policy, &BookingRequest::new(trip_date, departure, now));

        debug!(
            trip_date = %trip_date,
            departure = %departure,
            now = %now,
            allowed = decision.is_allowed(),
            "Booking evaluated"
        );

        decision
    }

    /// The booking window check alone
    pub fn is_within_booking_time_window(
        &self,
        trip_date: NaiveDate,
        now: DateTime<Local>,
    ) -> BookingDecision {
        let policy = self.store.load();
        check_time_window(&policy, trip_date, &now)
    }

    /// When the trip's booking window opens, or `None` if the window is off
    pub fn next_booking_window(&self, trip_date: NaiveDate) -> Option<BookingWindow> {
        let policy = self.store.load();
        next_booking_window(&policy, trip_date)
    }

    pub fn can_cancel_booking(&self, departure: DateTime<Local>, now: DateTime<Local>) -> bool {
        let policy = self.store.load();
        let allowed = can_cancel(&policy, &departure, &now);
        debug!(departure = %departure, allowed, "Cancellation evaluated");
        allowed
    }

    pub fn can_reschedule_booking(&self, departure: DateTime<Local>, now: DateTime<Local>) -> bool {
        let policy = self.store.load();
        let allowed = can_reschedule(&policy, &departure, &now);
        debug!(departure = %departure, allowed, "Reschedule evaluated");
        allowed
    }

    /// Price a fare. `booking_time` is recorded for tracing only; whether
    /// it is a peak hour is the caller's classification.
    pub fn calculate_price(
        &self,
        base_price: f64,
        booking_time: DateTime<Local>,
        is_peak_hour: bool,
    ) -> f64 {
        let policy = self.store.load();
        let price = calculate_price(&policy, base_price, is_peak_hour);
        debug!(
            base_price,
            booking_time = %booking_time,
            is_peak_hour,
            dynamic = policy.dynamic_pricing,
            price,
            "Fare priced"
        );
        price
    }

    pub fn apply_student_discount(&self, price: f64) -> f64 {
        let policy = self.store.load();
        apply_student_discount(&policy, price)
    }

    /// Whether a reminder is due for a trip at `now`
    pub fn should_send_reminder(&self, departure: DateTime<Local>, now: DateTime<Local>) -> bool {
        self.due_reminder(departure, now).is_some()
    }

    /// The reminder offset due at `now`, if any
    pub fn due_reminder(&self, departure: DateTime<Local>, now: DateTime<Local>) -> Option<f64> {
        let policy = self.store.load();
        let due = due_reminder(&policy, &departure, &now);
        if let Some(offset) = due {
            debug!(departure = %departure, offset_hours = offset, "Reminder due");
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ridepolicy_api::DenialReason;
    use ridepolicy_store::{MemoryConfigStore, SqliteConfigStore};
    use serde_json::json;
    use std::sync::Arc;

    fn make_engine() -> PolicyEngine {
        let backend = Arc::new(SqliteConfigStore::in_memory().unwrap());
        PolicyEngine::new(PolicyStore::new(backend))
    }

    fn local(d: u32, h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, d, h, m, 0).unwrap()
    }

    fn trip() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn test_defaults_without_stored_policy() {
        let engine = make_engine();
        assert_eq!(engine.settings(), SchedulingPolicy::default());
    }

    #[test]
    fn test_booking_window_boundary() {
        let engine = make_engine();
        let departure = local(10, 8, 0);

        assert!(engine.is_booking_allowed(trip(), departure, local(9, 18, 59)).is_allowed());

        let decision = engine.is_booking_allowed(trip(), departure, local(9, 19, 0));
        assert!(matches!(
            decision.denial(),
            Some(DenialReason::OutsideBookingHours { end_hour: 19, .. })
        ));
    }

    #[test]
    fn test_decisions_see_updates_immediately() {
        let engine = make_engine();
        let now = local(8, 10, 0);

        assert!(!engine.is_within_booking_time_window(trip(), now).is_allowed());

        assert!(engine.update_setting("bookingWindowDaysBefore", json!(2)));
        assert!(engine.is_within_booking_time_window(trip(), now).is_allowed());

        assert!(engine.update_setting("enableBookingTimeWindow", json!(false)));
        assert!(engine.next_booking_window(trip()).is_none());
    }

    #[test]
    fn test_next_window_tracks_policy() {
        let engine = make_engine();
        let window = engine.next_booking_window(trip()).unwrap();
        assert_eq!(window.date, NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
        assert_eq!(window.end_time, "7:00 PM");
    }

    #[test]
    fn test_pricing_through_engine() {
        let engine = make_engine();
        let now = local(9, 10, 0);

        // Dynamic pricing is off by default
        assert_eq!(engine.calculate_price(100.0, now, true), 100.0);

        let policy = SchedulingPolicy {
            dynamic_pricing: true,
            peak_hour_multiplier: 1.5,
            student_discount_percent: 10.0,
            ..Default::default()
        };
        assert!(engine.save_settings(&policy));

        let price = engine.calculate_price(100.0, now, true);
        assert_eq!(price, 150.0);
        assert_eq!(engine.apply_student_discount(price), 135.0);
    }

    #[test]
    fn test_deadlines_through_engine() {
        let engine = make_engine();
        let departure = local(10, 8, 0);

        // Defaults: 24h to cancel, 12h to reschedule
        assert!(engine.can_cancel_booking(departure, local(9, 8, 0)));
        assert!(!engine.can_cancel_booking(departure, local(9, 9, 0)));
        assert!(engine.can_reschedule_booking(departure, local(9, 20, 0)));
        assert!(!engine.can_reschedule_booking(departure, local(9, 20, 1)));
    }

    #[test]
    fn test_reminders_through_engine() {
        let engine = make_engine();
        let departure = local(10, 8, 0);

        assert!(engine.should_send_reminder(departure, local(9, 8, 24)));
        assert!(!engine.should_send_reminder(departure, local(9, 12, 0)));
        assert_eq!(engine.due_reminder(departure, local(10, 6, 0)), Some(2.0));
    }

    #[test]
    fn test_engine_with_memory_backend() {
        let backend = Arc::new(MemoryConfigStore::new());
        let engine = PolicyEngine::new(PolicyStore::new(backend));

        assert!(engine.update_setting("weekendSchedulingEnabled", json!(true)));
        assert!(engine.settings().weekend_scheduling_enabled);
        assert!(engine.store().is_healthy());
    }
}
