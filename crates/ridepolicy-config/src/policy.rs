//! The scheduling policy record

use crate::schema::RawPolicyFile;
use ridepolicy_util::{RidePolicyError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Store key the policy record lives under
pub const SETTINGS_KEY: &str = "adminSchedulingSettings";

/// The single configuration aggregate consulted by every decision.
///
/// Field names serialize in camelCase to match the persisted record.
/// Deserialization fills any missing field from [`SchedulingPolicy::default`],
/// so records written before a field existed keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulingPolicy {
    /// Master switch for the day-before booking window
    pub enable_booking_time_window: bool,
    /// First hour (inclusive) of the booking window, 0-23
    pub booking_window_start_hour: u32,
    /// Hour at which the booking window closes, 0-23
    pub booking_window_end_hour: u32,
    /// How many calendar days before the trip the window opens
    pub booking_window_days_before: u32,

    /// Maximum days a booking may be made ahead of departure
    pub booking_advance_days: u32,
    pub min_booking_notice_hours: f64,
    pub cutoff_hours: f64,
    pub allow_same_day_booking: bool,
    pub weekend_scheduling_enabled: bool,

    pub cancellation_deadline_hours: f64,
    pub reschedule_deadline_hours: f64,

    pub dynamic_pricing: bool,
    pub peak_hour_multiplier: f64,
    /// Multiplier applied off-peak, in (0, 1]
    pub off_peak_discount: f64,
    /// Student discount, in percent
    pub student_discount_percent: f64,

    pub auto_notify_passengers: bool,
    /// Reminder offsets in hours before departure. Treated as a set.
    pub send_reminder_hours: Vec<f64>,
}

impl Default for SchedulingPolicy {
    /// Compiled-in defaults.
    ///
    /// Only the window switch, end hour, days-before, notification flag and
    /// reminder offsets have long-standing defaults. Every other value here is
    /// a labelled fallback: the guards need a number, and these keep the
    /// window as the only effective restriction while same-day and weekend
    /// bookings stay closed until an administrator opens them.
    fn default() -> Self {
        Self {
            enable_booking_time_window: true,
            booking_window_start_hour: 0,
            booking_window_end_hour: 19,
            booking_window_days_before: 1,

            // Fallbacks
            booking_advance_days: 30,
            min_booking_notice_hours: 2.0,
            cutoff_hours: 1.0,
            allow_same_day_booking: false,
            weekend_scheduling_enabled: false,
            cancellation_deadline_hours: 24.0,
            reschedule_deadline_hours: 12.0,
            dynamic_pricing: false,
            peak_hour_multiplier: 1.5,
            off_peak_discount: 1.0,
            student_discount_percent: 0.0,

            auto_notify_passengers: true,
            send_reminder_hours: vec![24.0, 2.0],
        }
    }
}

impl SchedulingPolicy {
    /// Decode a stored JSON record, shallow-merging it over the defaults.
    ///
    /// Anything that is not a JSON object with correctly typed fields is an
    /// error; callers treat that the same as "nothing stored".
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("policy record is not a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Encode for storage
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Build a policy from an admin-authored policy file, over the defaults
    pub fn from_raw(raw: RawPolicyFile) -> Self {
        let mut policy = Self::default();

        if let Some(window) = raw.booking_window {
            set_if_some(&mut policy.enable_booking_time_window, window.enabled);
            set_if_some(&mut policy.booking_window_start_hour, window.start_hour);
            set_if_some(&mut policy.booking_window_end_hour, window.end_hour);
            set_if_some(&mut policy.booking_window_days_before, window.days_before);
        }

        if let Some(booking) = raw.booking {
            set_if_some(&mut policy.booking_advance_days, booking.advance_days);
            set_if_some(&mut policy.min_booking_notice_hours, booking.min_notice_hours);
            set_if_some(&mut policy.cutoff_hours, booking.cutoff_hours);
            set_if_some(&mut policy.allow_same_day_booking, booking.allow_same_day);
            set_if_some(&mut policy.weekend_scheduling_enabled, booking.weekends);
        }

        if let Some(changes) = raw.changes {
            set_if_some(
                &mut policy.cancellation_deadline_hours,
                changes.cancellation_deadline_hours,
            );
            set_if_some(
                &mut policy.reschedule_deadline_hours,
                changes.reschedule_deadline_hours,
            );
        }

        if let Some(pricing) = raw.pricing {
            set_if_some(&mut policy.dynamic_pricing, pricing.dynamic);
            set_if_some(&mut policy.peak_hour_multiplier, pricing.peak_hour_multiplier);
            set_if_some(&mut policy.off_peak_discount, pricing.off_peak_discount);
            set_if_some(
                &mut policy.student_discount_percent,
                pricing.student_discount_percent,
            );
        }

        if let Some(notifications) = raw.notifications {
            set_if_some(
                &mut policy.auto_notify_passengers,
                notifications.auto_notify_passengers,
            );
            set_if_some(&mut policy.send_reminder_hours, notifications.reminder_hours);
        }

        policy
    }

    /// Return a copy with one field replaced, addressed by its stored name.
    ///
    /// The value must have the field's JSON type. Range checks are left to
    /// [`crate::validate_policy`].
    pub fn with_setting(&self, key: &str, value: Value) -> Result<Self> {
        let mut record = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                return Err(RidePolicyError::invalid_setting(key, "policy is not serializable"));
            }
        };

        if !record.contains_key(key) {
            return Err(RidePolicyError::unknown_setting(key));
        }

        debug!(key, value = %value, "Applying policy setting");
        record.insert(key.to_string(), value);

        serde_json::from_value(Value::Object(record))
            .map_err(|e| RidePolicyError::invalid_setting(key, e.to_string()))
    }

    /// Names of every persisted setting
    pub fn setting_keys() -> Vec<String> {
        match serde_json::to_value(Self::default()) {
            Ok(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Distinct reminder offsets in display order (largest first)
    pub fn reminder_offsets(&self) -> Vec<f64> {
        let mut offsets = self.send_reminder_hours.clone();
        offsets.sort_by(|a, b| b.total_cmp(a));
        offsets.dedup();
        offsets
    }
}

fn set_if_some<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}
