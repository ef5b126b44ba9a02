//! Raw policy file schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Admin-authored policy file. Every setting is optional and falls back to
/// the compiled-in default.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPolicyFile {
    /// Policy file schema version
    pub config_version: u32,

    pub booking_window: Option<RawBookingWindow>,
    pub booking: Option<RawBookingRules>,
    pub changes: Option<RawChangeRules>,
    pub pricing: Option<RawPricing>,
    pub notifications: Option<RawNotifications>,
}

/// `[booking_window]`: the day-before booking window
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawBookingWindow {
    pub enabled: Option<bool>,
    /// Start hour, 0-23
    pub start_hour: Option<u32>,
    /// End hour, 0-23
    pub end_hour: Option<u32>,
    pub days_before: Option<u32>,
}

/// `[booking]`: eligibility gates
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawBookingRules {
    pub advance_days: Option<u32>,
    pub min_notice_hours: Option<f64>,
    pub cutoff_hours: Option<f64>,
    pub allow_same_day: Option<bool>,
    pub weekends: Option<bool>,
}

/// `[changes]`: cancellation and reschedule deadlines
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawChangeRules {
    pub cancellation_deadline_hours: Option<f64>,
    pub reschedule_deadline_hours: Option<f64>,
}

/// `[pricing]`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPricing {
    pub dynamic: Option<bool>,
    pub peak_hour_multiplier: Option<f64>,
    pub off_peak_discount: Option<f64>,
    pub student_discount_percent: Option<f64>,
}

/// `[notifications]`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawNotifications {
    pub auto_notify_passengers: Option<bool>,
    /// Hours before departure
    pub reminder_hours: Option<Vec<f64>>,
}
