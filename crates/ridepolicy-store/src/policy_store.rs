//! Scheduling policy persistence over a `ConfigStore`

use ridepolicy_config::{validate_policy, SchedulingPolicy, ValidationError, SETTINGS_KEY};
use ridepolicy_util::RidePolicyError;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{ConfigStore, StoreError};

/// Why a policy write was refused
#[derive(Debug, Error)]
pub enum PolicyWriteError {
    #[error(transparent)]
    Setting(#[from] RidePolicyError),

    #[error("Policy is invalid: {errors:?}")]
    Invalid { errors: Vec<ValidationError> },

    #[error("Failed to persist policy: {0}")]
    Store(#[from] StoreError),
}

/// Reads and writes the scheduling policy record.
///
/// Never caches: every `load` sees the latest committed record. Reads fail
/// open to the compiled-in defaults; writes report failure as `false`.
#[derive(Clone)]
pub struct PolicyStore {
    backend: Arc<dyn ConfigStore>,
}

impl PolicyStore {
    pub fn new(backend: Arc<dyn ConfigStore>) -> Self {
        Self { backend }
    }

    /// Load the current policy, merged over the defaults.
    ///
    /// A missing record, a backend failure, an undecodable record and a
    /// record that fails validation all yield the defaults.
    pub fn load(&self) -> SchedulingPolicy {
        let stored = match self.backend.load(SETTINGS_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                debug!("No stored policy, using defaults");
                return SchedulingPolicy::default();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read policy, using defaults");
                return SchedulingPolicy::default();
            }
        };

        let policy = match SchedulingPolicy::from_json(&stored) {
            Ok(policy) => policy,
            Err(e) => {
                warn!(error = %e, "Stored policy is not decodable, using defaults");
                return SchedulingPolicy::default();
            }
        };

        let errors = validate_policy(&policy);
        if !errors.is_empty() {
            warn!(?errors, "Stored policy is invalid, using defaults");
            return SchedulingPolicy::default();
        }

        policy
    }

    /// Replace the stored policy. Returns `false` if it was not written.
    pub fn save(&self, policy: &SchedulingPolicy) -> bool {
        match self.try_save(policy) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Policy not saved");
                false
            }
        }
    }

    /// Replace the stored policy, reporting why a write was refused
    pub fn try_save(&self, policy: &SchedulingPolicy) -> Result<(), PolicyWriteError> {
        let errors = validate_policy(policy);
        if !errors.is_empty() {
            return Err(PolicyWriteError::Invalid { errors });
        }

        let json = policy.to_json().map_err(StoreError::from)?;
        self.backend.save(SETTINGS_KEY, &json)?;

        info!(bytes = json.len(), "Policy saved");
        Ok(())
    }

    /// Read-modify-write a single setting by its stored name.
    /// Returns `false` if the setting was not written.
    pub fn update_setting(&self, key: &str, value: Value) -> bool {
        match self.try_update_setting(key, value) {
            Ok(_) => true,
            Err(e) => {
                warn!(key, error = %e, "Setting not updated");
                false
            }
        }
    }

    /// Read-modify-write a single setting, returning the policy as written
    pub fn try_update_setting(
        &self,
        key: &str,
        value: Value,
    ) -> Result<SchedulingPolicy, PolicyWriteError> {
        let updated = self.load().with_setting(key, value)?;
        self.try_save(&updated)?;
        info!(key, "Setting updated");
        Ok(updated)
    }

    /// Check if the backend is usable
    pub fn is_healthy(&self) -> bool {
        self.backend.is_healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryConfigStore, SqliteConfigStore, StoreResult};
    use serde_json::json;

    /// Backend whose every operation fails
    struct BrokenStore;

    impl ConfigStore for BrokenStore {
        fn load(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Database("disk I/O error".into()))
        }

        fn save(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Database("disk I/O error".into()))
        }

        fn is_healthy(&self) -> bool {
            false
        }
    }

    fn memory_store() -> (Arc<MemoryConfigStore>, PolicyStore) {
        let backend = Arc::new(MemoryConfigStore::new());
        let store = PolicyStore::new(backend.clone());
        (backend, store)
    }

    #[test]
    fn empty_backend_loads_defaults() {
        let (_, store) = memory_store();
        assert_eq!(store.load(), SchedulingPolicy::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_, store) = memory_store();
        let policy = SchedulingPolicy {
            dynamic_pricing: true,
            peak_hour_multiplier: 1.75,
            weekend_scheduling_enabled: true,
            send_reminder_hours: vec![2.0, 48.0],
            ..Default::default()
        };

        assert!(store.save(&policy));
        assert_eq!(store.load(), policy);
    }

    #[test]
    fn partial_record_merges_over_defaults() {
        let backend = Arc::new(MemoryConfigStore::with_value(
            SETTINGS_KEY,
            r#"{"bookingWindowEndHour": 17, "allowSameDayBooking": true}"#,
        ));
        let store = PolicyStore::new(backend);

        let expected = SchedulingPolicy {
            booking_window_end_hour: 17,
            allow_same_day_booking: true,
            ..Default::default()
        };
        assert_eq!(store.load(), expected);
    }

    #[test]
    fn corrupt_record_loads_defaults() {
        for stored in ["{not json", "42", r#"{"cutoffHours": "two"}"#] {
            let backend = Arc::new(MemoryConfigStore::with_value(SETTINGS_KEY, stored));
            let store = PolicyStore::new(backend);
            assert_eq!(store.load(), SchedulingPolicy::default(), "record: {}", stored);
        }
    }

    #[test]
    fn invalid_record_loads_defaults() {
        let backend = Arc::new(MemoryConfigStore::with_value(
            SETTINGS_KEY,
            r#"{"bookingWindowStartHour": 20, "bookingWindowEndHour": 8}"#,
        ));
        let store = PolicyStore::new(backend);
        assert_eq!(store.load(), SchedulingPolicy::default());
    }

    #[test]
    fn broken_backend_fails_open() {
        let store = PolicyStore::new(Arc::new(BrokenStore));

        assert_eq!(store.load(), SchedulingPolicy::default());
        assert!(!store.save(&SchedulingPolicy::default()));
        assert!(!store.update_setting("cutoffHours", json!(3)));
        assert!(!store.is_healthy());
    }

    #[test]
    fn save_rejects_invalid_policy() {
        let (backend, store) = memory_store();
        let policy = SchedulingPolicy {
            off_peak_discount: 0.0,
            ..Default::default()
        };

        assert!(!store.save(&policy));
        assert!(backend.load(SETTINGS_KEY).unwrap().is_none());
    }

    #[test]
    fn update_setting_changes_one_field() {
        let (_, store) = memory_store();

        assert!(store.update_setting("studentDiscountPercent", json!(10)));
        assert!(store.update_setting("dynamicPricing", json!(true)));

        let policy = store.load();
        assert_eq!(policy.student_discount_percent, 10.0);
        assert!(policy.dynamic_pricing);
        assert_eq!(policy.booking_window_end_hour, 19);
    }

    #[test]
    fn update_setting_rejections() {
        let (_, store) = memory_store();

        assert!(matches!(
            store.try_update_setting("seatCount", json!(3)),
            Err(PolicyWriteError::Setting(RidePolicyError::UnknownSetting(_)))
        ));
        assert!(matches!(
            store.try_update_setting("cutoffHours", json!("soon")),
            Err(PolicyWriteError::Setting(RidePolicyError::InvalidSetting { .. }))
        ));
        assert!(matches!(
            store.try_update_setting("bookingWindowEndHour", json!(30)),
            Err(PolicyWriteError::Invalid { .. })
        ));

        // Nothing was persisted
        assert_eq!(store.load(), SchedulingPolicy::default());
    }

    #[test]
    fn each_load_sees_latest_write() {
        let backend = Arc::new(SqliteConfigStore::in_memory().unwrap());
        let writer = PolicyStore::new(backend.clone());
        let reader = PolicyStore::new(backend);

        assert!(writer.update_setting("cutoffHours", json!(3)));
        assert_eq!(reader.load().cutoff_hours, 3.0);

        assert!(writer.update_setting("cutoffHours", json!(5)));
        assert_eq!(reader.load().cutoff_hours, 5.0);
    }
}
