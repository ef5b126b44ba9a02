//! In-memory config store

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{ConfigStore, StoreError, StoreResult};

/// Process-local key-value store, for tests and embedding callers that
/// persist the record themselves
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one value
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.write() {
            values.insert(key.into(), value.into());
        }
        store
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let values = self.values.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut values = self.values.write().map_err(|_| StoreError::LockPoisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        !self.values.is_poisoned()
    }
}
