//! Store trait definitions

use crate::StoreResult;

/// Narrow key-value capability the policy store is built on.
///
/// Implementations must make `save` an atomic replace of the whole value so
/// concurrent readers never observe a partially written record.
pub trait ConfigStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value stored under `key`
    fn save(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Check if the backend is usable
    fn is_healthy(&self) -> bool;
}
