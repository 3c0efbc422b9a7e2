//! Storage trait definitions

use anyhow::Result;

/// String key-value store for local state
///
/// Implementations must be safe to share between the operations layer and
/// the front-end; every read goes to the backing store.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
