// src/storage/mod.rs

pub mod memory;
pub mod redis;

#[cfg(test)]
mod tests;

pub use memory::MemoryStore;
pub use redis::RedisStore;

use super::error::{Result, StorageError};
use async_trait::async_trait;
use std::fmt::Debug;

/// Core trait that all counter stores must implement.
///
/// Atomicity of increments is delegated to the implementation; callers
/// never lock around these calls.
#[async_trait]
pub trait CounterStore: Send + Sync + Debug {
    // Atomically adds `amount` to the counter at `key` and returns the new value
    async fn increment_by(&self, key: &str, amount: i64) -> Result<i64>;

    // Atomically increments the counter at `key` by one
    async fn increment(&self, key: &str) -> Result<i64> {
        self.increment_by(key, 1).await
    }

    // Reads the current value, `None` if the counter was never incremented
    async fn get(&self, key: &str) -> Result<Option<i64>>;

    // Checks that the store answers
    async fn ping(&self) -> Result<()>;
}

/// Rejects keys the store cannot address.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey(key.to_string()).into());
    }
    Ok(())
}
