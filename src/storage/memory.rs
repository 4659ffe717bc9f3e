// src/storage/memory.rs

// In-process counter store for local development and tests.
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::error::{CounterError, Result, StorageError};
use crate::storage::{validate_key, CounterStore};
use crate::store_op;

/// In-memory counter store.
///
/// Values are kept as text like Redis does, so a non-integer value under a
/// counter key fails the same way `INCRBY` would.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw value, bypassing integer checks.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.write_lock()?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.data
            .write()
            .map_err(|_| CounterError::Internal("memory store lock poisoned".to_string()))
    }

    fn parse(key: &str, raw: &str) -> Result<i64> {
        raw.parse::<i64>().map_err(|_| {
            StorageError::Command(format!(
                "value at {:?} is not an integer or out of range",
                key
            ))
            .into()
        })
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn increment_by(&self, key: &str, amount: i64) -> Result<i64> {
        validate_key(key)?;
        let start = Instant::now();

        let result = {
            let mut data = self.write_lock()?;
            let current = match data.get(key) {
                Some(raw) => Self::parse(key, raw),
                None => Ok(0),
            };

            current.and_then(|value| {
                let next = value.checked_add(amount).ok_or_else(|| {
                    CounterError::from(StorageError::Command(
                        "increment or decrement would overflow".to_string(),
                    ))
                })?;
                data.insert(key.to_string(), next.to_string());
                Ok(next)
            })
        };

        store_op!("incrby", key, result, start.elapsed().as_millis() as u64);
        result
    }

    async fn get(&self, key: &str) -> Result<Option<i64>> {
        validate_key(key)?;
        let data = self
            .data
            .read()
            .map_err(|_| CounterError::Internal("memory store lock poisoned".to_string()))?;

        data.get(key).map(|raw| Self::parse(key, raw)).transpose()
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
