// src/test_utils.rs

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{CounterError, Result, StorageError};
use crate::storage::{CounterStore, MemoryStore};

/// Outcome injected for one call to `increment_by`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Connection,
    Command,
}

impl Fault {
    fn into_error(self) -> CounterError {
        match self {
            Fault::Connection => {
                StorageError::Connection("Connection refused (os error 111)".to_string()).into()
            }
            Fault::Command => StorageError::Command(
                "WRONGTYPE Operation against a key holding the wrong kind of value".to_string(),
            )
            .into(),
        }
    }
}

/// Counter store that fails according to a script before delegating to memory.
///
/// Each call pops the next scripted fault; once the script is empty calls
/// succeed unless `always_fail` is set.
#[derive(Debug, Clone, Default)]
pub struct ScriptedStore {
    inner: MemoryStore,
    script: Arc<Mutex<VecDeque<Fault>>>,
    always_fail: Option<Fault>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the first `n` calls with the given fault.
    pub fn failing_first(n: usize, fault: Fault) -> Self {
        let store = Self::new();
        store.script_push_n(n, fault);
        store
    }

    /// Appends `n` faults to the end of the script.
    pub fn script_push_n(&self, n: usize, fault: Fault) {
        self.script
            .lock()
            .unwrap()
            .extend(std::iter::repeat(fault).take(n));
    }

    /// Fails every call with the given fault.
    pub fn always(fault: Fault) -> Self {
        Self {
            always_fail: Some(fault),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }
}

#[async_trait]
impl CounterStore for ScriptedStore {
    async fn increment_by(&self, key: &str, amount: i64) -> Result<i64> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.script.lock().unwrap().pop_front();
        if let Some(fault) = scripted.or(self.always_fail) {
            return Err(fault.into_error());
        }

        self.inner.increment_by(key, amount).await
    }

    async fn get(&self, key: &str) -> Result<Option<i64>> {
        self.inner.get(key).await
    }

    async fn ping(&self) -> Result<()> {
        match self.always_fail {
            Some(fault) => Err(fault.into_error()),
            None => Ok(()),
        }
    }
}
