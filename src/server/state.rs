//! Shared application state for the HTTP server.

use std::sync::Arc;

use crate::config::{AppConfig, RetryConfig};
use crate::storage::CounterStore;

#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    store: Arc<dyn CounterStore>,
    key: String,
    retry: RetryConfig,
    debug: bool,
}

impl AppState {
    /// Wires a store handle into the request handlers. The store is shared by
    /// every request; it must tolerate concurrent calls.
    pub fn new(store: Arc<dyn CounterStore>, config: &AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                key: config.store.key.clone(),
                retry: config.retry.clone(),
                debug: config.server.debug,
            }),
        }
    }

    pub fn store(&self) -> &dyn CounterStore {
        self.inner.store.as_ref()
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    pub fn retry(&self) -> &RetryConfig {
        &self.inner.retry
    }

    pub fn debug(&self) -> bool {
        self.inner.debug
    }
}
