// library entry
pub mod config;
pub mod error;
pub mod logging;
pub mod resilience;
pub mod server;
pub mod storage;

#[cfg(test)]
mod test_utils;

// Re-export key components for convenience
pub use config::AppConfig;
pub use error::{CounterError, Result, StorageError};
pub use logging::init as init_logging;
pub use resilience::{increment_with_retry, RetryConfig};
pub use storage::{CounterStore, MemoryStore, RedisStore};
