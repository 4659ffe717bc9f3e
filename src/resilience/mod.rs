// src/resilience/mod.rs
//! Resilience for calls into the counter store.
//!
//! Connection failures are retried a fixed number of times with a fixed
//! pause in between. Every other failure is returned to the caller on the
//! first occurrence.

mod fixed_backoff;
mod retry;

#[cfg(test)]
mod tests;

// Re-export key components
pub use crate::config::RetryConfig;
pub use fixed_backoff::FixedBackoff;
pub use retry::{increment_with_retry, retry_on_connection};
