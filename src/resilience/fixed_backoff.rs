use std::time::Duration;

use crate::config::RetryConfig;

/// Fixed-delay backoff with a bounded number of retries
#[derive(Debug, Clone)]
pub struct FixedBackoff {
    /// Retries still available
    remaining: usize,
    /// Configuration for the retry strategy
    config: RetryConfig,
}

impl FixedBackoff {
    /// Create a new backoff with the full retry budget
    pub fn new(config: RetryConfig) -> Self {
        Self {
            remaining: config.max_retries,
            config,
        }
    }

    /// Consume one retry and return the pause before it, or None once the budget is spent
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.config.delay)
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Number of retries already handed out
    pub fn used(&self) -> usize {
        self.config.max_retries - self.remaining
    }

    /// Reset the budget to start from the beginning
    pub fn reset(&mut self) {
        self.remaining = self.config.max_retries;
    }
}
