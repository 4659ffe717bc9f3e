// src/storage/tests/mod.rs

mod memory_tests;

// Common utilities for storage tests
pub(crate) mod common {
    use crate::error::Result;
    use crate::storage::CounterStore;

    // Counter semantics every store must honour
    pub async fn test_counter_operations<S: CounterStore>(store: &S, key: &str) -> Result<()> {
        // Absent counters read as None and start from zero
        assert_eq!(store.get(key).await?, None);
        assert_eq!(store.increment(key).await?, 1);
        assert_eq!(store.get(key).await?, Some(1));

        // Each increment is exactly one more than the last
        for expected in 2..=5 {
            assert_eq!(store.increment(key).await?, expected);
        }

        assert_eq!(store.increment_by(key, 10).await?, 15);
        assert_eq!(store.increment_by(key, -5).await?, 10);
        assert_eq!(store.get(key).await?, Some(10));

        Ok(())
    }

    pub async fn test_empty_key_rejected<S: CounterStore>(store: &S) {
        let err = store.increment("").await.unwrap_err();
        assert!(!err.is_connection());
        assert!(store.get("").await.is_err());
    }
}
