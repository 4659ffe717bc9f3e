use std::sync::Arc;

use crate::error::{CounterError, StorageError};
use crate::storage::{CounterStore, MemoryStore};

use super::common;

#[tokio::test]
async fn test_memory_counter_operations() {
    let store = MemoryStore::new();
    common::test_counter_operations(&store, "memory_counter")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_memory_empty_key() {
    common::test_empty_key_rejected(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_memory_keys_are_independent() {
    let store = MemoryStore::new();

    assert_eq!(store.increment("a").await.unwrap(), 1);
    assert_eq!(store.increment("a").await.unwrap(), 2);
    assert_eq!(store.increment("b").await.unwrap(), 1);
}

#[tokio::test]
async fn test_memory_clones_share_state() {
    let store = MemoryStore::new();
    let other = store.clone();

    store.increment("hits").await.unwrap();
    assert_eq!(other.increment("hits").await.unwrap(), 2);
}

#[tokio::test]
async fn test_memory_non_integer_value_is_command_error() {
    let store = MemoryStore::new();
    store.set_raw("hits", "not a number").unwrap();

    let err = store.increment("hits").await.unwrap_err();
    assert!(matches!(err, CounterError::Storage(StorageError::Command(_))));
    assert!(!err.is_connection());

    // Value is left untouched
    assert!(store.get("hits").await.is_err());
}

#[tokio::test]
async fn test_memory_overflow_is_command_error() {
    let store = MemoryStore::new();
    store.set_raw("hits", &i64::MAX.to_string()).unwrap();

    let err = store.increment("hits").await.unwrap_err();
    assert!(matches!(err, CounterError::Storage(StorageError::Command(_))));
}

#[tokio::test]
async fn test_memory_concurrent_increments_are_atomic() {
    let store = Arc::new(MemoryStore::new());
    let tasks = 16;
    let per_task = 50;

    let handles: Vec<_> = (0..tasks)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let mut seen = Vec::with_capacity(per_task);
                for _ in 0..per_task {
                    seen.push(store.increment("shared").await.unwrap());
                }
                seen
            })
        })
        .collect();

    let mut all = Vec::new();
    for handle in handles {
        all.extend(handle.await.unwrap());
    }
    all.sort_unstable();

    let expected: Vec<i64> = (1..=(tasks * per_task) as i64).collect();
    assert_eq!(all, expected, "every increment returns a distinct value");
}

#[tokio::test]
async fn test_memory_ping() {
    assert!(MemoryStore::new().ping().await.is_ok());
}
