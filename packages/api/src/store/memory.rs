use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{validate_name, CounterStore};
use crate::error::ApiError;

/// In-memory CounterStore for tests and for running without a database.
#[derive(Clone, Debug, Default)]
pub struct MemoryCounterStore {
    counters: Arc<Mutex<HashMap<String, i64>>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self) -> std::sync::MutexGuard<'_, HashMap<String, i64>> {
        // A poisoned map is still a valid map.
        self.counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn get(&self, name: &str) -> Result<i64, ApiError> {
        validate_name(name)?;
        Ok(self.counters().get(name).copied().unwrap_or(0))
    }

    async fn increment(&self, name: &str, by: i64) -> Result<i64, ApiError> {
        validate_name(name)?;
        let mut counters = self.counters();
        let value = counters.entry(name.to_string()).or_insert(0);
        *value = value
            .checked_add(by)
            .ok_or_else(|| ApiError::InvalidInput("counter overflow".to_string()))?;
        Ok(*value)
    }

    async fn increment_within(
        &self,
        name: &str,
        by: i64,
        limit: i64,
    ) -> Result<Option<i64>, ApiError> {
        validate_name(name)?;
        let mut counters = self.counters();
        let current = counters.get(name).copied().unwrap_or(0);
        match current.checked_add(by) {
            Some(value) if value <= limit => {
                counters.insert(name.to_string(), value);
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }

    async fn reset(&self, name: &str) -> Result<(), ApiError> {
        validate_name(name)?;
        self.counters().insert(name.to_string(), 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_increment_and_reset() {
        let store = MemoryCounterStore::new();

        // Untouched counters read as zero
        assert_eq!(store.get("default").await.unwrap(), 0);

        assert_eq!(store.increment("default", 1).await.unwrap(), 1);
        assert_eq!(store.increment("default", 4).await.unwrap(), 5);
        assert_eq!(store.get("default").await.unwrap(), 5);
        assert_eq!(store.get("other").await.unwrap(), 0);

        store.reset("default").await.unwrap();
        assert_eq!(store.get("default").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryCounterStore::new();
        let clone = store.clone();
        clone.increment("shared", 2).await.unwrap();
        assert_eq!(store.get("shared").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_overflow_is_rejected() {
        let store = MemoryCounterStore::new();
        store.increment("big", i64::MAX).await.unwrap();
        let err = store.increment("big", 1).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(store.get("big").await.unwrap(), i64::MAX);
    }

    #[tokio::test]
    async fn test_increment_within_limit() {
        let store = MemoryCounterStore::new();
        assert_eq!(store.increment_within("default", 2, 3).await.unwrap(), Some(2));
        assert_eq!(store.increment_within("default", 2, 3).await.unwrap(), None);
        assert_eq!(store.increment_within("default", 1, 3).await.unwrap(), Some(3));
        assert_eq!(store.get("default").await.unwrap(), 3);

        store.increment("big", i64::MAX).await.unwrap();
        assert_eq!(store.increment_within("big", 1, i64::MAX).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_name() {
        let store = MemoryCounterStore::new();
        assert!(store.increment("../etc", 1).await.is_err());
    }
}
