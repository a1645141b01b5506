//! Counter persistence.

use async_trait::async_trait;

use crate::error::ApiError;

mod memory;
#[cfg(feature = "server")]
mod postgres;

pub use memory::MemoryCounterStore;
#[cfg(feature = "server")]
pub use postgres::PgCounterStore;

const MAX_NAME_LEN: usize = 64;

/// Storage for named counters.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Current value; a counter that was never touched is 0.
    async fn get(&self, name: &str) -> Result<i64, ApiError>;

    /// Add `by` and return the new value, creating the counter if needed.
    async fn increment(&self, name: &str, by: i64) -> Result<i64, ApiError>;

    /// Add `by` only if the result stays at or below `limit`, as one atomic
    /// step. Returns the new value, or `None` when the increment was refused.
    async fn increment_within(
        &self,
        name: &str,
        by: i64,
        limit: i64,
    ) -> Result<Option<i64>, ApiError>;

    async fn reset(&self, name: &str) -> Result<(), ApiError>;
}

/// Counter names end up in URLs, so keep them to a safe alphabet.
pub fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(ApiError::InvalidInput(format!(
            "counter name must be 1 to {MAX_NAME_LEN} characters"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::InvalidInput(format!(
            "invalid counter name: {name}"
        )));
    }
    Ok(())
}
