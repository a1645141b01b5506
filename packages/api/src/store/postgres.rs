use async_trait::async_trait;
use sqlx::PgPool;

use super::{validate_name, CounterStore};
use crate::error::ApiError;
use crate::models::Counter;

/// CounterStore backed by the `counters` table.
#[derive(Clone, Debug)]
pub struct PgCounterStore {
    pool: PgPool,
}

impl PgCounterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn load(&self, name: &str) -> Result<Option<Counter>, ApiError> {
        validate_name(name)?;
        let counter: Option<Counter> = sqlx::query_as(
            "SELECT name, value, updated_at FROM counters WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(counter)
    }
}

#[async_trait]
impl CounterStore for PgCounterStore {
    async fn get(&self, name: &str) -> Result<i64, ApiError> {
        Ok(self.load(name).await?.map(|c| c.value).unwrap_or(0))
    }

    async fn increment(&self, name: &str, by: i64) -> Result<i64, ApiError> {
        validate_name(name)?;
        let (value,): (i64,) = sqlx::query_as(
            "INSERT INTO counters (name, value) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET
                value = counters.value + EXCLUDED.value,
                updated_at = NOW()
             RETURNING value",
        )
        .bind(name)
        .bind(by)
        .fetch_one(&self.pool)
        .await?;
        Ok(value)
    }

    async fn increment_within(
        &self,
        name: &str,
        by: i64,
        limit: i64,
    ) -> Result<Option<i64>, ApiError> {
        validate_name(name)?;
        // The conflict branch only updates while the sum stays within the
        // limit; a refused row comes back empty.
        let row: Option<(i64,)> = sqlx::query_as(
            "INSERT INTO counters (name, value)
             SELECT $1, $2 WHERE $2 <= $3
             ON CONFLICT (name) DO UPDATE SET
                value = counters.value + EXCLUDED.value,
                updated_at = NOW()
             WHERE counters.value + EXCLUDED.value <= $3
             RETURNING value",
        )
        .bind(name)
        .bind(by)
        .bind(limit)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn reset(&self, name: &str) -> Result<(), ApiError> {
        validate_name(name)?;
        sqlx::query(
            "INSERT INTO counters (name, value) VALUES ($1, 0)
             ON CONFLICT (name) DO UPDATE SET
                value = 0,
                updated_at = NOW()",
        )
        .bind(name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
