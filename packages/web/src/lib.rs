//! # Web crate — axum server for the counter app
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`settings`] | Layered configuration (`config.toml`, `COUNTER__*`, `DATABASE_URL`) |
//! | [`logging`] | `tracing-subscriber` setup |
//! | [`routes`] | The axum [`Router`](axum::Router) and its handlers |
//! | [`respond`] | Converts redirect signals into meta-refresh pages or `302` responses |
//! | [`pages`] | HTML rendering |

use std::sync::Arc;

use api::db::{self, DatabaseConfig};
use api::store::PgCounterStore;
use api::{ApiError, CounterStore, MemoryCounterStore};

pub mod logging;
pub mod pages;
pub mod respond;
pub mod routes;
pub mod settings;

pub use routes::{router, AppState};
pub use settings::Settings;

/// Connect, migrate and wrap the pool in a store. Without a database URL the
/// server falls back to an in-memory store.
pub async fn build_store(config: &DatabaseConfig) -> Result<Arc<dyn CounterStore>, ApiError> {
    if !config.is_configured() {
        tracing::warn!("no database configured, counters are kept in memory");
        return Ok(Arc::new(MemoryCounterStore::new()));
    }

    let pool = db::connect(config).await?;
    db::migrate(&pool).await?;
    Ok(Arc::new(PgCounterStore::new(pool)))
}
