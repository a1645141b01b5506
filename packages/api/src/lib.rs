//! # API crate — page loaders and form actions for the counter app
//!
//! This crate holds everything the server needs that is not HTTP plumbing: the
//! redirect signal, the error type, the database pool, the counter stores, and
//! the loaders/actions the routes call.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`redirect`] | — | `redirect(url)`, redirect detection/extraction, and the [`Flow`] result type |
//! | [`error`] | — | [`ApiError`], which also carries redirects |
//! | [`db`] | `server` | PostgreSQL pool from an explicit [`db::DatabaseConfig`], plus migrations |
//! | [`store`] | — | The [`CounterStore`] trait, an in-memory store, and a Postgres store (`server`) |
//! | [`models`] | — | `Counter` rows and the [`CounterView`] pages render |
//!
//! ## Loaders and actions
//!
//! - [`load_counter`] — data for a counter page; redirects to [`LIMIT_PATH`] once
//!   the limit is reached.
//! - [`increment_counter`], [`reset_counter`] — form actions. On success they
//!   redirect back to the counter page (post/redirect/get), so their `Ok` type is
//!   only reachable through [`Flow::from_result`] in theory.
//! - [`legacy_counter`] — the old page URL, which always redirects home.

pub mod db;
pub mod error;
pub mod models;
pub mod redirect;
pub mod store;

pub use error::ApiError;
pub use models::CounterView;
pub use redirect::{
    is_redirect_error, redirect, url_from_redirect_error, Digest, Flow, RedirectError,
    REDIRECT_ERROR_CODE,
};
pub use store::{CounterStore, MemoryCounterStore};

/// Counter shown on the home page.
pub const DEFAULT_COUNTER: &str = "default";

/// Page shown once a counter has reached its limit.
pub const LIMIT_PATH: &str = "/limit";

/// Path of the page that renders `name`.
pub fn counter_path(name: &str) -> String {
    if name == DEFAULT_COUNTER {
        "/".to_string()
    } else {
        format!("/counters/{name}")
    }
}

/// Load a counter for rendering.
pub async fn load_counter(
    store: &dyn CounterStore,
    name: &str,
    limit: i64,
) -> Result<CounterView, ApiError> {
    let value = store.get(name).await?;
    if value >= limit {
        tracing::info!(counter = name, value, limit, "counter at limit");
        return redirect(LIMIT_PATH);
    }
    Ok(CounterView::new(name.to_string(), value, limit))
}

/// Increment a counter by `by` and go back to its page.
pub async fn increment_counter(
    store: &dyn CounterStore,
    name: &str,
    by: i64,
    limit: i64,
) -> Result<i64, ApiError> {
    if by <= 0 {
        return Err(ApiError::InvalidInput(
            "increment must be positive".to_string(),
        ));
    }

    match store.increment_within(name, by, limit).await? {
        Some(value) => {
            tracing::debug!(counter = name, value, "counter incremented");
            redirect(counter_path(name))
        }
        None => {
            tracing::info!(counter = name, by, limit, "increment refused");
            redirect(LIMIT_PATH)
        }
    }
}

/// Reset a counter to zero and go back to its page.
pub async fn reset_counter(store: &dyn CounterStore, name: &str) -> Result<i64, ApiError> {
    store.reset(name).await?;
    tracing::info!(counter = name, "counter reset");
    redirect(counter_path(name))
}

/// The page that used to show the counter. Kept so old links still land.
pub fn legacy_counter() -> Result<CounterView, ApiError> {
    redirect(counter_path(DEFAULT_COUNTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Yields before every call so concurrent actions interleave.
    struct Interleaved(MemoryCounterStore);

    #[async_trait]
    impl CounterStore for Interleaved {
        async fn get(&self, name: &str) -> Result<i64, ApiError> {
            tokio::task::yield_now().await;
            self.0.get(name).await
        }

        async fn increment(&self, name: &str, by: i64) -> Result<i64, ApiError> {
            tokio::task::yield_now().await;
            self.0.increment(name, by).await
        }

        async fn increment_within(
            &self,
            name: &str,
            by: i64,
            limit: i64,
        ) -> Result<Option<i64>, ApiError> {
            tokio::task::yield_now().await;
            self.0.increment_within(name, by, limit).await
        }

        async fn reset(&self, name: &str) -> Result<(), ApiError> {
            tokio::task::yield_now().await;
            self.0.reset(name).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_increments_respect_limit() {
        let store = Interleaved(MemoryCounterStore::new());

        let (first, second) = tokio::join!(
            increment_counter(&store, "default", 1, 1),
            increment_counter(&store, "default", 1, 1),
        );

        let mut urls = vec![
            url_from_redirect_error(&first.unwrap_err()).map(str::to_owned),
            url_from_redirect_error(&second.unwrap_err()).map(str::to_owned),
        ];
        urls.sort();
        assert_eq!(urls, vec![Some("/".to_string()), Some(LIMIT_PATH.to_string())]);
        assert_eq!(store.get("default").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_load_counter() {
        let store = MemoryCounterStore::new();
        store.increment("default", 3).await.unwrap();

        let view = load_counter(&store, "default", 10).await.unwrap();
        assert_eq!(view, CounterView::new("default".into(), 3, 10));
        assert_eq!(view.remaining(), 7);
    }

    #[tokio::test]
    async fn test_load_counter_at_limit_redirects() {
        let store = MemoryCounterStore::new();
        store.increment("default", 10).await.unwrap();

        let err = load_counter(&store, "default", 10).await.unwrap_err();
        assert_eq!(url_from_redirect_error(&err), Some(LIMIT_PATH));
    }

    #[tokio::test]
    async fn test_increment_redirects_back() {
        let store = MemoryCounterStore::new();

        let err = increment_counter(&store, "default", 1, 10).await.unwrap_err();
        assert_eq!(url_from_redirect_error(&err), Some("/"));

        let err = increment_counter(&store, "clicks", 2, 10).await.unwrap_err();
        assert_eq!(url_from_redirect_error(&err), Some("/counters/clicks"));
        assert_eq!(store.get("clicks").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_increment_past_limit_redirects_to_limit_page() {
        let store = MemoryCounterStore::new();
        store.increment("default", 9).await.unwrap();

        let err = increment_counter(&store, "default", 2, 10).await.unwrap_err();
        assert_eq!(url_from_redirect_error(&err), Some(LIMIT_PATH));
        assert_eq!(store.get("default").await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_increment_rejects_non_positive() {
        let store = MemoryCounterStore::new();
        let err = increment_counter(&store, "default", 0, 10).await.unwrap_err();
        assert!(!is_redirect_error(&err));
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_store_errors_are_not_redirects() {
        let store = MemoryCounterStore::new();
        let err = load_counter(&store, "bad/name", 10).await.unwrap_err();
        assert!(!is_redirect_error(&err));
    }

    #[tokio::test]
    async fn test_reset_redirects_back() {
        let store = MemoryCounterStore::new();
        store.increment("default", 5).await.unwrap();

        let flow = Flow::from_result(reset_counter(&store, "default").await).unwrap();
        assert_eq!(flow, Flow::Redirect("/".into()));
        assert_eq!(store.get("default").await.unwrap(), 0);
    }

    #[test]
    fn test_legacy_counter_redirects_home() {
        let flow = Flow::from_result(legacy_counter()).unwrap();
        assert_eq!(flow.redirect_url(), Some("/"));
    }
}
