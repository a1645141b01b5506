//! # Database module — PostgreSQL connection pool management
//!
//! This module provides the PostgreSQL connection pool behind the counter store.
//! It is entirely gated behind `#[cfg(feature = "server")]` so that client builds
//! never pull in SQLx or Tokio networking code.
//!
//! ## Design
//!
//! There is no process-wide slot. The server builds a [`DatabaseConfig`] once at
//! startup from its settings (which also honour `DATABASE_URL`),
//! opens the pool with [`connect`], runs [`migrate`], and then hands the pool to
//! whatever needs it by value (a `PgPool` is a cheap, clonable handle).
//!
//! ## Re-exports
//!
//! - [`DatabaseConfig`] — connection string and pool sizing.
//! - [`connect`] — opens a `PgPool` from a config.
//! - [`migrate`] — applies the embedded migrations in `packages/api/migrations`.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::{connect, migrate, DatabaseConfig};
