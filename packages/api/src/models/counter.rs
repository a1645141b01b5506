//! # Counter model
//!
//! ## [`Counter`] (server only)
//!
//! The row from the `counters` table, loaded with [`sqlx::FromRow`]:
//! `name` (primary key), `value`, and `updated_at`.
//!
//! ## [`CounterView`]
//!
//! What a page needs to render a counter: its name, value and the configured
//! limit. Built with [`CounterView::new`].

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;

/// Full counter record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Counter {
    pub name: String,
    pub value: i64,
    pub updated_at: DateTime<Utc>,
}

/// Counter state as shown on a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CounterView {
    pub name: String,
    pub value: i64,
    pub limit: i64,
}

impl CounterView {
    pub fn new(name: String, value: i64, limit: i64) -> Self {
        Self { name, value, limit }
    }

    /// How many increments are left before the limit page kicks in.
    pub fn remaining(&self) -> i64 {
        (self.limit - self.value).max(0)
    }
}
