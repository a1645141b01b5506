//! Data models.

mod counter;

#[cfg(feature = "server")]
pub use counter::Counter;
pub use counter::CounterView;
