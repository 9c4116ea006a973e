//! Aggregation, caching and grouping of parsed todos.

pub mod aggregator;
pub mod cache;
pub mod stats;

pub use aggregator::{Scope, TodoAggregator};
pub use cache::{CacheStore, CACHE_TTL_SECONDS};
