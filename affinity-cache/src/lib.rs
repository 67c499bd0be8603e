//! Sliding-TTL cache for upstream fetch results.
//!
//! Generic in-memory cache where every hit renews the entry's lifetime,
//! plus a periodic background sweeper that evicts expired entries.

mod cache;
mod sweeper;

pub use cache::TtlCache;
pub use sweeper::{Sweeper, SweeperHandle};
