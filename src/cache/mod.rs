//! Cache Module
//!
//! Provides the namespaced in-memory cache with TTL expiration and snapshot
//! persistence.

mod engine;
mod entry;
mod key;
pub mod snapshot;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use engine::CacheEngine;
pub use entry::{current_timestamp, CacheEntry};
pub use key::{build_namespaced_key, NAMESPACE_SEPARATOR};
pub use stats::CacheStats;

// == Public Constants ==
/// TTL applied when none is given: one day.
pub const DEFAULT_TTL_SECONDS: f64 = 86_400.0;
