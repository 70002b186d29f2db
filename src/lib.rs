//! nscache - A namespaced in-process TTL cache
//!
//! Stores values under `namespace_key` identifiers with absolute expiry
//! times, evicts lazily on read or by sweeping, and persists snapshots to a
//! pluggable backing store. An HTTP host exposing one engine lives in `api`.

pub mod api;
pub mod backing;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use backing::{BackingStore, FileBackingStore, MemoryBackingStore};
pub use cache::{build_namespaced_key, CacheEngine, CacheEntry, CacheStats};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
