//! Cache Engine Module
//!
//! Main cache engine: namespaced identifiers, absolute-time expiry and the
//! snapshot round-trip to a backing store.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backing::{BackingStore, MemoryBackingStore};
use crate::cache::snapshot::{self, SNAPSHOT_IDENTIFIER};
use crate::cache::{build_namespaced_key, CacheEntry, CacheStats, DEFAULT_TTL_SECONDS};
use crate::error::Result;

// == Cache Engine ==
/// In-memory TTL cache with namespaces and snapshot persistence.
///
/// The engine does no locking of its own. Hosts that share it between tasks
/// wrap it in a single lock (see [`crate::api::AppState`]).
///
/// Every per-key operation takes an optional namespace; `None` and `Some("")`
/// both mean "no namespace".
#[derive(Debug)]
pub struct CacheEngine<V, B = MemoryBackingStore> {
    /// Identifier -> entry storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Read and eviction counters
    stats: CacheStats,
    /// TTL in seconds applied when `set` gets no explicit TTL
    default_ttl: f64,
    /// Where snapshots are written to and read from
    backing: B,
}

impl<V, B: BackingStore> CacheEngine<V, B> {
    // == Constructors ==
    /// Creates an empty engine using the standard one-day default TTL.
    pub fn new(backing: B) -> Self {
        Self::with_default_ttl(backing, DEFAULT_TTL_SECONDS)
    }

    /// Creates an empty engine with a custom default TTL in seconds.
    pub fn with_default_ttl(backing: B, default_ttl: f64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
            backing,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing whatever was there.
    ///
    /// The entry expires `ttl` seconds from now (default TTL when `None`).
    /// A TTL of zero or less stores an entry that is already expired.
    pub fn set(&mut self, key: &str, value: V, namespace: Option<&str>, ttl: Option<f64>) {
        let id = build_namespaced_key(key, namespace);
        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(id, entry);
    }

    // == Get ==
    /// Returns the live entry for `key`.
    ///
    /// This is a read with eviction: an expired entry is removed from the
    /// store before `None` is returned. Use [`exists`](Self::exists) or
    /// [`is_expired`](Self::is_expired) for checks without side effects.
    pub fn get(&mut self, key: &str, namespace: Option<&str>) -> Option<&CacheEntry<V>> {
        let id = build_namespaced_key(key, namespace);

        let expired = match self.entries.get(&id) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(&id);
            self.stats.record_lazy_eviction();
            self.stats.record_miss();
            debug!("Evicted expired entry '{}' on read", id);
            return None;
        }

        self.stats.record_hit();
        self.entries.get(&id)
    }

    // == Exists ==
    /// True if an entry is present and not expired. Never mutates.
    pub fn exists(&self, key: &str, namespace: Option<&str>) -> bool {
        !self.is_expired(key, namespace)
    }

    // == Is Expired ==
    /// True if there is no entry, or the entry's expiry has passed.
    ///
    /// Unlike [`get`](Self::get) this never evicts.
    pub fn is_expired(&self, key: &str, namespace: Option<&str>) -> bool {
        let id = build_namespaced_key(key, namespace);
        self.entries
            .get(&id)
            .map_or(true, |entry| entry.is_expired())
    }

    // == Delete ==
    /// Removes the entry for `key` if there is one.
    pub fn delete(&mut self, key: &str, namespace: Option<&str>) {
        let id = build_namespaced_key(key, namespace);
        self.entries.remove(&id);
    }

    // == Clean Namespace ==
    /// Removes every entry whose identifier contains `namespace`.
    ///
    /// Matching is a plain substring test on the whole identifier, so it also
    /// catches un-namespaced keys or other namespaces that happen to contain
    /// the text. An empty `namespace` removes nothing.
    ///
    /// Returns the number of entries removed.
    pub fn clean_namespace(&mut self, namespace: &str) -> usize {
        if namespace.is_empty() {
            return 0;
        }

        let before = self.entries.len();
        self.entries.retain(|id, _| !id.contains(namespace));
        let removed = before - self.entries.len();

        debug!("Cleaned namespace '{}': {} entries removed", namespace, removed);
        removed
    }

    // == Delete Outdated ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn delete_outdated(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.entries.len();

        self.stats.record_swept(removed);
        removed
    }

    // == Reset ==
    /// Drops every entry. The backing store is left alone.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    // == Length ==
    /// Raw number of stored entries, expired-but-unswept ones included.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn default_ttl(&self) -> f64 {
        self.default_ttl
    }

    pub fn backing(&self) -> &B {
        &self.backing
    }

    // == Save To Disk ==
    /// Sweeps expired entries, then writes all remaining entries to the
    /// backing store as a single snapshot.
    ///
    /// Returns `true` only when the backing store confirmed a durable write.
    /// On failure the in-memory entries are left as they were.
    pub fn save_to_disk(&mut self) -> bool
    where
        V: Serialize,
    {
        self.delete_outdated();

        match self.write_snapshot() {
            Ok(bytes) => {
                info!(
                    "Saved snapshot: {} entries, {} bytes",
                    self.entries.len(),
                    bytes
                );
                true
            }
            Err(err) => {
                warn!("Failed to save snapshot: {}", err);
                false
            }
        }
    }

    // == Restore From Disk ==
    /// Replaces the in-memory entries with the persisted snapshot.
    ///
    /// The store is reset first, whatever the outcome. Entries come back with
    /// their persisted absolute expiry, so some may already be expired.
    /// Returns `false` if no snapshot exists or it cannot be decoded; the
    /// store is then empty.
    pub fn restore_from_disk(&mut self) -> bool
    where
        V: DeserializeOwned,
    {
        self.reset();

        match self.read_snapshot() {
            Ok(Some(entries)) => {
                self.entries = entries;
                info!("Restored snapshot: {} entries", self.entries.len());
                true
            }
            Ok(None) => {
                info!("No snapshot found, starting empty");
                false
            }
            Err(err) => {
                warn!("Failed to restore snapshot: {}", err);
                false
            }
        }
    }

    fn write_snapshot(&mut self) -> Result<usize>
    where
        V: Serialize,
    {
        let blob = snapshot::encode(&self.entries)?;
        self.backing.write(SNAPSHOT_IDENTIFIER, &blob)?;
        Ok(blob.len())
    }

    fn read_snapshot(&self) -> Result<Option<HashMap<String, CacheEntry<V>>>>
    where
        V: DeserializeOwned,
    {
        match self.backing.read(SNAPSHOT_IDENTIFIER)? {
            Some(blob) => snapshot::decode(&blob).map(Some),
            None => Ok(None),
        }
    }
}

impl<V, B: BackingStore + Default> Default for CacheEngine<V, B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}
