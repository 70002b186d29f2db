//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute expiry.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// Represents a single cache entry: the value and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute expiration time (seconds since the Unix epoch)
    pub expires_at: f64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    ///
    /// Zero, negative or NaN TTLs produce an entry that is already expired.
    /// An infinite TTL never expires.
    pub fn new(value: V, ttl_seconds: f64) -> Self {
        let ttl_seconds = if ttl_seconds.is_nan() { 0.0 } else { ttl_seconds };
        Self {
            value,
            expires_at: current_timestamp() + ttl_seconds,
        }
    }

    /// Rebuilds an entry with a previously computed absolute expiry.
    pub fn with_expiry(value: V, expires_at: f64) -> Self {
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to `expires_at`.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp())
    }

    /// Same check against a caller-supplied clock reading.
    pub fn is_expired_at(&self, now: f64) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in seconds, 0.0 once expired.
    pub fn ttl_remaining(&self) -> f64 {
        (self.expires_at - current_timestamp()).max(0.0)
    }

    /// Renders the expiry as an RFC 3339 string, if it is representable.
    pub fn expires_at_rfc3339(&self) -> Option<String> {
        let secs = self.expires_at.floor();
        let nanos = ((self.expires_at - secs) * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs as i64, nanos).map(|dt| dt.to_rfc3339())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in fractional seconds.
pub fn current_timestamp() -> f64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        // Clock set before 1970: report a negative offset instead of panicking.
        Err(before) => -before.duration().as_secs_f64(),
    }
}
