//! Response DTOs for the cache HTTP host
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats};

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// Namespace the key was looked up in, if any
    pub namespace: Option<String>,
    /// The stored value
    pub value: Value,
    /// Absolute expiry in RFC 3339
    pub expires_at: Option<String>,
    /// Seconds left before expiry
    pub ttl_remaining: f64,
}

impl GetResponse {
    /// Builds the response from a live entry
    pub fn new(key: impl Into<String>, namespace: Option<String>, entry: &CacheEntry<Value>) -> Self {
        Self {
            key: key.into(),
            namespace,
            value: entry.value.clone(),
            expires_at: entry.expires_at_rfc3339(),
            ttl_remaining: entry.ttl_remaining(),
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted", key),
            key,
        }
    }
}

/// Response body for GET /exists/:key
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub key: String,
    pub exists: bool,
    pub expired: bool,
}

/// Response body for DELETE /namespace/:namespace
#[derive(Debug, Clone, Serialize)]
pub struct CleanNamespaceResponse {
    pub namespace: String,
    pub removed: usize,
}

/// Response body for POST /sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepResponse {
    pub removed: usize,
}

/// Response body for POST /save and POST /restore
#[derive(Debug, Clone, Serialize)]
pub struct PersistResponse {
    /// Whether the snapshot was written (save) or found and loaded (restore)
    pub success: bool,
    /// Entries in memory after the operation
    pub entries: usize,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of reads that found a live entry
    pub hits: u64,
    /// Number of reads that found nothing
    pub misses: u64,
    /// Entries evicted on read because they had expired
    pub lazy_evictions: u64,
    /// Entries removed by sweeps
    pub swept: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            lazy_evictions: stats.lazy_evictions,
            swept: stats.swept,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
