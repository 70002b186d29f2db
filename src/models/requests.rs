//! Request DTOs for the cache HTTP host
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;

/// Longest key accepted over HTTP.
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value, `null` included
/// - `namespace`: Optional namespace grouping the key
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub ttl: Option<f64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            ));
        }
        if self.ttl.is_some_and(|ttl| !ttl.is_finite()) {
            return Some("TTL must be a finite number of seconds".to_string());
        }
        None
    }
}

/// Query string carrying the optional namespace (`?namespace=...`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamespaceQuery {
    #[serde(default)]
    pub namespace: Option<String>,
}
