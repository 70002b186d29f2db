//! Snapshot Codec
//!
//! Converts the in-memory entry map to the persisted blob and back.
//!
//! The blob is a JSON object mapping each identifier to
//! `{ "data": <value>, "ttl": <absolute expiry> }`. Values that serialize to
//! JSON `null` are written as [`NULL_PLACEHOLDER`] and read back as `null`.
//! Non-finite expiries, which JSON numbers cannot carry, are written as the
//! strings `"Infinity"`, `"-Infinity"` and `"NaN"`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::CacheEntry;
use crate::error::Result;

/// Fixed identifier the snapshot is stored under in the backing store.
pub const SNAPSHOT_IDENTIFIER: &str = "nscache_snapshot";

/// Stand-in written for null values.
pub const NULL_PLACEHOLDER: &str = "__nscache_null__";

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    data: Value,
    #[serde(with = "expiry")]
    ttl: f64,
}

/// Serde adapter for absolute expiries, non-finite values included.
mod expiry {
    use super::fmt;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    const POS_INFINITY: &str = "Infinity";
    const NEG_INFINITY: &str = "-Infinity";
    const NAN: &str = "NaN";

    pub fn serialize<S: Serializer>(ttl: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if ttl.is_finite() {
            serializer.serialize_f64(*ttl)
        } else if ttl.is_nan() {
            serializer.serialize_str(NAN)
        } else if ttl.is_sign_positive() {
            serializer.serialize_str(POS_INFINITY)
        } else {
            serializer.serialize_str(NEG_INFINITY)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(ExpiryVisitor)
    }

    struct ExpiryVisitor;

    impl<'de> Visitor<'de> for ExpiryVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a number, \"{POS_INFINITY}\", \"{NEG_INFINITY}\" or \"{NAN}\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                POS_INFINITY => Ok(f64::INFINITY),
                NEG_INFINITY => Ok(f64::NEG_INFINITY),
                NAN => Ok(f64::NAN),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }
    }
}

/// Serializes every entry (value + absolute expiry) into one blob.
pub fn encode<V: Serialize>(entries: &HashMap<String, CacheEntry<V>>) -> Result<Vec<u8>> {
    // Sorted so identical caches produce identical blobs.
    let mut records = BTreeMap::new();
    for (id, entry) in entries {
        let data = match serde_json::to_value(&entry.value)? {
            Value::Null => Value::String(NULL_PLACEHOLDER.to_string()),
            data => data,
        };
        records.insert(
            id.as_str(),
            SnapshotRecord {
                data,
                ttl: entry.expires_at,
            },
        );
    }
    Ok(serde_json::to_vec(&records)?)
}

/// Rebuilds the entry map from a blob produced by [`encode`].
///
/// Fails as a whole if any record cannot be decoded.
pub fn decode<V: DeserializeOwned>(blob: &[u8]) -> Result<HashMap<String, CacheEntry<V>>> {
    let records: HashMap<String, SnapshotRecord> = serde_json::from_slice(blob)?;

    records
        .into_iter()
        .map(|(id, record)| {
            let data = match record.data {
                Value::String(s) if s == NULL_PLACEHOLDER => Value::Null,
                data => data,
            };
            let value = serde_json::from_value(data)?;
            Ok((id, CacheEntry::with_expiry(value, record.ttl)))
        })
        .collect()
}
