//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check engine behavior over generated keys, namespaces,
//! values and operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::cache::{build_namespaced_key, CacheEngine};

// == Test Configuration ==
const LONG_TTL: Option<f64> = Some(10_000.0);

// == Strategies ==
/// Generates cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,32}".prop_map(|s| s)
}

/// Generates optional namespaces, empty string included
fn namespace_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[a-z]{1,12}".prop_map(Some),
    ]
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,128}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String, ttl: f64 },
    Get { key: String },
    Delete { key: String },
    Sweep,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy(), prop_oneof![Just(0.0), Just(-5.0), Just(10_000.0)])
            .prop_map(|(key, value, ttl)| CacheOp::Set { key, value, ttl }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
        Just(CacheOp::Sweep),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Property 1: Identifier Derivation
    // The identifier is `namespace_key` for a non-empty namespace, else the key.
    #[test]
    fn prop_identifier_derivation(key in key_strategy(), ns in namespace_strategy()) {
        let id = build_namespaced_key(&key, ns.as_deref());
        match ns.as_deref() {
            Some(ns) if !ns.is_empty() => prop_assert_eq!(id, format!("{}_{}", ns, key)),
            _ => prop_assert_eq!(id, key),
        }
    }

    // Property 2: Non-positive TTL Expires Immediately
    #[test]
    fn prop_non_positive_ttl_is_expired(
        key in key_strategy(),
        ns in namespace_strategy(),
        ttl in -1_000_000.0f64..=0.0
    ) {
        let mut cache: CacheEngine<String> = CacheEngine::default();
        cache.set(&key, "v".to_string(), ns.as_deref(), Some(ttl));

        prop_assert!(cache.is_expired(&key, ns.as_deref()));
        prop_assert!(!cache.exists(&key, ns.as_deref()));
    }

    // Property 3: Round-trip Storage Consistency
    // A value stored with a long TTL is readable under the same key and namespace.
    #[test]
    fn prop_roundtrip_storage(
        key in key_strategy(),
        ns in namespace_strategy(),
        value in value_strategy()
    ) {
        let mut cache: CacheEngine<String> = CacheEngine::default();
        cache.set(&key, value.clone(), ns.as_deref(), LONG_TTL);

        prop_assert!(!cache.is_expired(&key, ns.as_deref()));
        let entry = cache.get(&key, ns.as_deref());
        prop_assert_eq!(entry.map(|e| e.value.clone()), Some(value));
    }

    // Property 4: Delete Is Idempotent
    #[test]
    fn prop_delete_idempotent(
        keys in prop::collection::hash_set(key_strategy(), 1..20),
        victim in key_strategy()
    ) {
        let mut cache: CacheEngine<String> = CacheEngine::default();
        for key in &keys {
            cache.set(key, key.clone(), None, LONG_TTL);
        }

        cache.delete(&victim, None);
        let after_first = cache.size();
        cache.delete(&victim, None);

        prop_assert_eq!(cache.size(), after_first);
        prop_assert!(!cache.exists(&victim, None));
    }

    // Property 5: Snapshot Round-trip
    // Save, reset and restore bring back every live entry with the same
    // value and the same expiry bits.
    #[test]
    fn prop_snapshot_roundtrip(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 0..30)
    ) {
        let mut cache: CacheEngine<String> = CacheEngine::default();
        for (key, value) in &entries {
            cache.set(key, value.clone(), Some("snap"), LONG_TTL);
        }

        let mut expiries = HashMap::new();
        for key in entries.keys() {
            let expiry = cache.get(key, Some("snap")).map(|e| e.expires_at);
            expiries.insert(key.clone(), expiry);
        }

        prop_assert!(cache.save_to_disk());
        cache.reset();
        prop_assert!(cache.restore_from_disk());
        prop_assert_eq!(cache.size(), entries.len());

        for (key, value) in &entries {
            let entry = cache.get(key, Some("snap"));
            prop_assert!(entry.is_some());
            let entry = entry.unwrap();
            prop_assert_eq!(&entry.value, value);
            prop_assert_eq!(
                Some(entry.expires_at.to_bits()),
                expiries[key].map(f64::to_bits)
            );
        }
    }

    // Property 6: Namespace Cleaning
    // Afterwards no identifier contains the namespace text, and every entry
    // whose identifier did not contain it is still there.
    #[test]
    fn prop_clean_namespace(
        entries in prop::collection::vec((key_strategy(), namespace_strategy()), 1..30),
        target in "[a-z]{1,3}"
    ) {
        let mut cache: CacheEngine<String> = CacheEngine::default();
        let mut survivors = std::collections::HashSet::new();
        for (key, ns) in &entries {
            cache.set(key, "v".to_string(), ns.as_deref(), LONG_TTL);
            let id = build_namespaced_key(key, ns.as_deref());
            if !id.contains(target.as_str()) {
                survivors.insert((key.clone(), ns.clone()));
            }
        }

        cache.clean_namespace(&target);

        let expected_size = survivors
            .iter()
            .map(|(k, ns)| build_namespaced_key(k, ns.as_deref()))
            .collect::<std::collections::HashSet<_>>()
            .len();
        prop_assert_eq!(cache.size(), expected_size);
        for (key, ns) in &survivors {
            prop_assert!(cache.exists(key, ns.as_deref()));
        }
    }

    // Property 7: Read Consistency
    // Across any operation sequence, `exists` true implies `get` returns an
    // entry, and hits/misses count every `get`.
    #[test]
    fn prop_read_consistency(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut cache: CacheEngine<String> = CacheEngine::default();
        let mut gets: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl } => cache.set(&key, value, None, Some(ttl)),
                CacheOp::Get { key } => {
                    let existed = cache.exists(&key, None);
                    let found = cache.get(&key, None).is_some();
                    gets += 1;
                    prop_assert_eq!(existed, found);
                    prop_assert!(found || cache.is_expired(&key, None));
                }
                CacheOp::Delete { key } => cache.delete(&key, None),
                CacheOp::Sweep => {
                    cache.delete_outdated();
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits + stats.misses, gets);
        prop_assert_eq!(stats.total_entries, cache.size());
    }
}
