//! Identifier derivation for namespaced keys.

/// Separator placed between a namespace and a key.
pub const NAMESPACE_SEPARATOR: &str = "_";

/// Derives the cache identifier for `key` inside `namespace`.
///
/// A namespace of `None` or `Some("")` means "no namespace" and yields the key
/// unchanged; otherwise the result is `namespace + "_" + key`.
pub fn build_namespaced_key(key: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}{NAMESPACE_SEPARATOR}{key}"),
        _ => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_key() {
        assert_eq!(build_namespaced_key("mama", Some("yo")), "yo_mama");
    }

    #[test]
    fn test_absent_namespace() {
        assert_eq!(build_namespaced_key("mama", None), "mama");
        assert_eq!(build_namespaced_key("mama", Some("")), "mama");
    }

    #[test]
    fn test_empty_key_with_namespace() {
        assert_eq!(build_namespaced_key("", Some("ns")), "ns_");
    }
}
