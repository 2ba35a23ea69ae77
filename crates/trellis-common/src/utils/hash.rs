//! Fast non-cryptographic hashing.
//!
//! Vertex keys are small and trusted, so the algorithms trade DoS resistance
//! for speed and hash with FxHash.

pub use rustc_hash::{FxBuildHasher, FxHasher};

/// A `hashbrown` map keyed with FxHash.
pub type FxHashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// A `hashbrown` set keyed with FxHash.
pub type FxHashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_alias() {
        let mut map: FxHashMap<u64, &str> = FxHashMap::default();
        map.insert(1, "a");
        map.insert(2, "b");
        assert_eq!(map.get(&1), Some(&"a"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_set_alias() {
        let mut set: FxHashSet<&str> = FxHashSet::default();
        assert!(set.insert("vertex"));
        assert!(!set.insert("vertex"));
        assert!(set.contains("vertex"));
    }
}
