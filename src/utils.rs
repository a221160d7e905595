use fnv::FnvBuildHasher;
use std::{collections::HashMap, hash::Hash};

/// Hash map keyed by small integer ids such as `SetId`, where FNV beats the default SipHash.
pub type FnvHashMap<K, V> = HashMap<K, V, FnvBuildHasher>;

/// An empty map with room for `capacity` entries before it reallocates.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}
