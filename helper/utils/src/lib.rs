#[macro_use]
mod index;

pub use nohash_hasher;

/// Fx-hashed map that iterates in insertion order.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;

pub fn fx_indexmap_with_capacity<K, V>(capacity: usize) -> FxIndexMap<K, V> {
    FxIndexMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}

pub fn no_hashmap_with_capacity<K, V>(capacity: usize) -> nohash_hasher::IntMap<K, V> {
    nohash_hasher::IntMap::with_capacity_and_hasher(capacity, Default::default())
}
