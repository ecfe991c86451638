//! Deduplicating key/value storage indexed by input position.

use std::hash::Hash;

use indexmap::IndexMap;

/// A map built from a sequence of `(key, value)` pairs where equal keys
/// share one slot.
///
/// Position `i` of the input can be looked up with [`PackedMap::value`];
/// inputs with equal keys resolve to the same slot, so mutating through one
/// position is visible through every other. A later duplicate's value
/// replaces an earlier one at construction.
#[derive(Debug, Clone)]
pub struct PackedMap<K, V> {
    /// Slot for each input position.
    pub index: Vec<usize>,
    /// Distinct keys in first-appearance order.
    pub keys: Vec<K>,
    pub values: Vec<V>,
}

impl<K, V> PackedMap<K, V> {
    /// Value for input position `i`.
    pub fn value(&self, i: usize) -> &V {
        &self.values[self.index[i]]
    }

    pub fn value_mut(&mut self, i: usize) -> &mut V {
        &mut self.values[self.index[i]]
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for PackedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut slots = IndexMap::new();
        let index = iter
            .into_iter()
            .map(|(key, value)| slots.insert_full(key, value).0)
            .collect();
        let (keys, values) = slots.into_iter().unzip();
        Self {
            index,
            keys,
            values,
        }
    }
}
