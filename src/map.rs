use thiserror::Error;

use crate::iter::TraversalOrder;
use crate::Boxwood;

struct MapEntry<K: Ord, V> {
    key: K,
    value: Option<V>,
}

impl<K: Ord, V> PartialEq for MapEntry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Ord, V> Eq for MapEntry<K, V> {}

impl<K: Ord, V> PartialOrd for MapEntry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.key.cmp(&other.key))
    }
}

impl<K: Ord, V> Ord for MapEntry<K, V> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Error returned by [`BoxwoodMap::insert`] when the key is already present.
///
/// Carries the rejected key back to the caller; the map is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("duplicate key {0:?} was ignored")]
pub struct DuplicateKey<K: core::fmt::Debug>(pub K);

/// An ordered index, storing key-value pairs in a [`Boxwood`] tree.
///
/// Keys are unique and totally ordered; entries compare by key alone, so
/// values never influence the tree structure and may be overwritten in place.
pub struct BoxwoodMap<K: Ord, V> {
    tree: Boxwood<MapEntry<K, V>>,
}

impl<K: Ord, V> BoxwoodMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: Boxwood::new(),
        }
    }

    /// Inserts a key-value pair. A key that is already present is rejected
    /// with [`DuplicateKey`] and the map is not touched.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKey<K>>
    where
        K: core::fmt::Debug,
    {
        let probe = MapEntry { key, value: None };
        if self.tree.contains(&probe) {
            return Err(DuplicateKey(probe.key));
        }

        self.tree.insert(MapEntry {
            key: probe.key,
            value: Some(value),
        });
        Ok(())
    }

    /// Removes the entry for `key`. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: K) {
        self.tree.remove(&MapEntry { key, value: None });
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.tree.contains(&MapEntry { key, value: None })
    }

    pub fn get(&self, key: K) -> Option<&V> {
        let probe = MapEntry { key, value: None };

        self.tree.get(&probe)?.value.as_ref()
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let probe = MapEntry { key, value: None };

        self.tree.get_mut(&probe)?.value.as_mut()
    }

    /// Key-value pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.tree
            .iter()
            .filter_map(|entry| entry.value.as_ref().map(|value| (&entry.key, value)))
    }

    /// Key-value pairs in the requested traversal order.
    pub fn traverse(&self, order: TraversalOrder) -> impl Iterator<Item = (&K, &V)> {
        self.tree
            .traverse(order)
            .filter_map(|entry| entry.value.as_ref().map(|value| (&entry.key, value)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<K: Ord, V> Default for BoxwoodMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
