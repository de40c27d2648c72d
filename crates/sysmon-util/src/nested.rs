//! Auto-vivifying nested maps for grouping collected statistics.
//!
//! Collectors usually build results like `stats[service][instance][field]`
//! without knowing up front which levels exist. [`NestedMap::get_or_create`]
//! creates a missing level on access, and [`NestedMap::set_nested`] writes a
//! value at the end of a key path, forcing every intermediate level to be a
//! map.
//!
//! ```
//! use sysmon_util::nested::{NestedMap, NestedValue};
//!
//! let mut stats: NestedMap<String, u64> = NestedMap::new();
//! stats.set_nested(["memcached", "11211", "curr_items"], 42);
//! stats.set_nested(["memcached", "11211", "evictions"], 0);
//!
//! let items = stats.get_path(["memcached", "11211", "curr_items"]);
//! assert_eq!(items.and_then(NestedValue::as_leaf), Some(&42));
//! ```
//!
//! No locking is done here; share a map across threads behind a `Mutex`.

use crate::scalar::ScalarValue;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Statistics grouped by string keys with parsed scalar leaves.
pub type StatsTree = NestedMap<String, ScalarValue>;

/// A value stored in a [`NestedMap`]: either another level or a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    untagged,
    bound(deserialize = "K: Deserialize<'de> + Ord, V: Deserialize<'de>")
)]
pub enum NestedValue<K, V> {
    Map(NestedMap<K, V>),
    Leaf(V),
}

/// A map that grows intermediate levels on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    transparent,
    bound(deserialize = "K: Deserialize<'de> + Ord, V: Deserialize<'de>")
)]
pub struct NestedMap<K, V> {
    entries: BTreeMap<K, NestedValue<K, V>>,
}

impl<K, V> Default for NestedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V> NestedMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value at `key`, creating an empty map there if the key is
    /// absent.
    ///
    /// An existing value is returned unchanged, even when it is a leaf.
    pub fn get_or_create(&mut self, key: impl Into<K>) -> &mut NestedValue<K, V> {
        self.entries
            .entry(key.into())
            .or_insert_with(|| NestedValue::Map(NestedMap::new()))
    }

    /// Set `value` at the end of `path`.
    ///
    /// Missing intermediate levels are created and leaves found along the
    /// way are replaced by empty maps. Sibling keys are kept. An empty path
    /// does nothing.
    pub fn set_nested<P, Q>(&mut self, path: P, value: V)
    where
        P: IntoIterator<Item = Q>,
        Q: Into<K>,
    {
        self.set_nested_value(path, NestedValue::Leaf(value));
    }

    /// Like [`NestedMap::set_nested`], but stores any [`NestedValue`],
    /// including a whole subtree.
    pub fn set_nested_value<P, Q>(&mut self, path: P, value: NestedValue<K, V>)
    where
        P: IntoIterator<Item = Q>,
        Q: Into<K>,
    {
        let mut keys: Vec<K> = path.into_iter().map(Into::into).collect();
        let Some(last) = keys.pop() else {
            return;
        };

        self.insert_along(keys.into_iter(), last, value);
    }

    /// Walk `parents`, turning missing keys and leaves into maps, then store
    /// `value` under `last`.
    fn insert_along<I>(&mut self, mut parents: I, last: K, value: NestedValue<K, V>)
    where
        I: Iterator<Item = K>,
    {
        let Some(key) = parents.next() else {
            self.entries.insert(last, value);
            return;
        };

        let slot = self.get_or_create(key);
        if let NestedValue::Map(child) = slot {
            child.insert_along(parents, last, value);
            return;
        }

        tracing::trace!("Replacing leaf with an empty map on a forced path");
        let mut child = NestedMap::new();
        child.insert_along(parents, last, value);
        *slot = NestedValue::Map(child);
    }

    /// Follow `path` through existing maps without creating anything.
    ///
    /// Returns `None` for an empty path, a missing key, or a path that runs
    /// into a leaf before its end.
    pub fn get_path<'p, P, Q>(&self, path: P) -> Option<&NestedValue<K, V>>
    where
        P: IntoIterator<Item = &'p Q>,
        K: Borrow<Q>,
        Q: Ord + ?Sized + 'p,
    {
        let mut keys = path.into_iter();
        let mut node = self.get(keys.next()?)?;
        for key in keys {
            node = node.as_map()?.get(key)?;
        }
        Some(node)
    }

    /// Chained auto-vivifying access: `map[k1][k2]...[kn]`.
    ///
    /// Every missing key along `path` gets an empty map. Returns `None` for
    /// an empty path or when an existing leaf sits before the last key; the
    /// leaf is left untouched.
    pub fn get_or_create_path<P, Q>(&mut self, path: P) -> Option<&mut NestedValue<K, V>>
    where
        P: IntoIterator<Item = Q>,
        Q: Into<K>,
    {
        let mut keys = path.into_iter();
        let mut node = self.get_or_create(keys.next()?);
        for key in keys {
            node = node.as_map_mut()?.get_or_create(key);
        }
        Some(node)
    }

    /// Store a leaf at `key`, returning the previous value
    pub fn insert(&mut self, key: impl Into<K>, value: V) -> Option<NestedValue<K, V>> {
        self.entries.insert(key.into(), NestedValue::Leaf(value))
    }

    /// Store any value at `key`, returning the previous value
    pub fn insert_value(
        &mut self,
        key: impl Into<K>,
        value: NestedValue<K, V>,
    ) -> Option<NestedValue<K, V>> {
        self.entries.insert(key.into(), value)
    }

    /// Read-only lookup; never creates a level
    pub fn get<Q>(&self, key: &Q) -> Option<&NestedValue<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut NestedValue<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the top level in key order
    pub fn iter(&self) -> btree_map::Iter<'_, K, NestedValue<K, V>> {
        self.entries.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, K, NestedValue<K, V>> {
        self.entries.keys()
    }
}

impl<'a, K, V> IntoIterator for &'a NestedMap<K, V> {
    type Item = (&'a K, &'a NestedValue<K, V>);
    type IntoIter = btree_map::Iter<'a, K, NestedValue<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V> NestedValue<K, V> {
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn as_map(&self) -> Option<&NestedMap<K, V>> {
        match self {
            Self::Map(map) => Some(map),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut NestedMap<K, V>> {
        match self {
            Self::Map(map) => Some(map),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&V> {
        match self {
            Self::Map(_) => None,
            Self::Leaf(value) => Some(value),
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut V> {
        match self {
            Self::Map(_) => None,
            Self::Leaf(value) => Some(value),
        }
    }
}

impl<K: Ord, V> NestedValue<K, V> {
    /// Auto-vivifying step for chained access; `None` on a leaf.
    pub fn get_or_create(&mut self, key: impl Into<K>) -> Option<&mut NestedValue<K, V>> {
        self.as_map_mut().map(|map| map.get_or_create(key))
    }
}

impl<K, V> From<NestedMap<K, V>> for NestedValue<K, V> {
    fn from(map: NestedMap<K, V>) -> Self {
        Self::Map(map)
    }
}
