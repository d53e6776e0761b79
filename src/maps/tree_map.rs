//! Ordered map with one value per key.
//!
//! [`TreeMap`] orders its keys with a comparator supplied at construction
//! instead of requiring `K: Ord`, so the same key type can be stored under
//! different orders. See [`crate::trees`] for the shared tree mechanics.

use core::cmp::Ordering;
use core::fmt;

use crate::trees::AnyTree;
use crate::trees::bst::{Search, Tree};

/// An unbalanced binary search tree mapping each key to one value.
pub struct TreeMap<K, V, C> {
    tree: Tree<K, V, C>,
}

impl<K, V, C> TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn new(cmp: C) -> Self {
        Self {
            tree: Tree::new(cmp),
        }
    }

    /// Number of keys.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tree.node_count()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts or overwrites, returning the previous value for an equal key.
    ///
    /// On overwrite the stored key is kept; only the value changes.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.search(&key) {
            Search::Found(slot) => Some(core::mem::replace(slot, value)),
            Search::Vacant(vacant) => {
                vacant.insert(key, value);
                None
            }
        }
    }

    /// Inserts only when the key is absent. Returns whether it inserted.
    pub fn put_if_absent(&mut self, key: K, value: V) -> bool {
        match self.tree.search(&key) {
            Search::Found(_) => false,
            Search::Vacant(vacant) => {
                vacant.insert(key, value);
                true
            }
        }
    }

    /// Removes the key, handing its value back.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key).map(|(_, value)| value)
    }

    pub fn has_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.get_key_value(key)
    }

    /// Returns the stored value, or `default` when the key is absent.
    pub fn get_or_default<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Entries whose key is greater than `bound`, ascending.
    pub fn iter_gt<'a>(&'a self, bound: &'a K) -> impl Iterator<Item = (&'a K, &'a V)> + 'a {
        self.tree.iter_gt(bound)
    }

    /// Entries whose key is less than `bound`, ascending.
    pub fn iter_lt<'a>(&'a self, bound: &'a K) -> impl Iterator<Item = (&'a K, &'a V)> + 'a {
        self.tree.iter_lt(bound)
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// All entries in ascending key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.tree.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.tree.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.tree.iter().map(|(_, v)| v)
    }

    /// Longest root-to-leaf path, in nodes. Sorted insertion makes this `len`.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<K, V, C> AnyTree<K> for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn len(&self) -> usize {
        self.len()
    }
    fn has_key(&self, key: &K) -> bool {
        self.has_key(key)
    }
    fn count_matches(&self, key: &K) -> usize {
        usize::from(self.has_key(key))
    }
    fn remove_key(&mut self, key: &K) -> usize {
        usize::from(self.remove(key).is_some())
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<K, V, C> Extend<(K, V)> for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
