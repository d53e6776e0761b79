//! Ordered map holding an array of values per key.
//!
//! Putting an existing key appends to that key's value array, so values are
//! returned in insertion order. `len` counts stored values, not keys; use
//! [`key_count`](TreeMultimap::key_count) for the number of distinct keys.
//!
//! Value arrays grow through the map's [`GrowthPolicy`]. The default is
//! [`GrowthPolicy::Exact`], which grows an array one slot at a time.

use core::cmp::Ordering;
use core::fmt;
use core::ops::Range;

use crate::error::{CollectionError, Result};
use crate::trees::AnyTree;
use crate::trees::bst::{Search, Tree};
use crate::utils::growth::GrowthPolicy;

/// An unbalanced binary search tree mapping each key to a list of values.
pub struct TreeMultimap<K, V, C> {
    tree: Tree<K, Vec<V>, C>,
    len: usize,
    policy: GrowthPolicy,
}

/// Appends `value` to `values`, growing the array through `policy` first.
fn push_value<V>(values: &mut Vec<V>, value: V, policy: GrowthPolicy) -> Result<()> {
    let len = values.len();
    if len == values.capacity() {
        let wanted = len.checked_add(1).ok_or(CollectionError::CapacityOverflow)?;
        let new_cap = policy
            .grow(wanted)
            .ok_or(CollectionError::CapacityOverflow)?;
        values
            .try_reserve_exact(new_cap - len)
            .map_err(|e| CollectionError::alloc(new_cap, e))?;
    }
    values.push(value);
    Ok(())
}

impl<K, V, C> TreeMultimap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn new(cmp: C) -> Self {
        Self::with_growth(cmp, GrowthPolicy::Exact)
    }

    /// Creates a multimap whose value arrays grow by `policy`.
    pub fn with_growth(cmp: C, policy: GrowthPolicy) -> Self {
        Self {
            tree: Tree::new(cmp),
            len: 0,
            policy,
        }
    }

    /// Total number of stored values across all keys.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.tree.node_count()
    }

    /// Adds `value` under `key`, after any values already stored there.
    ///
    /// On allocation failure nothing is stored and `len` is unchanged.
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        let policy = self.policy;
        match self.tree.search(&key) {
            Search::Found(values) => push_value(values, value, policy)?,
            Search::Vacant(vacant) => {
                let mut values = Vec::new();
                push_value(&mut values, value, policy)?;
                vacant.insert(key, values);
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Adds `value` only when `key` has no values yet.
    pub fn put_if_absent(&mut self, key: K, value: V) -> Result<bool> {
        let policy = self.policy;
        match self.tree.search(&key) {
            Search::Found(_) => Ok(false),
            Search::Vacant(vacant) => {
                let mut values = Vec::new();
                push_value(&mut values, value, policy)?;
                vacant.insert(key, values);
                self.len += 1;
                Ok(true)
            }
        }
    }

    /// Removes the key and hands back all of its values.
    pub fn remove(&mut self, key: &K) -> Option<Vec<V>> {
        let (_, values) = self.tree.remove(key)?;
        self.len -= values.len();
        Some(values)
    }

    /// Removes the values at positions `range` for `key`.
    ///
    /// The upper bound is clamped to the number of values; a range starting
    /// past the end removes nothing. When the range covers every value the key
    /// itself is removed. Returns how many values were removed.
    pub fn remove_values(&mut self, key: &K, range: Range<usize>) -> usize {
        if range.start >= range.end {
            return 0;
        }
        let Some(values) = self.tree.get_mut(key) else {
            return 0;
        };

        let count = values.len();
        let hi = range.end.min(count);
        if range.start >= count {
            return 0;
        }
        if range.start == 0 && hi == count {
            self.tree.remove(key);
            self.len -= count;
            return count;
        }

        values.drain(range.start..hi);
        let removed = hi - range.start;
        self.len -= removed;
        removed
    }

    pub fn has_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Number of values stored under `key`.
    pub fn count_matches(&self, key: &K) -> usize {
        self.tree.get(key).map_or(0, Vec::len)
    }

    /// Values stored under `key`, in insertion order.
    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.tree.get(key).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut [V]> {
        self.tree.get_mut(key).map(Vec::as_mut_slice)
    }

    pub fn get_or_default<'a>(&'a self, key: &K, default: &'a [V]) -> &'a [V] {
        self.get(key).unwrap_or(default)
    }

    pub fn iter_gt<'a>(&'a self, bound: &'a K) -> impl Iterator<Item = (&'a K, &'a [V])> + 'a {
        self.tree.iter_gt(bound).map(|(k, v)| (k, v.as_slice()))
    }

    pub fn iter_lt<'a>(&'a self, bound: &'a K) -> impl Iterator<Item = (&'a K, &'a [V])> + 'a {
        self.tree.iter_lt(bound).map(|(k, v)| (k, v.as_slice()))
    }
}

impl<K, V, C> TreeMultimap<K, V, C> {
    /// Keys in ascending order, each with its values.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &[V])> + '_ {
        self.tree.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }
}

impl<K, V, C> AnyTree<K> for TreeMultimap<K, V, C>
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
        self.count_matches(key)
    }
    fn remove_key(&mut self, key: &K) -> usize {
        self.remove(key).map_or(0, |values| values.len())
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMultimap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
