//! Ordered set of distinct keys.

use core::cmp::Ordering;
use core::fmt;

use crate::trees::AnyTree;
use crate::trees::bst::{Search, Tree};

/// An unbalanced binary search tree recording key presence only.
pub struct TreeSet<K, C> {
    tree: Tree<K, (), C>,
}

impl<K, C> TreeSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn new(cmp: C) -> Self {
        Self {
            tree: Tree::new(cmp),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tree.node_count()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `key`. An already present key is left in place and still counts
    /// as success, so this always returns `true`.
    pub fn put(&mut self, key: K) -> bool {
        if let Search::Vacant(vacant) = self.tree.search(&key) {
            vacant.insert(key, ());
        }
        true
    }

    /// Adds `key` only when absent. Returns whether it was added.
    pub fn put_if_absent(&mut self, key: K) -> bool {
        match self.tree.search(&key) {
            Search::Found(_) => false,
            Search::Vacant(vacant) => {
                vacant.insert(key, ());
                true
            }
        }
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.tree.remove(key).is_some()
    }

    /// Removes and returns the stored key equal to `key`.
    pub fn take(&mut self, key: &K) -> Option<K> {
        self.tree.remove(key).map(|(k, ())| k)
    }

    pub fn has_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Returns the stored key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.tree.get_key_value(key).map(|(k, _)| k)
    }

    pub fn iter_gt<'a>(&'a self, bound: &'a K) -> impl Iterator<Item = &'a K> + 'a {
        self.tree.iter_gt(bound).map(|(k, _)| k)
    }

    pub fn iter_lt<'a>(&'a self, bound: &'a K) -> impl Iterator<Item = &'a K> + 'a {
        self.tree.iter_lt(bound).map(|(k, _)| k)
    }
}

impl<K, C> TreeSet<K, C> {
    /// Keys in ascending order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.tree.iter().map(|(k, _)| k)
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<K, C> AnyTree<K> for TreeSet<K, C>
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
        usize::from(self.remove(key))
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<K: fmt::Debug, C> fmt::Debug for TreeSet<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, C> Extend<K> for TreeSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.put(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_tree_set_put_is_idempotent() {
        let mut set = TreeSet::new(i32::cmp);
        assert!(set.put(3));
        assert!(set.put(3));
        assert_eq!(set.len(), 1);
        assert!(!set.put_if_absent(3));
        assert!(set.put_if_absent(1));
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3]);
    }

    #[test]
    fn test_tree_set_remove_and_take() {
        let mut set = TreeSet::new(|a: &String, b: &String| a.len().cmp(&b.len()));
        set.put("aa".to_string());
        // same length compares equal, so the first spelling is kept
        set.put("bb".to_string());
        assert_eq!(set.get(&"zz".to_string()).map(String::as_str), Some("aa"));
        assert_eq!(set.take(&"xx".to_string()), Some("aa".to_string()));
        assert!(!set.remove(&"aa".to_string()));
        assert!(set.is_empty());
    }

    #[test]
    fn test_tree_set_bounds_and_debug() {
        let mut set = TreeSet::new(i32::cmp);
        set.extend([5, 1, 9, 3]);
        assert_eq!(set.iter_gt(&3).copied().collect::<Vec<_>>(), [5, 9]);
        assert_eq!(set.iter_lt(&3).copied().collect::<Vec<_>>(), [1]);
        assert_eq!(format!("{set:?}"), "{1, 3, 5, 9}");
        set.clear();
        assert_eq!(set.iter().len(), 0);
    }

    proptest! {
        #[test]
        fn prop_tree_set_matches_btree_set(
            ops in proptest::collection::vec((any::<bool>(), 0u8..64), 0..200),
        ) {
            let mut set = TreeSet::new(u8::cmp);
            let mut model = BTreeSet::new();
            for (insert, k) in ops {
                if insert {
                    prop_assert_eq!(set.put_if_absent(k), model.insert(k));
                } else {
                    prop_assert_eq!(set.remove(&k), model.remove(&k));
                }
                prop_assert_eq!(set.len(), model.len());
            }
            prop_assert!(set.iter().eq(model.iter()));
        }
    }
}
