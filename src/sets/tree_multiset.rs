//! Ordered multiset: one node per distinct key plus an occurrence count.
//!
//! `len` counts occurrences. Removing a key outright drops all of its
//! occurrences at once; [`remove_count`](TreeMultiset::remove_count) takes away
//! only some of them.

use core::cmp::Ordering;
use core::fmt;

use crate::trees::AnyTree;
use crate::trees::bst::{Search, Tree};

/// An unbalanced binary search tree counting duplicate keys.
pub struct TreeMultiset<K, C> {
    tree: Tree<K, usize, C>,
    len: usize,
}

impl<K, C> TreeMultiset<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn new(cmp: C) -> Self {
        Self {
            tree: Tree::new(cmp),
            len: 0,
        }
    }

    /// Total occurrences across all keys.
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

    /// Adds one occurrence of `key`. The first stored key is kept.
    pub fn put(&mut self, key: K) {
        match self.tree.search(&key) {
            Search::Found(count) => *count += 1,
            Search::Vacant(vacant) => {
                vacant.insert(key, 1);
            }
        }
        self.len += 1;
    }

    /// Adds `key` only when it has no occurrences yet.
    pub fn put_if_absent(&mut self, key: K) -> bool {
        match self.tree.search(&key) {
            Search::Found(_) => false,
            Search::Vacant(vacant) => {
                vacant.insert(key, 1);
                self.len += 1;
                true
            }
        }
    }

    /// Removes every occurrence of `key`, returning how many there were.
    pub fn remove(&mut self, key: &K) -> usize {
        let removed = self.tree.remove(key).map_or(0, |(_, count)| count);
        self.len -= removed;
        removed
    }

    /// Removes up to `n` occurrences of `key`, returning how many were removed.
    ///
    /// The key disappears once its last occurrence is gone.
    pub fn remove_count(&mut self, key: &K, n: usize) -> usize {
        let Some(count) = self.tree.get_mut(key) else {
            return 0;
        };
        if *count > n {
            *count -= n;
            self.len -= n;
            return n;
        }
        self.remove(key)
    }

    pub fn has_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Occurrences of `key` (0 when absent).
    pub fn count_matches(&self, key: &K) -> usize {
        self.tree.get(key).copied().unwrap_or(0)
    }

    pub fn iter_gt<'a>(&'a self, bound: &'a K) -> impl Iterator<Item = (&'a K, usize)> + 'a {
        self.tree.iter_gt(bound).map(|(k, n)| (k, *n))
    }

    pub fn iter_lt<'a>(&'a self, bound: &'a K) -> impl Iterator<Item = (&'a K, usize)> + 'a {
        self.tree.iter_lt(bound).map(|(k, n)| (k, *n))
    }
}

impl<K, C> TreeMultiset<K, C> {
    /// Distinct keys in ascending order with their occurrence counts.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, usize)> + '_ {
        self.tree.iter().map(|(k, n)| (k, *n))
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }
}

impl<K, C> AnyTree<K> for TreeMultiset<K, C>
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
        self.remove(key)
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<K: fmt::Debug, C> fmt::Debug for TreeMultiset<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, C> Extend<K> for TreeMultiset<K, C>
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

    fn by_str(a: &&str, b: &&str) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn test_tree_multiset_counts_duplicates() {
        let mut set = TreeMultiset::new(by_str);
        set.extend(["pear", "apple", "pear", "fig", "pear"]);
        assert_eq!(set.len(), 5);
        assert_eq!(set.key_count(), 3);
        assert_eq!(set.count_matches(&"pear"), 3);
        assert_eq!(set.count_matches(&"kiwi"), 0);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            [(&"apple", 1), (&"fig", 1), (&"pear", 3)]
        );
    }

    #[test]
    fn test_tree_multiset_remove_count() {
        let mut set = TreeMultiset::new(i32::cmp);
        for _ in 0..4 {
            set.put(7);
        }
        set.put(1);
        assert_eq!(set.remove_count(&7, 1), 1);
        assert_eq!(set.count_matches(&7), 3);
        assert_eq!(set.len(), 4);

        // asking for more than present removes the key
        assert_eq!(set.remove_count(&7, 10), 3);
        assert!(!set.has_key(&7));
        assert_eq!(set.len(), 1);
        assert_eq!(set.remove_count(&7, 1), 0);
    }

    #[test]
    fn test_tree_multiset_remove_all_and_put_if_absent() {
        let mut set = TreeMultiset::new(i32::cmp);
        assert!(set.put_if_absent(2));
        assert!(!set.put_if_absent(2));
        set.put(2);
        set.put(5);
        assert_eq!(set.remove(&2), 2);
        assert_eq!(set.remove(&2), 0);
        assert_eq!(set.iter_gt(&2).collect::<Vec<_>>(), [(&5, 1)]);
        assert_eq!(set.iter_lt(&5).count(), 0);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.key_count(), 0);
    }

    #[test]
    fn test_tree_multiset_any_tree() {
        let mut set = TreeMultiset::new(i32::cmp);
        set.extend([4, 4, 4]);
        let tree: &mut dyn AnyTree<i32> = &mut set;
        assert_eq!(tree.count_matches(&4), 3);
        assert_eq!(tree.remove_key(&4), 3);
        assert_eq!(tree.len(), 0);
    }
}
