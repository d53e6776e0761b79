//! Binary search tree core and the abstraction shared by its four variants.
//!
//! [`TreeMap`](crate::TreeMap), [`TreeMultimap`](crate::TreeMultimap),
//! [`TreeSet`](crate::TreeSet) and [`TreeMultiset`](crate::TreeMultiset) are
//! thin wrappers over one unbalanced tree; they differ only in what each node
//! carries next to its key and in how `len` is counted.

pub(crate) mod bst;

/// An object-safe abstraction over the tree-backed containers.
///
/// `len` follows each container's own counting rule: distinct keys for the map
/// and set, stored values for the multimap, occurrences for the multiset.
pub trait AnyTree<K> {
    /// Returns the number of entries, as counted by the container.
    fn len(&self) -> usize;
    /// Returns `true` if the container holds nothing.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns `true` if `key` is present.
    fn has_key(&self, key: &K) -> bool;
    /// Returns how many entries `key` accounts for (0 when absent).
    fn count_matches(&self, key: &K) -> usize;
    /// Removes `key` entirely, returning how many entries went with it.
    fn remove_key(&mut self, key: &K) -> usize;
    /// Removes everything.
    fn clear(&mut self);
}
