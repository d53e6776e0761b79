//! Unbalanced binary search tree shared by the tree map and set family.
//!
//! [`Tree`] stores one node per distinct key, ordered by a caller-supplied
//! comparator. What a node carries besides its key is the variant's business:
//! a value, a value array, an occurrence count or nothing at all. That part is
//! the payload `P`.
//!
//! The tree is deliberately not rebalanced. Every walk (lookup, insertion,
//! traversal, teardown) is iterative, so a degenerate tree built from sorted
//! input costs O(n) per operation but never overflows the call stack.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

pub(crate) type Link<K, P> = Option<Box<Node<K, P>>>;

pub(crate) struct Node<K, P> {
    key: K,
    payload: P,
    left: Link<K, P>,
    right: Link<K, P>,
}

impl<K, P> Node<K, P> {
    fn leaf(key: K, payload: P) -> Box<Self> {
        Box::new(Node {
            key,
            payload,
            left: None,
            right: None,
        })
    }
}

/// Outcome of [`Tree::search`].
pub(crate) enum Search<'a, K, P> {
    /// The key is present; its payload is handed out.
    Found(&'a mut P),
    /// The key is absent; the vacant child slot where it belongs.
    Vacant(Vacant<'a, K, P>),
}

pub(crate) struct Vacant<'a, K, P> {
    slot: &'a mut Link<K, P>,
    nodes: &'a mut usize,
}

impl<'a, K, P> Vacant<'a, K, P> {
    /// Hangs a new leaf in the slot.
    pub(crate) fn insert(self, key: K, payload: P) -> &'a mut P {
        let Vacant { slot, nodes } = self;
        *nodes += 1;
        &mut slot.insert(Node::leaf(key, payload)).payload
    }
}

/// Descends from `slot` to the child slot that holds `key`, or the empty slot
/// where it would be attached.
fn find_slot<'a, K, P, C>(mut slot: &'a mut Link<K, P>, cmp: &C, key: &K) -> &'a mut Link<K, P>
where
    C: Fn(&K, &K) -> Ordering,
{
    loop {
        let ordering = match slot.as_deref() {
            Some(node) => cmp(key, &node.key),
            None => return slot,
        };
        slot = match (ordering, slot) {
            (Ordering::Less, Some(node)) => &mut node.left,
            (Ordering::Greater, Some(node)) => &mut node.right,
            (_, slot) => return slot,
        };
    }
}

/// Detaches the leftmost node below `slot`, pulling its right child up.
fn detach_min<K, P>(mut slot: &mut Link<K, P>) -> Option<Box<Node<K, P>>> {
    let slot = loop {
        let descend = slot.as_deref().is_some_and(|node| node.left.is_some());
        slot = match (descend, slot) {
            (true, Some(node)) => &mut node.left,
            (_, slot) => break slot,
        };
    };
    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min)
}

/// Unlinks the node in `slot` and returns it with both links cleared.
///
/// * No child: the slot becomes empty.
/// * One child: the child takes the node's place.
/// * Two children: the in-order successor (the right subtree's minimum) is
///   spliced out of the right subtree and takes the node's place, adopting
///   both remaining subtrees.
fn unlink_node<K, P>(slot: &mut Link<K, P>) -> Option<Box<Node<K, P>>> {
    let mut node = slot.take()?;
    *slot = match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            let mut rest = Some(right);
            detach_min(&mut rest).map(|mut successor| {
                successor.left = Some(left);
                successor.right = rest.take();
                successor
            })
        }
    };
    Some(node)
}

/// Binary search tree keyed by `K` under the comparator `C`.
pub(crate) struct Tree<K, P, C> {
    root: Link<K, P>,
    nodes: usize,
    cmp: C,
}

impl<K, P, C> Tree<K, P, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub(crate) fn new(cmp: C) -> Self {
        Self {
            root: None,
            nodes: 0,
            cmp,
        }
    }

    /// Locates `key`, either handing out its payload or the slot to fill.
    pub(crate) fn search(&mut self, key: &K) -> Search<'_, K, P> {
        let slot = find_slot(&mut self.root, &self.cmp, key);
        match slot {
            Some(node) => Search::Found(&mut node.payload),
            None => Search::Vacant(Vacant {
                slot,
                nodes: &mut self.nodes,
            }),
        }
    }

    fn find(&self, key: &K) -> Option<&Node<K, P>> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match (self.cmp)(key, &node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub(crate) fn get(&self, key: &K) -> Option<&P> {
        self.find(key).map(|n| &n.payload)
    }

    pub(crate) fn get_key_value(&self, key: &K) -> Option<(&K, &P)> {
        self.find(key).map(|n| (&n.key, &n.payload))
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut P> {
        find_slot(&mut self.root, &self.cmp, key)
            .as_deref_mut()
            .map(|n| &mut n.payload)
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes the node for `key` and returns its key and payload.
    pub(crate) fn remove(&mut self, key: &K) -> Option<(K, P)> {
        let slot = find_slot(&mut self.root, &self.cmp, key);
        let node = unlink_node(slot)?;
        self.nodes -= 1;
        let Node { key, payload, .. } = *node;
        Some((key, payload))
    }

    /// Yields the entries whose key compares greater than `bound`, in order.
    pub(crate) fn iter_gt<'a>(
        &'a self,
        bound: &'a K,
    ) -> impl Iterator<Item = (&'a K, &'a P)> + 'a {
        let cmp = &self.cmp;
        self.iter().filter(move |&(key, _)| cmp(bound, key) == Ordering::Less)
    }

    /// Yields the entries whose key compares less than `bound`, in order.
    pub(crate) fn iter_lt<'a>(
        &'a self,
        bound: &'a K,
    ) -> impl Iterator<Item = (&'a K, &'a P)> + 'a {
        let cmp = &self.cmp;
        self.iter().filter(move |&(key, _)| cmp(bound, key) == Ordering::Greater)
    }
}

impl<K, P, C> Tree<K, P, C> {
    /// Number of nodes (distinct keys).
    #[inline(always)]
    pub(crate) fn node_count(&self) -> usize {
        self.nodes
    }

    /// In-order iterator over `(key, payload)`.
    pub(crate) fn iter(&self) -> Iter<'_, K, P> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.nodes,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Drops every node without recursion.
    ///
    /// Right rotations flatten the tree into a right-leaning chain as it is
    /// consumed, so each node is freed with both links already empty.
    pub(crate) fn clear(&mut self) {
        let mut cur = self.root.take();
        while let Some(mut node) = cur {
            cur = match node.left.take() {
                Some(mut left) => {
                    node.left = left.right.take();
                    left.right = Some(node);
                    Some(left)
                }
                None => node.right.take(),
            };
        }
        self.nodes = 0;
    }

    /// Length of the longest root-to-leaf path, counted in nodes.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K, P>, usize)> = Vec::new();
        stack.extend(self.root.as_deref().map(|n| (n, 1)));
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }
}

impl<K, P, C> Drop for Tree<K, P, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: fmt::Debug, P: fmt::Debug, C> fmt::Debug for Tree<K, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// In-order iterator driven by an explicit stack of pending ancestors.
pub(crate) struct Iter<'a, K, P> {
    stack: Vec<&'a Node<K, P>>,
    remaining: usize,
}

impl<'a, K, P> Iter<'a, K, P> {
    fn push_left_spine(&mut self, mut link: Option<&'a Node<K, P>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, K, P> Iterator for Iter<'a, K, P> {
    type Item = (&'a K, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.payload))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, P> ExactSizeIterator for Iter<'_, K, P> {}
impl<K, P> FusedIterator for Iter<'_, K, P> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tree_of(keys: &[i32]) -> Tree<i32, (), fn(&i32, &i32) -> Ordering> {
        let mut tree = Tree::new(i32::cmp as fn(&i32, &i32) -> Ordering);
        for &k in keys {
            if let Search::Vacant(v) = tree.search(&k) {
                v.insert(k, ());
            }
        }
        tree
    }

    fn keys(tree: &Tree<i32, (), fn(&i32, &i32) -> Ordering>) -> Vec<i32> {
        tree.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_bst_search_inserts_once() {
        let mut tree = tree_of(&[5, 3, 8]);
        assert_eq!(tree.node_count(), 3);
        assert!(matches!(tree.search(&3), Search::Found(_)));
        assert!(matches!(tree.search(&4), Search::Vacant(_)));
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_bst_remove_leaf_one_child_two_children() {
        //        50
        //      /    \
        //    30      70
        //   /       /  \
        //  20      60   80
        //                 \
        //                  90
        let mut tree = tree_of(&[50, 30, 70, 20, 60, 80, 90]);

        assert_eq!(tree.remove(&20), Some((20, ())));
        assert_eq!(keys(&tree), [30, 50, 60, 70, 80, 90]);

        // 80 has only a right child
        assert_eq!(tree.remove(&80), Some((80, ())));
        assert_eq!(keys(&tree), [30, 50, 60, 70, 90]);

        // root with two children: successor 60 takes its place
        assert_eq!(tree.remove(&50), Some((50, ())));
        assert_eq!(keys(&tree), [30, 60, 70, 90]);
        assert_eq!(tree.root.as_ref().map(|n| n.key), Some(60));

        assert_eq!(tree.remove(&50), None);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_bst_successor_with_right_child() {
        // successor 60 has a right child 65 that must be reattached
        let mut tree = tree_of(&[50, 40, 70, 60, 65, 80]);
        tree.remove(&50);
        assert_eq!(keys(&tree), [40, 60, 65, 70, 80]);
        assert!(tree.contains(&65));
    }

    #[test]
    fn test_bst_successor_deep_in_left_spine() {
        // right subtree of 10 is 50 -> 40 -> 30 -> 20 down the left spine,
        // so the successor 20 is three levels below 50
        let mut tree = tree_of(&[10, 5, 50, 40, 30, 20, 25, 45]);
        assert_eq!(tree.remove(&10), Some((10, ())));
        assert_eq!(tree.root.as_ref().map(|n| n.key), Some(20));
        assert_eq!(keys(&tree), [5, 20, 25, 30, 40, 45, 50]);

        // 20's right child 25 was pulled up into its old place under 30
        assert_eq!(tree.remove(&20), Some((20, ())));
        assert_eq!(tree.root.as_ref().map(|n| n.key), Some(25));
        assert_eq!(keys(&tree), [5, 25, 30, 40, 45, 50]);
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn test_bst_bounded_iteration() {
        let tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        let gt: Vec<i32> = tree.iter_gt(&4).map(|(k, _)| *k).collect();
        let lt: Vec<i32> = tree.iter_lt(&4).map(|(k, _)| *k).collect();
        assert_eq!(gt, [5, 6, 7]);
        assert_eq!(lt, [1, 2, 3]);
        assert_eq!(tree.iter_gt(&7).count(), 0);
        assert_eq!(tree.iter_lt(&0).count(), 0);
    }

    #[test]
    fn test_bst_degenerate_tree_is_iterative() {
        let sorted: Vec<i32> = (0..10_000).collect();
        let mut tree = tree_of(&sorted);
        assert_eq!(tree.height(), 10_000);
        assert_eq!(tree.iter().len(), 10_000);
        assert!(tree.contains(&9_999));
        tree.clear();
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.iter().next(), None);
    }

    proptest! {
        #[test]
        fn prop_bst_in_order_is_sorted(
            inserts in proptest::collection::vec(-100i32..100, 0..150),
            removes in proptest::collection::vec(-100i32..100, 0..60),
        ) {
            let mut tree = tree_of(&inserts);
            let mut model: std::collections::BTreeSet<i32> = inserts.iter().copied().collect();
            for k in removes {
                prop_assert_eq!(tree.remove(&k).is_some(), model.remove(&k));
            }
            prop_assert_eq!(keys(&tree), model.iter().copied().collect::<Vec<_>>());
            prop_assert_eq!(tree.node_count(), model.len());
        }
    }
}
