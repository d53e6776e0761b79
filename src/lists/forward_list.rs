//! Singly linked list (LIFO at the head).
//!
//! Each node is a `Box` owned by its predecessor, so node allocation follows
//! the global allocator contract and aborts on exhaustion instead of returning
//! an error. Dropping and clearing unlink nodes one at a time; a long chain
//! never recurses.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// A forward-only list with O(1) push and pop at the head.
pub struct ForwardList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> ForwardList<T> {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn add_first(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    pub fn remove_first(&mut self) -> Option<T> {
        self.head.take().map(|node| {
            let Node { value, next } = *node;
            self.head = next;
            self.len -= 1;
            value
        })
    }

    pub fn first(&self) -> Option<&T> {
        self.head.as_deref().map(|n| &n.value)
    }

    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.head.as_deref_mut().map(|n| &mut n.value)
    }

    pub fn clear(&mut self) {
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
        self.len = 0;
    }

    /// Reverses the chain in place.
    pub fn reverse(&mut self) {
        let mut prev: Link<T> = None;
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = mem::replace(&mut node.next, prev);
            prev = Some(node);
        }
        self.head = prev;
    }

    /// Unlinks every element for which `pred` returns `true`.
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let mut slot = &mut self.head;
        loop {
            let unlink = match slot.as_deref() {
                Some(node) => pred(&node.value),
                None => break,
            };
            if unlink {
                if let Some(mut node) = slot.take() {
                    *slot = node.next.take();
                    removed += 1;
                }
            } else {
                match slot {
                    Some(node) => slot = &mut node.next,
                    None => break,
                }
            }
        }
        self.len -= removed;
        removed
    }

    pub fn remove_match(&mut self, target: &T) -> usize
    where
        T: PartialEq,
    {
        self.remove_if(|v| v == target)
    }

    /// Stable merge sort; equal elements keep their relative order.
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let head = self.head.take();
        self.head = merge_sort(head, self.len, &mut cmp);
    }

    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
            remaining: self.len,
        }
    }
}

/// Sorts a chain of `len` nodes.
fn merge_sort<T, F>(mut head: Link<T>, len: usize, cmp: &mut F) -> Link<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if len < 2 {
        return head;
    }

    let left_len = len / 2;
    let mut slot = &mut head;
    for _ in 0..left_len {
        match slot {
            Some(node) => slot = &mut node.next,
            None => break,
        }
    }
    let right = slot.take();

    let left = merge_sort(head, left_len, cmp);
    let right = merge_sort(right, len - left_len, cmp);
    merge(left, right, cmp)
}

fn merge<T, F>(mut left: Link<T>, mut right: Link<T>, cmp: &mut F) -> Link<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut head: Link<T> = None;
    let mut tail = &mut head;

    loop {
        let take_left = match (&left, &right) {
            (Some(l), Some(r)) => cmp(&l.value, &r.value) != Ordering::Greater,
            _ => break,
        };
        let source = if take_left { &mut left } else { &mut right };
        if let Some(mut node) = source.take() {
            *source = node.next.take();
            tail = &mut tail.insert(node).next;
        }
    }

    *tail = if left.is_some() { left } else { right };
    head
}

impl<T> Default for ForwardList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for ForwardList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for ForwardList<T> {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        let mut tail = &mut out.head;
        for value in self.iter() {
            tail = &mut tail
                .insert(Box::new(Node {
                    value: value.clone(),
                    next: None,
                }))
                .next;
        }
        out.len = self.len;
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for ForwardList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ForwardList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ForwardList<T> {}

/// Builds the list in iteration order: the first item ends up at the head.
impl<T> FromIterator<T> for ForwardList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        let mut tail = &mut list.head;
        for value in iter {
            tail = &mut tail.insert(Box::new(Node { value, next: None })).next;
            list.len += 1;
        }
        list
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            self.remaining -= 1;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

pub struct IntoIter<T>(ForwardList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.remove_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for ForwardList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a ForwardList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ForwardList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
