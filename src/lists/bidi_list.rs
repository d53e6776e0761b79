//! Doubly linked list whose nodes live in one index-addressed arena.
//!
//! # Design rationale
//! [`BidiList`] is a **Struct-of-Arrays** linked list: node `i` is the triple
//! `(values[i], prevs[i], nexts[i])`, and links are slot indices with
//! [`NONE`] standing in for a null pointer. Removed slots are threaded onto a
//! free list through `nexts` and recycled by later inserts, so a steady-state
//! list stops allocating altogether.
//!
//! Every structural edit goes through three relinking primitives
//! (`insert_before`, `insert_after`, `unlink`). The public add/remove
//! operations only pick the spot and keep `first`/`last` in sync.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use std::collections::LinkedList;

use crate::error::{CollectionError, Result};

/// Sentinel index meaning "no node".
pub const NONE: usize = usize::MAX;

// ─── AnyList ──────────────────────────────────────────────────────────────────

/// An object-safe abstraction over double-ended lists.
pub trait AnyList<T> {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn add_first(&mut self, item: T) -> Result<()>;
    fn add_last(&mut self, item: T) -> Result<()>;
    fn remove_first(&mut self) -> Option<T>;
    fn remove_last(&mut self) -> Option<T>;
    fn first(&self) -> Option<&T>;
    fn last(&self) -> Option<&T>;
    fn clear(&mut self);
}

impl<T> AnyList<T> for LinkedList<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn add_first(&mut self, item: T) -> Result<()> {
        self.push_front(item);
        Ok(())
    }
    fn add_last(&mut self, item: T) -> Result<()> {
        self.push_back(item);
        Ok(())
    }
    fn remove_first(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn remove_last(&mut self) -> Option<T> {
        self.pop_back()
    }
    fn first(&self) -> Option<&T> {
        self.front()
    }
    fn last(&self) -> Option<&T> {
        self.back()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<T> AnyList<T> for BidiList<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn add_first(&mut self, item: T) -> Result<()> {
        self.add_first(item)
    }
    fn add_last(&mut self, item: T) -> Result<()> {
        self.add_last(item)
    }
    fn remove_first(&mut self) -> Option<T> {
        self.remove_first()
    }
    fn remove_last(&mut self) -> Option<T> {
        self.remove_last()
    }
    fn first(&self) -> Option<&T> {
        self.first()
    }
    fn last(&self) -> Option<&T> {
        self.last()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

// ─── BidiList ─────────────────────────────────────────────────────────────────

/// A doubly linked list with O(1) insertion and removal at both ends.
///
/// # Invariants
/// * `first == NONE` iff `last == NONE` iff `len == 0`.
/// * Walking `nexts` from `first` visits exactly `len` live slots and ends at
///   `last`; walking `prevs` from `last` visits the same slots in reverse.
/// * A slot is live iff `values[i].is_some()`. Vacant slots have
///   `prevs[i] == NONE` and are chained from `free_head` through `nexts`.
pub struct BidiList<T> {
    values: Vec<Option<T>>,
    prevs: Vec<usize>,
    nexts: Vec<usize>,
    free_head: usize,
    first: usize,
    last: usize,
    len: usize,
}

impl<T> BidiList<T> {
    pub const fn new() -> Self {
        Self {
            values: Vec::new(),
            prevs: Vec::new(),
            nexts: Vec::new(),
            free_head: NONE,
            first: NONE,
            last: NONE,
            len: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ─── Slot management ──────────────────────────────────────────────────────

    /// Makes sure the next `claim_slot` can succeed without reallocating.
    fn try_reserve_slot(&mut self) -> Result<()> {
        if self.free_head != NONE {
            return Ok(());
        }
        let requested = self.values.len() + 1;
        self.values
            .try_reserve(1)
            .map_err(|e| CollectionError::alloc(requested, e))?;
        self.prevs
            .try_reserve(1)
            .map_err(|e| CollectionError::alloc(requested, e))?;
        self.nexts
            .try_reserve(1)
            .map_err(|e| CollectionError::alloc(requested, e))?;
        Ok(())
    }

    /// Stores `value` in a vacant slot (recycled or fresh) and returns its
    /// unlinked index.
    fn claim_slot(&mut self, value: T) -> usize {
        if self.free_head != NONE {
            let idx = self.free_head;
            self.free_head = self.nexts[idx];
            self.values[idx] = Some(value);
            self.prevs[idx] = NONE;
            self.nexts[idx] = NONE;
            return idx;
        }

        self.values.push(Some(value));
        self.prevs.push(NONE);
        self.nexts.push(NONE);
        self.values.len() - 1
    }

    /// Vacates an already unlinked slot and hands its value back.
    fn release_slot(&mut self, idx: usize) -> Option<T> {
        let value = self.values[idx].take();
        self.prevs[idx] = NONE;
        self.nexts[idx] = self.free_head;
        self.free_head = idx;
        value
    }

    // ─── Relinking primitives ─────────────────────────────────────────────────

    /// Links the unlinked node `idx` immediately before `spot`.
    fn insert_before(&mut self, spot: usize, idx: usize) {
        let prev = self.prevs[spot];
        self.prevs[idx] = prev;
        self.nexts[idx] = spot;
        self.prevs[spot] = idx;

        if prev != NONE {
            self.nexts[prev] = idx;
        } else {
            self.first = idx;
        }
    }

    /// Links the unlinked node `idx` immediately after `spot`.
    fn insert_after(&mut self, spot: usize, idx: usize) {
        let next = self.nexts[spot];
        self.nexts[idx] = next;
        self.prevs[idx] = spot;
        self.nexts[spot] = idx;

        if next != NONE {
            self.prevs[next] = idx;
        } else {
            self.last = idx;
        }
    }

    /// Detaches node `idx` from its neighbours and nulls its links.
    fn unlink(&mut self, idx: usize) {
        let prev = self.prevs[idx];
        let next = self.nexts[idx];

        if prev != NONE {
            self.nexts[prev] = next;
        } else {
            self.first = next;
        }

        if next != NONE {
            self.prevs[next] = prev;
        } else {
            self.last = prev;
        }

        self.prevs[idx] = NONE;
        self.nexts[idx] = NONE;
    }

    fn link_first(&mut self, value: T) {
        let idx = self.claim_slot(value);
        if self.first == NONE {
            self.first = idx;
            self.last = idx;
        } else {
            self.insert_before(self.first, idx);
        }
        self.len += 1;
    }

    fn link_last(&mut self, value: T) {
        let idx = self.claim_slot(value);
        if self.last == NONE {
            self.first = idx;
            self.last = idx;
        } else {
            self.insert_after(self.last, idx);
        }
        self.len += 1;
    }

    fn remove_at(&mut self, idx: usize) -> Option<T> {
        self.unlink(idx);
        self.len -= 1;
        self.release_slot(idx)
    }

    // ─── Public API ───────────────────────────────────────────────────────────

    /// Prepends `value`. On allocation failure the list is unchanged.
    pub fn add_first(&mut self, value: T) -> Result<()> {
        self.try_reserve_slot()?;
        self.link_first(value);
        Ok(())
    }

    /// Appends `value`. On allocation failure the list is unchanged.
    pub fn add_last(&mut self, value: T) -> Result<()> {
        self.try_reserve_slot()?;
        self.link_last(value);
        Ok(())
    }

    pub fn remove_first(&mut self) -> Option<T> {
        if self.first == NONE {
            return None;
        }
        self.remove_at(self.first)
    }

    pub fn remove_last(&mut self) -> Option<T> {
        if self.last == NONE {
            return None;
        }
        self.remove_at(self.last)
    }

    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.values.get(self.first)?.as_ref()
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.values.get(self.last)?.as_ref()
    }

    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.values.get_mut(self.first)?.as_mut()
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.values.get_mut(self.last)?.as_mut()
    }

    /// Drops every element. The arena's allocation is kept for reuse.
    pub fn clear(&mut self) {
        self.values.clear();
        self.prevs.clear();
        self.nexts.clear();
        self.free_head = NONE;
        self.first = NONE;
        self.last = NONE;
        self.len = 0;
    }

    /// Reverses the list in one pass by swapping each node's links.
    pub fn reverse(&mut self) {
        let mut cur = self.first;
        while cur != NONE {
            let next = self.nexts[cur];
            self.nexts[cur] = self.prevs[cur];
            self.prevs[cur] = next;
            cur = next;
        }
        core::mem::swap(&mut self.first, &mut self.last);
    }

    /// Removes every element for which `pred` returns `true`, returning how
    /// many were removed.
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let mut cur = self.first;
        while cur != NONE {
            let next = self.nexts[cur];
            if self.values[cur].as_ref().is_some_and(&mut pred) {
                self.unlink(cur);
                drop(self.release_slot(cur));
                removed += 1;
            }
            cur = next;
        }
        self.len -= removed;
        removed
    }

    /// Removes every element equal to `target`.
    pub fn remove_match(&mut self, target: &T) -> usize
    where
        T: PartialEq,
    {
        self.remove_if(|v| v == target)
    }

    /// Stable merge sort with the caller's comparator.
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len < 2 {
            return;
        }
        let head = self.merge_sort(self.first, &mut cmp);

        // only `nexts` is maintained while sorting
        let mut prev = NONE;
        let mut cur = head;
        while cur != NONE {
            self.prevs[cur] = prev;
            prev = cur;
            cur = self.nexts[cur];
        }
        self.first = head;
        self.last = prev;
    }

    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    fn merge_sort<F>(&mut self, head: usize, cmp: &mut F) -> usize
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if head == NONE || self.nexts[head] == NONE {
            return head;
        }

        // slow ends on the last node of the left half
        let mut slow = head;
        let mut fast = self.nexts[head];
        while fast != NONE {
            fast = self.nexts[fast];
            if fast != NONE {
                slow = self.nexts[slow];
                fast = self.nexts[fast];
            }
        }
        let right = self.nexts[slow];
        self.nexts[slow] = NONE;

        let left = self.merge_sort(head, cmp);
        let right = self.merge_sort(right, cmp);
        self.merge(left, right, cmp)
    }

    fn merge<F>(&mut self, mut left: usize, mut right: usize, cmp: &mut F) -> usize
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut head = NONE;
        let mut tail = NONE;

        while left != NONE && right != NONE {
            let ordering = match (&self.values[left], &self.values[right]) {
                (Some(l), Some(r)) => cmp(l, r),
                _ => Ordering::Equal,
            };
            // ties take the left run to keep the sort stable
            let node = if ordering != Ordering::Greater {
                let n = left;
                left = self.nexts[n];
                n
            } else {
                let n = right;
                right = self.nexts[n];
                n
            };

            if tail == NONE {
                head = node;
            } else {
                self.nexts[tail] = node;
            }
            tail = node;
        }

        let rest = if left != NONE { left } else { right };
        if tail == NONE {
            head = rest;
        } else {
            self.nexts[tail] = rest;
        }
        head
    }

    /// Front-to-back iterator; `.rev()` walks back-to-front.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.first,
            back: self.last,
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let BidiList {
            values,
            prevs,
            nexts,
            first,
            last,
            len,
            ..
        } = self;
        IterMut {
            values: values.as_mut_ptr(),
            prevs: prevs.as_slice(),
            nexts: nexts.as_slice(),
            front: *first,
            back: *last,
            remaining: *len,
            _marker: PhantomData,
        }
    }

    /// Number of arena slots, live or vacant.
    pub fn slot_count(&self) -> usize {
        self.values.len()
    }
}

impl<T> Default for BidiList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for BidiList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for BidiList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for BidiList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for BidiList<T> {}

impl<T> Extend<T> for BidiList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if self.free_head == NONE {
                self.values.reserve(1);
                self.prevs.reserve(1);
                self.nexts.reserve(1);
            }
            self.link_last(value);
        }
    }
}

impl<T> FromIterator<T> for BidiList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

// ─── Iterators ────────────────────────────────────────────────────────────────

pub struct Iter<'a, T> {
    list: &'a BidiList<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front;
        self.front = self.list.nexts[idx];
        self.remaining -= 1;
        self.list.values[idx].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back;
        self.back = self.list.prevs[idx];
        self.remaining -= 1;
        self.list.values[idx].as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

pub struct IterMut<'a, T> {
    values: *mut Option<T>,
    prevs: &'a [usize],
    nexts: &'a [usize],
    front: usize,
    back: usize,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front;
        self.front = self.nexts[idx];
        self.remaining -= 1;
        // SAFETY: `idx` is a live slot of the exclusively borrowed arena, and
        // the `remaining` count stops the two cursors before they cross, so
        // each slot is handed out at most once.
        unsafe { (*self.values.add(idx)).as_mut() }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back;
        self.back = self.prevs[idx];
        self.remaining -= 1;
        // SAFETY: see `next`.
        unsafe { (*self.values.add(idx)).as_mut() }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owning iterator; drains from either end.
pub struct IntoIter<T> {
    list: BidiList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.remove_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.remove_last()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for BidiList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a BidiList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut BidiList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
