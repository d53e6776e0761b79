//! Growable contiguous array with an explicit, policy-driven capacity.
//!
//! Provides [`ArrayList`]: elements live contiguously in `[0, len)` of a single
//! heap buffer and keep insertion order. Unlike `Vec`, the capacity is a logical
//! quantity owned by the list: it only changes through [`ArrayList::ensure_capacity`]
//! (rounded by the list's [`GrowthPolicy`]) and [`ArrayList::compact`], so callers
//! can reason about exactly when a reallocation happens.
//!
//! [`AnyArray`] is a slice-view trait implemented by `ArrayList`, `Vec` and slices
//! to enable generic comparison helpers.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Deref, DerefMut};
use core::slice;

use crate::error::{CollectionError, Result};
use crate::utils::growth::GrowthPolicy;

/// A trait generalizing any array-like contiguous collection.
pub trait AnyArray<T> {
    fn as_slice(&self) -> &[T];

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T> AnyArray<T> for Vec<T> {
    fn as_slice(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AnyArray<T> for [T] {
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T, const N: usize> AnyArray<T> for [T; N] {
    fn as_slice(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AnyArray<T> for ArrayList<T> {
    fn as_slice(&self) -> &[T] {
        self.as_slice()
    }
}

/// A growable array list.
///
/// # Invariants
/// * `len() <= capacity()` after every call.
/// * No storage is held while `capacity() == 0`.
/// * A failed growth leaves both `len()` and `capacity()` untouched.
///
/// # Iteration
/// [`iter`](ArrayList::iter) visits `[0, len)` in order. The borrow checker rules
/// out mutating the list while an iterator is alive.
pub struct ArrayList<T> {
    capacity: usize,
    policy: GrowthPolicy,
    buf: Vec<T>,
}

impl<T> ArrayList<T> {
    /// Creates an empty list using the default growth policy. Does not allocate.
    pub fn new() -> Self {
        Self::with_growth(GrowthPolicy::default())
    }

    /// Creates an empty list that grows according to `policy`.
    pub fn with_growth(policy: GrowthPolicy) -> Self {
        Self {
            capacity: 0,
            policy,
            buf: Vec::new(),
        }
    }

    /// Creates an empty list able to hold at least `n` elements.
    pub fn with_capacity(n: usize) -> Result<Self> {
        let mut list = Self::new();
        list.ensure_capacity(n)?;
        Ok(list)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn growth_policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Ensures room for at least `n` elements.
    ///
    /// Does nothing when the capacity already suffices; otherwise grows to
    /// `policy.grow(n)`. Never shrinks.
    pub fn ensure_capacity(&mut self, n: usize) -> Result<()> {
        if self.capacity >= n {
            return Ok(());
        }

        let new_cap = self.policy.grow(n).ok_or(CollectionError::CapacityOverflow)?;
        self.buf
            .try_reserve_exact(new_cap - self.buf.len())
            .map_err(|e| CollectionError::alloc(new_cap, e))?;
        log::trace!("array list grown from {} to {} slots", self.capacity, new_cap);
        self.capacity = new_cap;
        Ok(())
    }

    /// Appends an element at the end.
    #[inline]
    pub fn push(&mut self, element: T) -> Result<()> {
        self.ensure_capacity(self.len() + 1)?;
        self.buf.push(element);
        Ok(())
    }

    /// Inserts an element at `index`, shifting the tail towards the end.
    ///
    /// `index == len()` is the same as [`push`](ArrayList::push).
    pub fn insert(&mut self, index: usize, element: T) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(CollectionError::IndexOutOfBounds { index, len });
        }
        if index == len {
            return self.push(element);
        }

        self.ensure_capacity(len + 1)?;
        self.buf.insert(index, element);
        Ok(())
    }

    /// Replaces the element at `index`, returning the old one.
    ///
    /// The element is handed back as `Err` when `index` is out of bounds.
    pub fn set(&mut self, index: usize, element: T) -> core::result::Result<T, T> {
        match self.buf.get_mut(index) {
            Some(slot) => Ok(mem::replace(slot, element)),
            None => Err(element),
        }
    }

    /// Removes the element at `index`, shifting the tail towards the head.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.len() {
            Some(self.buf.remove(index))
        } else {
            None
        }
    }

    pub fn remove_first(&mut self) -> Option<T> {
        self.remove(0)
    }

    pub fn remove_last(&mut self) -> Option<T> {
        self.buf.pop()
    }

    /// Alias of [`remove_last`](ArrayList::remove_last).
    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        self.remove_last()
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buf.get(index)
    }

    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.buf.get_mut(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.buf.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.buf.last()
    }

    /// Reverses the list in place, swapping from both ends toward the middle.
    pub fn reverse(&mut self) {
        let len = self.len();
        for i in 0..len / 2 {
            self.buf.swap(i, len - i - 1);
        }
    }

    /// Sets the length to zero. The capacity is kept; call
    /// [`compact`](ArrayList::compact) afterwards to release it.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Releases unused capacity so that `capacity() == len()`.
    ///
    /// An empty list drops its buffer entirely.
    pub fn compact(&mut self) {
        let len = self.len();
        if self.capacity == len {
            return;
        }

        if len == 0 {
            self.buf = Vec::new();
        } else {
            self.buf.shrink_to_fit();
        }
        log::trace!("array list compacted from {} to {} slots", self.capacity, len);
        self.capacity = len;
    }

    /// Keeps only the elements for which `f` returns `true`, preserving order.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.buf.retain(f);
    }

    /// Compacts the list and hands its buffer over as a `Vec`.
    pub fn into_vec(mut self) -> Vec<T> {
        self.compact();
        mem::take(&mut self.buf)
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        self.buf.as_slice()
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buf.as_mut_slice()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.buf.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.buf.iter_mut()
    }

    /// Grows for `n` elements without reporting allocation failure, the way
    /// `Vec::extend` does. Used by the `Extend`/`FromIterator` impls only.
    fn grow_infallible(&mut self, n: usize) {
        if self.capacity >= n {
            return;
        }
        let new_cap = self.policy.grow(n).unwrap_or(n);
        self.buf.reserve_exact(new_cap - self.buf.len());
        self.capacity = new_cap;
    }
}

impl<T: Clone> ArrayList<T> {
    pub fn extend_from_slice(&mut self, other: &[T]) -> Result<()> {
        self.ensure_capacity(self.len() + other.len())?;
        self.buf.extend_from_slice(other);
        Ok(())
    }

    pub fn extend_from_any<A: AnyArray<T> + ?Sized>(&mut self, other: &A) -> Result<()> {
        self.extend_from_slice(other.as_slice())
    }
}

impl<T> ArrayList<T> {
    pub fn eq_any<A: AnyArray<T> + ?Sized>(&self, other: &A) -> bool
    where
        T: PartialEq,
    {
        self.as_slice() == other.as_slice()
    }

    pub fn cmp_any<A: AnyArray<T> + ?Sized>(&self, other: &A) -> Ordering
    where
        T: Ord,
    {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T> Deref for ArrayList<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for ArrayList<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ArrayList<T> {
    fn clone(&self) -> Self {
        let mut buf = Vec::with_capacity(self.capacity);
        buf.extend_from_slice(&self.buf);
        Self {
            capacity: self.capacity,
            policy: self.policy,
            buf,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: PartialEq> PartialEq for ArrayList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<T: Eq> Eq for ArrayList<T> {}

impl<T: PartialOrd> PartialOrd for ArrayList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for ArrayList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for ArrayList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> Extend<T> for ArrayList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.grow_infallible(self.len() + 1);
            self.buf.push(item);
        }
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = ArrayList::new();
        list.extend(iter);
        list
    }
}

impl<T> IntoIterator for ArrayList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> AsRef<[T]> for ArrayList<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> core::ops::Index<usize> for ArrayList<T> {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.buf[index]
    }
}

impl<T> core::ops::IndexMut<usize> for ArrayList<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.buf[index]
    }
}
