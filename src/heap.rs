//! In-place binary max-heap construction and heap sort.
//!
//! All functions work on caller-owned slices and never allocate. Elements are
//! moved with `swap`, so nothing needs `Copy` or `Clone`.
//!
//! ```rust
//! use basic_collections::heap;
//!
//! let mut scores = [42, 7, 19, 88, 3];
//! heap::heapsort(&mut scores);
//! assert_eq!(scores, [3, 7, 19, 42, 88]);
//! ```

use core::cmp::Ordering;

#[inline(always)]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

/// Moves the element at `i` up until its parent is not less than it.
fn sift_up<T, F>(v: &mut [T], mut i: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    while i > 0 {
        let p = parent(i);
        if cmp(&v[p], &v[i]) != Ordering::Less {
            break;
        }
        v.swap(p, i);
        i = p;
    }
}

/// Moves the element at `i` down within `v[..end]` until both children are
/// not greater than it.
fn sift_down<T, F>(v: &mut [T], mut i: usize, end: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        let left = 2 * i + 1;
        if left >= end {
            return;
        }
        let right = left + 1;
        let mut child = left;
        if right < end && cmp(&v[left], &v[right]) == Ordering::Less {
            child = right;
        }
        if cmp(&v[i], &v[child]) != Ordering::Less {
            return;
        }
        v.swap(i, child);
        i = child;
    }
}

/// Rearranges `v` into a max-heap under `cmp`.
///
/// Each element is sifted up towards the root in index order, so after the
/// call `v[0]` is a greatest element.
pub fn make_max_heap_by<T, F>(v: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..v.len() {
        sift_up(v, i, &mut cmp);
    }
}

pub fn make_max_heap<T: Ord>(v: &mut [T]) {
    make_max_heap_by(v, T::cmp);
}

/// Sorts `v` ascending under `cmp`. Not stable.
///
/// O(n log n) comparisons and swaps, no extra memory.
pub fn heapsort_by<T, F>(v: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    make_max_heap_by(v, &mut cmp);
    for end in (1..v.len()).rev() {
        v.swap(0, end);
        sift_down(v, 0, end, &mut cmp);
    }
}

pub fn heapsort<T: Ord>(v: &mut [T]) {
    heapsort_by(v, T::cmp);
}

/// Returns `true` if no element of `v` is greater than its parent.
pub fn is_max_heap_by<T, F>(v: &[T], mut cmp: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    (1..v.len()).all(|i| cmp(&v[parent(i)], &v[i]) != Ordering::Less)
}
