//! Bounded FIFO queue over one fixed circular buffer.
//!
//! [`RingBuffer`] never reallocates after construction. It keeps a `low` (read)
//! and `high` (write) cursor over `capacity + 1` slots: `low == high` means
//! empty, and an [`offer`](RingBuffer::offer) is rejected when advancing `high`
//! would land on `low`. The spare slot is what lets "full" and "empty" be told
//! apart without a separate counter.
//!
//! [`AnyQueue`] is the object-safe FIFO abstraction implemented by both
//! `RingBuffer` and `VecDeque`.

use core::fmt;
use std::collections::VecDeque;

use crate::error::{CollectionError, Result};

// ─── AnyQueue ─────────────────────────────────────────────────────────────────

/// An object-safe abstraction over FIFO queues.
pub trait AnyQueue<T> {
    /// Returns the number of queued elements.
    fn len(&self) -> usize;
    /// Returns `true` if nothing is queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Enqueues at the back, handing the element back if the queue is full.
    fn offer(&mut self, item: T) -> core::result::Result<(), T>;
    /// Dequeues from the front.
    fn poll(&mut self) -> Option<T>;
    /// Returns the front element without removing it.
    fn peek(&self) -> Option<&T>;
    /// Removes every element.
    fn clear(&mut self);
}

impl<T> AnyQueue<T> for VecDeque<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn offer(&mut self, item: T) -> core::result::Result<(), T> {
        self.push_back(item);
        Ok(())
    }
    fn poll(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn peek(&self) -> Option<&T> {
        self.front()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<T> AnyQueue<T> for RingBuffer<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn offer(&mut self, item: T) -> core::result::Result<(), T> {
        self.offer(item)
    }
    fn poll(&mut self) -> Option<T> {
        self.poll()
    }
    fn peek(&self) -> Option<&T> {
        self.peek()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

/// A fixed-capacity FIFO ring buffer.
///
/// # Layout
/// `slots` holds `capacity + 1` entries. Live elements occupy the slots from
/// `low` (inclusive) walking forward with wrap-around up to `high` (exclusive).
pub struct RingBuffer<T> {
    slots: Box<[Option<T>]>,
    low: usize,
    high: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a ring buffer able to hold `capacity` elements.
    ///
    /// Fails with [`CollectionError::ZeroCapacity`] when `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CollectionError::ZeroCapacity);
        }
        let slot_count = capacity
            .checked_add(1)
            .ok_or(CollectionError::CapacityOverflow)?;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(slot_count)
            .map_err(|e| CollectionError::alloc(slot_count, e))?;
        slots.resize_with(slot_count, || None);

        Ok(Self {
            slots: slots.into_boxed_slice(),
            low: 0,
            high: 0,
        })
    }

    /// Maximum number of elements the buffer can hold.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    /// Number of queued elements, from the cursor difference.
    pub fn len(&self) -> usize {
        if self.low <= self.high {
            self.high - self.low
        } else {
            // high has wrapped: count [low, end) then [start, high)
            (self.slots.len() - self.low) + self.high
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.low == self.high
    }

    pub fn is_full(&self) -> bool {
        self.advance(self.high) == self.low
    }

    #[inline(always)]
    fn advance(&self, cursor: usize) -> usize {
        let next = cursor + 1;
        if next >= self.slots.len() { 0 } else { next }
    }

    /// Enqueues `item`, or returns it when the buffer is full.
    pub fn offer(&mut self, item: T) -> core::result::Result<(), T> {
        let next = self.advance(self.high);
        if next == self.low {
            return Err(item);
        }

        self.slots[self.high] = Some(item);
        self.high = next;
        Ok(())
    }

    /// Dequeues the oldest element.
    pub fn poll(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let item = self.slots[self.low].take();
        self.low = self.advance(self.low);
        item
    }

    /// Returns the oldest element without dequeuing it.
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            self.slots[self.low].as_ref()
        }
    }

    /// Drops every queued element and resets both cursors.
    pub fn clear(&mut self) {
        while self.poll().is_some() {}
        self.low = 0;
        self.high = 0;
    }

    /// Iterates from the oldest to the newest element.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            cursor: self.low,
            remaining: self.len(),
        }
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            low: self.low,
            high: self.high,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing FIFO iterator over a [`RingBuffer`].
pub struct Iter<'a, T> {
    ring: &'a RingBuffer<T>,
    cursor: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.ring.slots[self.cursor].as_ref();
        self.cursor = self.ring.advance(self.cursor);
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_fifo_round_trip() {
        let mut ring: RingBuffer<i32> = RingBuffer::with_capacity(8).unwrap();
        for i in 0..8 {
            ring.offer(i).unwrap();
        }
        assert!(ring.is_full());
        let drained: Vec<i32> = core::iter::from_fn(|| ring.poll()).collect();
        assert_eq!(drained, (0..8).collect::<Vec<_>>());
        assert!(ring.is_empty());
    }

    #[test]
    fn test_ring_buffer_offer_rejects_when_full() {
        let mut ring: RingBuffer<&str> = RingBuffer::with_capacity(2).unwrap();
        assert_eq!(ring.offer("a"), Ok(()));
        assert_eq!(ring.offer("b"), Ok(()));
        assert_eq!(ring.offer("c"), Err("c"));
        assert_eq!(ring.len(), 2);
        assert_eq!(ring.capacity(), 2);
    }

    #[test]
    fn test_ring_buffer_wraparound_len_and_order() {
        let mut ring: RingBuffer<i32> = RingBuffer::with_capacity(3).unwrap();
        ring.offer(1).unwrap();
        ring.offer(2).unwrap();
        ring.offer(3).unwrap();
        assert_eq!(ring.poll(), Some(1));
        assert_eq!(ring.poll(), Some(2));
        ring.offer(4).unwrap();
        ring.offer(5).unwrap();
        // high has wrapped behind low
        assert!(ring.high < ring.low);
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(ring.peek(), Some(&3));
    }

    #[test]
    fn test_ring_buffer_empty_boundaries() {
        let mut ring: RingBuffer<i32> = RingBuffer::with_capacity(1).unwrap();
        assert_eq!(ring.poll(), None);
        assert_eq!(ring.peek(), None);
        assert_eq!(ring.iter().count(), 0);
        ring.offer(9).unwrap();
        assert_eq!(ring.poll(), Some(9));
    }

    #[test]
    fn test_ring_buffer_zero_capacity_rejected() {
        assert_eq!(
            RingBuffer::<u8>::with_capacity(0).unwrap_err(),
            CollectionError::ZeroCapacity
        );
    }

    #[test]
    fn test_ring_buffer_clear_resets() {
        let mut ring: RingBuffer<String> = RingBuffer::with_capacity(4).unwrap();
        ring.offer("x".to_string()).unwrap();
        ring.offer("y".to_string()).unwrap();
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        for s in ["a", "b", "c", "d"] {
            ring.offer(s.to_string()).unwrap();
        }
        assert!(ring.is_full());
    }

    #[test]
    fn test_ring_buffer_any_queue_interop() {
        fn fill<Q: AnyQueue<i32>>(q: &mut Q) -> usize {
            let mut accepted = 0;
            for i in 0..4 {
                if q.offer(i).is_ok() {
                    accepted += 1;
                }
            }
            accepted
        }
        let mut ring: RingBuffer<i32> = RingBuffer::with_capacity(3).unwrap();
        let mut deque: VecDeque<i32> = VecDeque::new();
        assert_eq!(fill(&mut ring), 3);
        assert_eq!(fill(&mut deque), 4);
        assert_eq!(AnyQueue::peek(&ring), AnyQueue::peek(&deque));
    }
}
