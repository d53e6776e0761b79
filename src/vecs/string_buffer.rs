//! Growable byte string that is always followed by a NUL terminator.
//!
//! [`StringBuffer`] keeps its content and a trailing `0` byte in one heap
//! buffer, so [`as_bytes_with_nul`](StringBuffer::as_bytes_with_nul) and
//! [`as_c_str`](StringBuffer::as_c_str) hand out a C-compatible view without
//! copying. Capacities count content bytes; the terminator slot is reserved on
//! top of them by the growth request.

use core::fmt;
use core::mem;
use core::ops::Deref;
use std::borrow::Cow;
use std::ffi::CStr;

use crate::error::{CollectionError, Result};
use crate::utils::growth::GrowthPolicy;

const EMPTY_WITH_NUL: &[u8] = b"\0";

/// A byte string buffer with amortised growth and a maintained terminator.
///
/// # Invariants
/// * Once allocated, `buf` holds the content followed by exactly one `0`.
/// * `len() <= capacity()`.
pub struct StringBuffer {
    buf: Vec<u8>,
    // allocated bytes including the terminator slot, 0 when unallocated
    allocated: usize,
    policy: GrowthPolicy,
}

impl StringBuffer {
    /// Creates an empty, unallocated buffer.
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            allocated: 0,
            policy: GrowthPolicy::default(),
        }
    }

    pub fn with_growth(policy: GrowthPolicy) -> Self {
        Self {
            policy,
            ..Self::new()
        }
    }

    /// Number of content bytes, terminator excluded.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len().saturating_sub(1)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Content bytes that fit before the next growth.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.allocated.saturating_sub(1)
    }

    /// Ensures room for `n` content bytes plus the terminator.
    ///
    /// With the default policy the buffer grows to `((n + 1) / 16 + 1) * 16`
    /// bytes in total.
    pub fn ensure_capacity(&mut self, n: usize) -> Result<()> {
        let needed = n.checked_add(1).ok_or(CollectionError::CapacityOverflow)?;
        if self.allocated >= needed {
            return Ok(());
        }

        let new_alloc = self
            .policy
            .grow(needed)
            .ok_or(CollectionError::CapacityOverflow)?;
        self.buf
            .try_reserve_exact(new_alloc - self.buf.len())
            .map_err(|e| CollectionError::alloc(new_alloc, e))?;
        log::trace!(
            "string buffer grown from {} to {} bytes",
            self.allocated,
            new_alloc
        );
        self.allocated = new_alloc;
        Ok(())
    }

    /// Appends one byte.
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.push_bytes(&[byte])
    }

    /// Appends a UTF-8 string.
    pub fn push_str(&mut self, s: &str) -> Result<()> {
        self.push_bytes(s.as_bytes())
    }

    /// Appends raw bytes, moving the terminator past them.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        let new_len = self
            .len()
            .checked_add(bytes.len())
            .ok_or(CollectionError::CapacityOverflow)?;
        self.ensure_capacity(new_len)?;

        // drop the old terminator, append, re-terminate
        self.buf.pop();
        self.buf.extend_from_slice(bytes);
        self.buf.push(0);
        Ok(())
    }

    /// Empties the content. The allocation is kept.
    pub fn clear(&mut self) {
        if !self.buf.is_empty() {
            self.buf.clear();
            self.buf.push(0);
        }
    }

    /// Shrinks the allocation to the content plus terminator, or frees it when
    /// the buffer is empty.
    pub fn compact(&mut self) {
        let target = if self.is_empty() { 0 } else { self.buf.len() };
        if self.allocated == target {
            return;
        }

        if target == 0 {
            self.buf = Vec::new();
        } else {
            self.buf.shrink_to_fit();
        }
        log::trace!(
            "string buffer compacted from {} to {} bytes",
            self.allocated,
            target
        );
        self.allocated = target;
    }

    /// Content bytes without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        match self.buf.split_last() {
            Some((_, content)) => content,
            None => &[],
        }
    }

    /// Content bytes followed by the terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        if self.buf.is_empty() {
            EMPTY_WITH_NUL
        } else {
            &self.buf
        }
    }

    /// Borrows the buffer as a C string, or `None` when the content holds an
    /// interior `0` byte.
    pub fn as_c_str(&self) -> Option<&CStr> {
        CStr::from_bytes_with_nul(self.as_bytes_with_nul()).ok()
    }

    /// Lossy UTF-8 view of the content.
    pub fn to_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Copies the content out, without the terminator.
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Hands the storage over, terminator included, compacted first.
    pub fn into_bytes_with_nul(mut self) -> Vec<u8> {
        if self.buf.is_empty() {
            return EMPTY_WITH_NUL.to_vec();
        }
        self.compact();
        mem::take(&mut self.buf)
    }
}

impl Default for StringBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for StringBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Clone for StringBuffer {
    /// The clone is compact: its capacity equals the source's length.
    fn clone(&self) -> Self {
        let buf = self.buf.clone();
        Self {
            allocated: buf.len(),
            buf,
            policy: self.policy,
        }
    }
}

impl PartialEq for StringBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for StringBuffer {}

impl PartialEq<str> for StringBuffer {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for StringBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl core::hash::Hash for StringBuffer {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for StringBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.to_str(), f)
    }
}

impl fmt::Display for StringBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str())
    }
}

impl fmt::Write for StringBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s).map_err(|_| fmt::Error)
    }
}

impl TryFrom<&str> for StringBuffer {
    type Error = CollectionError;

    fn try_from(s: &str) -> Result<Self> {
        let mut out = Self::new();
        out.push_str(s)?;
        Ok(out)
    }
}
