//! Amortised growth strategies for the growable containers.
//!
//! Every buffer that grows on demand ([`ArrayList`](crate::ArrayList),
//! [`StringBuffer`](crate::StringBuffer), [`HashMap`](crate::HashMap) and the
//! value arrays of [`TreeMultimap`](crate::TreeMultimap)) asks its policy for a
//! new capacity whenever a request `n` exceeds the current one. The policy is
//! fixed at construction time.

use core::fmt;
use core::num::NonZeroUsize;

/// Computes the capacity a buffer should grow to when it must hold `n` slots.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Round up past `n` to the next multiple of the block: `((n / b) + 1) * b`.
    ///
    /// Note that an exact multiple still grows by a whole block, so a request
    /// for 16 slots with a block of 16 yields 32.
    Blocks(NonZeroUsize),
    /// Allocate exactly what was asked for.
    Exact,
    /// Caller-provided rule. Results below `n` are raised to `n`.
    Custom(fn(usize) -> usize),
}

impl GrowthPolicy {
    /// Block size used by [`GrowthPolicy::default`].
    pub const DEFAULT_BLOCK: usize = 16;

    /// Shorthand for `GrowthPolicy::Blocks`. A zero block falls back to `Exact`.
    pub fn blocks(block: usize) -> Self {
        match NonZeroUsize::new(block) {
            Some(block) => GrowthPolicy::Blocks(block),
            None => GrowthPolicy::Exact,
        }
    }

    /// Returns the capacity to allocate for at least `n` slots, or `None` if the
    /// computation overflows.
    pub fn grow(&self, n: usize) -> Option<usize> {
        match *self {
            GrowthPolicy::Blocks(block) => {
                let block = block.get();
                (n / block).checked_add(1)?.checked_mul(block)
            }
            GrowthPolicy::Exact => Some(n),
            GrowthPolicy::Custom(f) => Some(f(n).max(n)),
        }
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        GrowthPolicy::blocks(Self::DEFAULT_BLOCK)
    }
}

impl fmt::Debug for GrowthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthPolicy::Blocks(block) => f.debug_tuple("Blocks").field(block).finish(),
            GrowthPolicy::Exact => f.write_str("Exact"),
            GrowthPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
