#![cfg(feature = "bitvec")]
//! Resizable bit array packed into 32-bit words.
//!
//! [`BitArray`] stores its bits in a `bitvec::BitVec<u32, Lsb0>`. Single-bit
//! accessors are bounds-checked against the logical length, never the word
//! capacity: reads past the end return `false` and writes past the end are
//! ignored. The boolean algebra (`and`, `or`, `xor`, `invert`) works word by word
//! on the raw storage.
//!
//! # Dead bits
//! The unused high bits of the last word are kept at zero at all times, so word
//! operations against a longer operand can never surface "phantom" set bits.

use bitvec::prelude::{BitVec, Lsb0};
use core::fmt;
use core::ops::{BitAnd, BitOr, BitXor, Not};

const WORD_BITS: usize = u32::BITS as usize;

/// A trait for uniform inspection of bit arrays.
pub trait AnyBitArray {
    /// Returns the number of bits.
    fn len(&self) -> usize;

    /// Returns `true` if there are no bits.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bit at `index`, or `None` if out of bounds.
    fn get(&self, index: usize) -> Option<bool>;
}

impl AnyBitArray for BitVec<u32, Lsb0> {
    fn len(&self) -> usize {
        self.as_bitslice().len()
    }
    fn get(&self, index: usize) -> Option<bool> {
        self.as_bitslice().get(index).map(|b| *b)
    }
}

impl AnyBitArray for BitArray {
    fn len(&self) -> usize {
        self.len()
    }
    fn get(&self, index: usize) -> Option<bool> {
        (index < self.len()).then(|| self.get(index))
    }
}

/// A fixed-length (but explicitly resizable) vector of bits.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BitArray {
    bits: BitVec<u32, Lsb0>,
}

#[inline(always)]
fn word_len(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

impl BitArray {
    /// Creates an array of `bits` cleared bits.
    pub fn new(bits: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, bits),
        }
    }

    /// Number of addressable bits.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of 32-bit words backing the array.
    pub fn word_len(&self) -> usize {
        word_len(self.len())
    }

    /// Returns the bit at `index`; `false` when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.bits.as_bitslice().get(index).is_some_and(|b| *b)
    }

    /// Sets the bit at `index`. Out-of-range indices are ignored.
    #[inline]
    pub fn set(&mut self, index: usize) {
        if index < self.len() {
            self.bits.set(index, true);
        }
    }

    /// Clears the bit at `index`. Out-of-range indices are ignored.
    #[inline]
    pub fn unset(&mut self, index: usize) {
        if index < self.len() {
            self.bits.set(index, false);
        }
    }

    /// Flips the bit at `index`. Out-of-range indices are ignored.
    #[inline]
    pub fn toggle(&mut self, index: usize) {
        if index < self.len() {
            let current = self.bits[index];
            self.bits.set(index, !current);
        }
    }

    /// Clears every bit without changing the length.
    pub fn clear(&mut self) {
        self.bits.as_raw_mut_slice().fill(0);
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Changes the number of addressable bits.
    ///
    /// Shrinking clears the dropped bits (they read as zero if the array grows
    /// again); growing zero-fills the new bits.
    pub fn resize(&mut self, new_bits: usize) {
        let old_bits = self.len();
        if old_bits == new_bits {
            return;
        }

        if new_bits < old_bits {
            self.bits[new_bits..].fill(false);
            self.bits.truncate(new_bits);
        } else {
            self.bits.resize(new_bits, false);
        }
        log::trace!("bit array resized from {old_bits} to {new_bits} bits");
    }

    /// Best-effort release of words no longer needed by the current length.
    pub fn compact(&mut self) {
        self.bits.shrink_to_fit();
    }

    /// Iterates over every bit in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Raw words, least significant bit first.
    pub fn as_words(&self) -> &[u32] {
        self.bits.as_raw_slice()
    }

    /// In-place AND. Words past the end of a shorter `rhs` are zeroed.
    pub fn and(&mut self, rhs: &BitArray) {
        let rhs_words = rhs.as_words();
        let lhs_words = self.bits.as_raw_mut_slice();
        let common = lhs_words.len().min(rhs_words.len());

        for (l, r) in lhs_words.iter_mut().zip(rhs_words) {
            *l &= *r;
        }
        lhs_words[common..].fill(0);
        self.clear_dead_bits();
    }

    /// In-place OR over the words both operands share.
    pub fn or(&mut self, rhs: &BitArray) {
        for (l, r) in self.bits.as_raw_mut_slice().iter_mut().zip(rhs.as_words()) {
            *l |= *r;
        }
        self.clear_dead_bits();
    }

    /// In-place XOR over the words both operands share.
    pub fn xor(&mut self, rhs: &BitArray) {
        for (l, r) in self.bits.as_raw_mut_slice().iter_mut().zip(rhs.as_words()) {
            *l ^= *r;
        }
        self.clear_dead_bits();
    }

    /// In-place NOT of every addressable bit. `!&array` is the copying form.
    pub fn invert(&mut self) {
        for word in self.bits.as_raw_mut_slice() {
            *word = !*word;
        }
        self.clear_dead_bits();
    }

    /// Masks off the bits of the last word that lie past `len()`.
    fn clear_dead_bits(&mut self) {
        let live = self.len() % WORD_BITS;
        if live == 0 {
            return;
        }
        if let Some(last) = self.bits.as_raw_mut_slice().last_mut() {
            *last &= u32::MAX >> (WORD_BITS - live);
        }
    }
}

impl fmt::Debug for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BitArray[")?;
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str("]")
    }
}

impl FromIterator<bool> for BitArray {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits: BitVec<u32, Lsb0> = BitVec::new();
        bits.extend(iter);
        Self { bits }
    }
}

impl BitAnd for &BitArray {
    type Output = BitArray;
    fn bitand(self, rhs: &BitArray) -> BitArray {
        let mut out = self.clone();
        out.and(rhs);
        out
    }
}

impl BitOr for &BitArray {
    type Output = BitArray;
    fn bitor(self, rhs: &BitArray) -> BitArray {
        let mut out = self.clone();
        out.or(rhs);
        out
    }
}

impl BitXor for &BitArray {
    type Output = BitArray;
    fn bitxor(self, rhs: &BitArray) -> BitArray {
        let mut out = self.clone();
        out.xor(rhs);
        out
    }
}

impl Not for &BitArray {
    type Output = BitArray;
    fn not(self) -> BitArray {
        let mut out = self.clone();
        out.invert();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_str(bits: &str) -> BitArray {
        bits.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_bit_array_set_unset_toggle() {
        let mut arr = BitArray::new(40);
        assert_eq!(arr.len(), 40);
        assert_eq!(arr.word_len(), 2);
        arr.set(3);
        arr.set(35);
        arr.toggle(4);
        assert!(arr.get(3) && arr.get(4) && arr.get(35));
        arr.unset(3);
        arr.toggle(4);
        assert!(!arr.get(3) && !arr.get(4));
        assert_eq!(arr.count_ones(), 1);
    }

    #[test]
    fn test_bit_array_out_of_range_is_ignored() {
        let mut arr = BitArray::new(3);
        arr.set(3);
        arr.toggle(31);
        assert!(!arr.get(3));
        assert_eq!(arr.as_words(), &[0]);
        assert!(!BitArray::new(0).get(0));
    }

    #[test]
    fn test_bit_array_not_masks_trailing_bits() {
        let mut arr = BitArray::new(3);
        arr.invert();
        assert_eq!(arr.as_words(), &[0b111]);
        assert_eq!(arr.count_ones(), 3);

        let mut aligned = BitArray::new(32);
        aligned.invert();
        assert_eq!(aligned.as_words(), &[u32::MAX]);
    }

    #[test]
    fn test_bit_array_and_zero_fills_past_shorter() {
        let mut lhs = BitArray::new(64);
        lhs.invert();
        let mut rhs = BitArray::new(8);
        rhs.set(0);
        rhs.set(7);
        lhs.and(&rhs);
        assert_eq!(lhs.as_words(), &[0b1000_0001, 0]);
        assert_eq!(lhs.len(), 64);
    }

    #[test]
    fn test_bit_array_or_xor_common_prefix() {
        let a = from_str("1100");
        let b = from_str("1010");
        assert_eq!((&a | &b).iter().collect::<Vec<_>>(), [true, true, true, false]);
        assert_eq!((&a ^ &b).iter().collect::<Vec<_>>(), [false, true, true, false]);
        assert_eq!((&a & &b).iter().collect::<Vec<_>>(), [true, false, false, false]);
        assert_eq!((!&a).iter().collect::<Vec<_>>(), [false, false, true, true]);
    }

    #[test]
    fn test_bit_array_not_operator_copies() {
        let a = from_str("101");
        let b = !&a;
        assert_eq!(format!("{b:?}"), "BitArray[010]");
        assert_eq!(format!("{a:?}"), "BitArray[101]");

        let mut c = a.clone();
        c.invert();
        assert_eq!(c, b);
        c.invert();
        assert_eq!(c, a);
    }

    #[test]
    fn test_bit_array_get_reads_addressable_bits_only() {
        let mut arr = BitArray::new(33);
        arr.set(32);
        assert!(arr.get(32));
        assert!(!arr.get(31));
        assert!(!arr.get(33));
        assert_eq!(AnyBitArray::get(&arr, 32), Some(true));
        assert_eq!(AnyBitArray::get(&arr, 33), None);
    }

    #[test]
    fn test_bit_array_or_with_longer_rhs_keeps_no_phantoms() {
        let mut short = BitArray::new(4);
        let mut long = BitArray::new(40);
        long.invert();
        short.or(&long);
        assert_eq!(short.as_words(), &[0b1111]);
        short.resize(40);
        assert_eq!(short.count_ones(), 4);
    }

    #[test]
    fn test_bit_array_resize_clears_dropped_bits() {
        let mut arr = BitArray::new(10);
        arr.set(8);
        arr.set(2);
        arr.resize(5);
        assert_eq!(arr.len(), 5);
        arr.resize(10);
        assert!(arr.get(2));
        assert!(!arr.get(8));
        arr.compact();
        assert_eq!(arr.count_ones(), 1);
    }

    #[test]
    fn test_bit_array_clear_keeps_length() {
        let mut arr = from_str("10111");
        arr.clear();
        assert_eq!(arr.len(), 5);
        assert_eq!(arr.count_ones(), 0);
        assert_eq!(format!("{arr:?}"), "BitArray[00000]");
    }

    #[test]
    fn test_bit_array_any_bit_array_interop() {
        let arr = from_str("101");
        let mut bv: BitVec<u32, Lsb0> = BitVec::new();
        bv.extend([true, false, true]);
        fn snapshot<B: AnyBitArray>(b: &B) -> Vec<Option<bool>> {
            (0..4).map(|i| b.get(i)).collect()
        }
        assert_eq!(snapshot(&arr), snapshot(&bv));
    }
}
