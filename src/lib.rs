//! # Basic Collections
//!
//! Plain, explicit container types whose behaviour is driven by callbacks the
//! caller supplies: hash and equality functions for the hash map, comparators
//! for the search trees and sorts.
//!
//! ## Containers
//!
//! * **Arrays:** [`ArrayList`] (policy-driven growth), [`RingBuffer`] (bounded
//!   FIFO), [`BitArray`] (packed `u32` words, `bitvec` feature) and
//!   [`StringBuffer`] (NUL-terminated byte string).
//! * **Lists:** [`ForwardList`] (singly linked) and [`BidiList`] (doubly linked,
//!   index-linked nodes with slot reuse).
//! * **Maps:** [`HashMap`] (open addressing, linear probing, back-shift
//!   deletion), [`TreeMap`] and [`TreeMultimap`].
//! * **Sets:** [`TreeSet`] and [`TreeMultiset`].
//! * **Sorting:** the [`heap`] module sorts caller-owned slices in place.
//!
//! The trees are unbalanced binary search trees. Sorted insertion degrades them
//! to a chain, but every walk (lookup, removal, iteration, teardown) is
//! iterative, so a degenerate tree costs time and never stack depth.
//!
//! ## Growth and Errors
//!
//! Containers that own a contiguous buffer take a [`GrowthPolicy`] and report
//! allocation failure as [`CollectionError`] instead of aborting. A failed
//! operation leaves the container as it was.
//!
//! ## Interoperability
//!
//! [`AnyArray`], [`AnyQueue`], [`AnyList`] and [`AnyTree`] are object-safe
//! traits implemented both by the crate's containers and, where one exists, by
//! the matching `std` type, so code can be written once against either.
//!
//! ## Examples
//!
//! ### HashMap
//!
//! ```rust
//! use basic_collections::HashMap;
//!
//! fn hash(key: &&str) -> u64 {
//!     key.bytes()
//!         .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| (h ^ u64::from(b)).wrapping_mul(0x100_0000_01b3))
//! }
//!
//! let mut map = HashMap::new(hash, |a: &&str, b: &&str| a == b);
//! map.put("A", 1).unwrap();
//! map.put("B", 2).unwrap();
//! map.put("C", 3).unwrap();
//!
//! assert_eq!(map.len(), 3);
//! assert_eq!(map.get(&"B"), Some(&2));
//! ```
//!
//! ### TreeMultimap
//!
//! ```rust
//! use basic_collections::TreeMultimap;
//!
//! let mut index = TreeMultimap::new(|a: &&str, b: &&str| a.cmp(b));
//! index.put("rust", 1).unwrap();
//! index.put("rust", 4).unwrap();
//! index.put("c", 2).unwrap();
//!
//! assert_eq!(index.len(), 3);
//! assert_eq!(index.get(&"rust"), Some(&[1, 4][..]));
//! ```
//!
//! ### BidiList
//!
//! ```rust
//! use basic_collections::BidiList;
//!
//! let mut list = BidiList::new();
//! list.add_last("World").unwrap();
//! list.add_first("Hello").unwrap();
//! list.reverse();
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["World", "Hello"]);
//! ```

// --- Module Declarations ---

pub mod error;
pub mod heap;
pub mod lists;
pub mod maps;
pub mod sets;
pub mod trees;
pub mod utils;
pub mod vecs;

// --- Re-exports ---

pub use error::{CollectionError, Result};
pub use lists::bidi_list::{AnyList, BidiList};
pub use lists::forward_list::ForwardList;
pub use maps::hash_map::HashMap;
pub use maps::tree_map::TreeMap;
pub use maps::tree_multimap::TreeMultimap;
pub use sets::tree_multiset::TreeMultiset;
pub use sets::tree_set::TreeSet;
pub use trees::AnyTree;
pub use utils::growth::GrowthPolicy;
pub use vecs::array_list::{AnyArray, ArrayList};
#[cfg(feature = "bitvec")]
pub use vecs::bit_array::{AnyBitArray, BitArray};
pub use vecs::ring_buffer::{AnyQueue, RingBuffer};
pub use vecs::string_buffer::StringBuffer;
