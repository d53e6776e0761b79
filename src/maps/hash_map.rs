//! Open-addressing hash map with caller-supplied hashing and key equality.
//!
//! # Overview
//! [`HashMap`] keeps one table of `capacity` slots. A key's probe sequence
//! starts at `hash % capacity` and walks forward one slot at a time, wrapping
//! around (linear probing). Each occupied slot remembers the hash computed when
//! its key went in, so growth re-lays the table out without calling the hasher
//! again. Only [`rehash`](HashMap::rehash) recomputes hashes.
//!
//! # Deletion
//! Removal uses **back-shift deletion**: after a slot is emptied, later
//! entries of the same probe run are moved back into the hole whenever their
//! home slot does not lie cyclically between the hole and their current
//! position. No tombstones exist, so every lookup stops at the first empty slot
//! and still finds every present key.
//!
//! Neither the key nor the value type needs `Hash` or `Eq`: the map only ever
//! consults the two functions given at construction. Equal keys must hash
//! equally.

use core::fmt;
use core::mem;

use crate::error::{CollectionError, Result};
use crate::utils::growth::GrowthPolicy;

struct Bucket<K, V> {
    hash: u64,
    key: K,
    value: V,
}

/// An open-addressing hash map.
///
/// # Invariants
/// * `len` equals the number of occupied slots and `len <= capacity()`.
/// * An occupied slot's `hash` equals `hasher(key)` as of the last insert or
///   rehash.
/// * For every stored key, its probe sequence from `hash % capacity` reaches
///   its slot without crossing an empty slot.
pub struct HashMap<K, V, H, E> {
    slots: Vec<Option<Bucket<K, V>>>,
    len: usize,
    hasher: H,
    key_eq: E,
    policy: GrowthPolicy,
}

#[inline(always)]
fn home_slot(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

/// Allocates `capacity` empty slots, reporting allocation failure.
fn empty_table<K, V>(capacity: usize) -> Result<Vec<Option<Bucket<K, V>>>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|e| CollectionError::alloc(capacity, e))?;
    slots.resize_with(capacity, || None);
    Ok(slots)
}

/// Places `bucket` in the first empty slot of its probe run.
///
/// The caller guarantees at least one slot is empty.
fn place<K, V>(slots: &mut [Option<Bucket<K, V>>], bucket: Bucket<K, V>) {
    let capacity = slots.len();
    let home = home_slot(bucket.hash, capacity);
    for attempt in 0..capacity {
        let i = (home + attempt) % capacity;
        if slots[i].is_none() {
            slots[i] = Some(bucket);
            return;
        }
    }
}

impl<K, V, H, E> HashMap<K, V, H, E>
where
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    /// Creates an empty map. Nothing is allocated until the first insert.
    pub fn new(hasher: H, key_eq: E) -> Self {
        Self::with_growth(hasher, key_eq, GrowthPolicy::default())
    }

    pub fn with_growth(hasher: H, key_eq: E, policy: GrowthPolicy) -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            hasher,
            key_eq,
            policy,
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

    /// Number of slots in the table.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Walks the probe run of `hash` and returns the slot holding an equal key.
    ///
    /// Stops at the first empty slot or after `capacity` attempts.
    fn probe(&self, hash: u64, key: &K) -> Option<usize> {
        let capacity = self.capacity();
        if capacity == 0 {
            return None;
        }

        let home = home_slot(hash, capacity);
        for attempt in 0..capacity {
            let i = (home + attempt) % capacity;
            match &self.slots[i] {
                None => return None,
                Some(b) if b.hash == hash && (self.key_eq)(&b.key, key) => return Some(i),
                Some(_) => {}
            }
        }
        None
    }

    fn find(&self, key: &K) -> Option<usize> {
        self.probe((self.hasher)(key), key)
    }

    /// Ensures the table has at least `n` slots, growing to `policy.grow(n)`.
    ///
    /// Growth moves every entry into a fresh table using its stored hash. On
    /// failure the map is untouched.
    pub fn ensure_capacity(&mut self, n: usize) -> Result<()> {
        if self.capacity() >= n {
            return Ok(());
        }
        let new_capacity = self
            .policy
            .grow(n)
            .ok_or(CollectionError::CapacityOverflow)?;

        let mut table = empty_table(new_capacity)?;
        let old_capacity = self.capacity();
        for bucket in self.slots.drain(..).flatten() {
            place(&mut table, bucket);
        }
        log::trace!(
            "hash map grown from {} to {} slots ({} entries moved)",
            old_capacity,
            new_capacity,
            self.len
        );
        self.slots = table;
        Ok(())
    }

    /// Replaces the hash function and recomputes every stored hash.
    pub fn rehash(&mut self, hasher: H) -> Result<()> {
        let mut table = empty_table(self.capacity())?;
        for mut bucket in self.slots.drain(..).flatten() {
            bucket.hash = hasher(&bucket.key);
            place(&mut table, bucket);
        }
        log::trace!("hash map rehashed {} entries", self.len);
        self.slots = table;
        self.hasher = hasher;
        Ok(())
    }

    /// Inserts a pair, or overwrites the pair whose key is equal.
    ///
    /// Returns the replaced pair on overwrite.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<(K, V)>> {
        let hash = (self.hasher)(&key);
        if let Some(i) = self.probe(hash, &key) {
            return Ok(self.overwrite(i, key, value));
        }
        self.insert_new(hash, key, value)?;
        Ok(None)
    }

    /// Inserts only when no equal key is present. Returns whether it inserted.
    pub fn put_if_absent(&mut self, key: K, value: V) -> Result<bool> {
        let hash = (self.hasher)(&key);
        if self.probe(hash, &key).is_some() {
            return Ok(false);
        }
        self.insert_new(hash, key, value)?;
        Ok(true)
    }

    /// Overwrites the pair with an equal key and returns the old pair. Does
    /// nothing (and drops the arguments) when the key is absent.
    pub fn replace(&mut self, key: K, value: V) -> Option<(K, V)> {
        let i = self.find(&key)?;
        self.overwrite(i, key, value)
    }

    fn overwrite(&mut self, i: usize, key: K, value: V) -> Option<(K, V)> {
        let bucket = self.slots[i].as_mut()?;
        let old_key = mem::replace(&mut bucket.key, key);
        let old_value = mem::replace(&mut bucket.value, value);
        Some((old_key, old_value))
    }

    fn insert_new(&mut self, hash: u64, key: K, value: V) -> Result<()> {
        self.ensure_capacity(self.len + 1)?;
        place(&mut self.slots, Bucket { hash, key, value });
        self.len += 1;
        Ok(())
    }

    /// Removes the pair with an equal key and hands it back.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let i = self.find(key)?;
        let bucket = self.slots[i].take()?;
        self.len -= 1;
        self.backshift(i);
        Some((bucket.key, bucket.value))
    }

    /// Closes the hole at `hole` by pulling later entries of the run back.
    fn backshift(&mut self, mut hole: usize) {
        let capacity = self.capacity();
        let mut j = hole;
        loop {
            j = (j + 1) % capacity;
            let home = match &self.slots[j] {
                None => break,
                Some(b) => home_slot(b.hash, capacity),
            };

            // an entry whose home lies in (hole, j] would become unreachable
            let reachable_without_move = if hole <= j {
                hole < home && home <= j
            } else {
                hole < home || home <= j
            };
            if !reachable_without_move {
                self.slots[hole] = self.slots[j].take();
                hole = j;
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key)
            .and_then(|i| self.slots[i].as_ref())
            .map(|b| &b.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.find(key)?;
        self.slots[i].as_mut().map(|b| &mut b.value)
    }

    /// Returns the stored key alongside its value.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key)
            .and_then(|i| self.slots[i].as_ref())
            .map(|b| (&b.key, &b.value))
    }

    #[inline]
    pub fn has_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns the stored value, or `default` when the key is absent.
    pub fn get_or_default<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Drops every pair. The table keeps its size.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }
}

impl<K, V, H, E> HashMap<K, V, H, E> {
    /// Visits every pair in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K: Clone, V: Clone, H: Clone, E: Clone> Clone for HashMap<K, V, H, E> {
    fn clone(&self) -> Self {
        Self {
            slots: self
                .slots
                .iter()
                .map(|slot| {
                    slot.as_ref().map(|b| Bucket {
                        hash: b.hash,
                        key: b.key.clone(),
                        value: b.value.clone(),
                    })
                })
                .collect(),
            len: self.len,
            hasher: self.hasher.clone(),
            key_eq: self.key_eq.clone(),
            policy: self.policy,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H, E> fmt::Debug for HashMap<K, V, H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over occupied slots.
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Option<Bucket<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = self.slots.by_ref().flatten().next()?;
        self.remaining -= 1;
        Some((&bucket.key, &bucket.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, H, E> IntoIterator for &'a HashMap<K, V, H, E> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::Hasher;
    use fnv::FnvHasher;
    use proptest::prelude::*;

    fn fnv_str(key: &&str) -> u64 {
        let mut h = FnvHasher::default();
        h.write(key.as_bytes());
        h.finish()
    }

    fn fnv_u32(key: &u32) -> u64 {
        let mut h = FnvHasher::default();
        h.write_u32(*key);
        h.finish()
    }

    fn str_eq(a: &&str, b: &&str) -> bool {
        a == b
    }

    fn u32_eq(a: &u32, b: &u32) -> bool {
        a == b
    }

    #[test]
    fn test_hash_map_overwrite_scenario() {
        let mut map = HashMap::new(fnv_str, str_eq);
        assert_eq!(map.put("A", "Apple").unwrap(), None);
        assert_eq!(map.put("B", "Ball").unwrap(), None);
        assert_eq!(map.put("C", "Cat").unwrap(), None);
        assert_eq!(map.put("B", "Bat").unwrap(), Some(("B", "Ball")));

        assert_eq!(map.get(&"B"), Some(&"Bat"));
        assert_eq!(map.len(), 3);
        assert_eq!(map.capacity(), 16);
    }

    #[test]
    fn test_hash_map_put_if_absent_and_replace() {
        let mut map = HashMap::new(fnv_str, str_eq);
        assert!(map.put_if_absent("k", 1).unwrap());
        assert!(!map.put_if_absent("k", 2).unwrap());
        assert_eq!(map.get(&"k"), Some(&1));

        assert_eq!(map.replace("missing", 5), None);
        assert!(!map.has_key(&"missing"));
        assert_eq!(map.replace("k", 3), Some(("k", 1)));
        assert_eq!(map.get_or_default(&"k", &0), &3);
        assert_eq!(map.get_or_default(&"nope", &0), &0);
    }

    #[test]
    fn test_hash_map_empty_boundaries() {
        let mut map: HashMap<u32, u32, _, _> = HashMap::new(fnv_u32, u32_eq);
        assert_eq!(map.capacity(), 0);
        assert_eq!(map.get(&1), None);
        assert_eq!(map.remove(&1), None);
        assert_eq!(map.iter().count(), 0);
        map.clear();
        assert!(map.is_empty());
    }

    // every key lands on slot 0 so the whole table is one probe run
    fn collide(_: &u32) -> u64 {
        0
    }

    #[test]
    fn test_hash_map_backshift_keeps_displaced_keys_reachable() {
        let mut map = HashMap::with_growth(collide, u32_eq, GrowthPolicy::Exact);
        map.ensure_capacity(8).unwrap();
        for k in 0..5 {
            map.put(k, k * 10).unwrap();
        }
        assert_eq!(map.remove(&1), Some((1, 10)));
        for k in [0, 2, 3, 4] {
            assert_eq!(map.get(&k), Some(&(k * 10)), "key {k} lost");
        }
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_hash_map_backshift_across_wraparound() {
        fn last_slot(k: &u32) -> u64 {
            if *k < 100 { 3 } else { 0 }
        }
        let mut map = HashMap::with_growth(last_slot, u32_eq, GrowthPolicy::Exact);
        map.ensure_capacity(4).unwrap();
        // 1 and 2 wrap to slots 0 and 1; 100 has home 0 and lands on slot 2
        map.put(0, 'a').unwrap();
        map.put(1, 'b').unwrap();
        map.put(2, 'c').unwrap();
        map.put(100, 'd').unwrap();
        assert_eq!(map.remove(&0), Some((0, 'a')));
        assert_eq!(map.get(&1), Some(&'b'));
        assert_eq!(map.get(&2), Some(&'c'));
        assert_eq!(map.get(&100), Some(&'d'));
        assert_eq!(map.remove(&1), Some((1, 'b')));
        assert_eq!(map.get(&100), Some(&'d'));
    }

    #[test]
    fn test_hash_map_full_table_lookup_terminates() {
        let mut map = HashMap::with_growth(collide, u32_eq, GrowthPolicy::Exact);
        for k in 0..4 {
            map.put(k, ()).unwrap();
        }
        assert_eq!(map.len(), map.capacity());
        assert!(!map.has_key(&99));
    }

    #[test]
    fn test_hash_map_growth_keeps_entries() {
        let mut map = HashMap::new(fnv_u32, u32_eq);
        for k in 0..100 {
            map.put(k, k + 1).unwrap();
        }
        assert_eq!(map.len(), 100);
        assert_eq!(map.capacity(), 112);
        assert!((0..100).all(|k| map.get(&k) == Some(&(k + 1))));
    }

    #[test]
    fn test_hash_map_rehash_with_new_function() {
        let mut map: HashMap<u32, u32, fn(&u32) -> u64, _> = HashMap::new(fnv_u32, u32_eq);
        for k in 0..20 {
            map.put(k, k).unwrap();
        }
        map.rehash(collide).unwrap();
        assert_eq!(map.len(), 20);
        assert!((0..20).all(|k| map.has_key(&k)));
        map.put(7, 70).unwrap();
        assert_eq!(map.get(&7), Some(&70));
        assert_eq!(map.len(), 20);
    }

    #[test]
    fn test_hash_map_iter_and_get_mut() {
        let mut map = HashMap::new(fnv_str, str_eq);
        map.put("x", 1).unwrap();
        map.put("y", 2).unwrap();
        if let Some(v) = map.get_mut(&"x") {
            *v += 10;
        }
        let mut pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort();
        assert_eq!(pairs, [("x", 11), ("y", 2)]);
        assert_eq!(map.keys().count(), 2);
        assert_eq!(map.values().sum::<i32>(), 13);
        assert_eq!(map.get_key_value(&"y"), Some((&"y", &2)));

        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 16);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Put(u8, u16),
        PutIfAbsent(u8, u16),
        Remove(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
            (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::PutIfAbsent(k, v)),
            any::<u8>().prop_map(Op::Remove),
        ]
    }

    fn fnv_u8(key: &u8) -> u64 {
        let mut h = FnvHasher::default();
        h.write_u8(*key);
        h.finish()
    }

    fn low_bits(key: &u8) -> u64 {
        u64::from(*key & 0x7)
    }

    proptest! {
        #[test]
        fn prop_hash_map_keys_stay_unique(
            ops in proptest::collection::vec(op(), 0..300),
            clustered in any::<bool>(),
        ) {
            let hasher: fn(&u8) -> u64 = if clustered { low_bits } else { fnv_u8 };
            let mut map = HashMap::new(hasher, |a: &u8, b: &u8| a == b);
            let mut model: hashbrown::HashMap<u8, u16> = hashbrown::HashMap::new();

            for op in ops {
                match op {
                    Op::Put(k, v) => {
                        let old = map.put(k, v).unwrap().map(|(_, v)| v);
                        prop_assert_eq!(old, model.insert(k, v));
                    }
                    Op::PutIfAbsent(k, v) => {
                        let inserted = map.put_if_absent(k, v).unwrap();
                        prop_assert_eq!(inserted, !model.contains_key(&k));
                        model.entry(k).or_insert(v);
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(map.remove(&k).map(|(_, v)| v), model.remove(&k));
                    }
                }
                prop_assert_eq!(map.len(), model.len());
                prop_assert!(map.len() <= map.capacity());
            }

            for (k, v) in &model {
                prop_assert_eq!(map.get(k), Some(v));
            }
            prop_assert_eq!(map.iter().count(), model.len());
        }
    }
}
