//! HashMap: chained hash map with caller-supplied key hashing and equality.
//!
//! Layout
//! - `index`: hash code -> bucket of entry handles. A bucket holds every live
//!   key with that code, in insertion order; empty buckets are dropped.
//! - `slots`: generational arena of entries. Each entry keeps its key, value,
//!   cached hash code and its neighbours on the insertion list.
//! - `head`/`tail`: ends of the insertion list; iteration walks it.
//!
//! Only the first insertion of a logical key appends to the list. Setting an
//! equal key again overwrites the value in place and keeps the key instance
//! that was stored first.
//!
//! The strategy is only consulted on lookups and inserts. Clone and iteration
//! use the cached hash codes and never call back into user code.

use crate::equivalence::{FnEquivalence, KeyEquivalence};
use core::fmt;
use core::iter::FusedIterator;
use slotmap::SlotMap;
use std::rc::Rc;

slotmap::new_key_type! {
    struct EntryKey;
}

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: i32,
    prev: Option<EntryKey>,
    next: Option<EntryKey>,
}

/// An insertion-ordered map whose keys are hashed and compared by a
/// [`KeyEquivalence`] strategy instead of `Hash`/`Eq`.
///
/// ```
/// use structural_hashmap::{hash_tuple, HashMap};
///
/// struct Edge {
///     from: String,
///     to: String,
/// }
///
/// fn hash_edge(e: &Edge) -> i32 {
///     hash_tuple!(&e.from, &e.to)
/// }
///
/// fn equal_edges(a: &Edge, b: &Edge) -> bool {
///     a.from == b.from && a.to == b.to
/// }
///
/// let edge = |from: &str, to: &str| Edge { from: from.into(), to: to.into() };
///
/// let mut weights = HashMap::new(hash_edge, equal_edges);
/// weights.set(edge("A", "B"), 10).set(edge("A", "B"), 20);
/// assert_eq!(weights.len(), 1);
/// assert_eq!(weights.get(&edge("A", "B")), Some(&20));
/// assert!(weights.remove(&edge("A", "B")));
/// ```
///
/// The map is single-threaded (`!Send`, `!Sync`). A strategy whose hash and
/// equality disagree gives unspecified lookup results; the map does not try
/// to detect it.
pub struct HashMap<K, V, Q> {
    equivalence: Rc<Q>,
    index: hashbrown::HashMap<i32, Vec<EntryKey>>,
    slots: SlotMap<EntryKey, Entry<K, V>>,
    head: Option<EntryKey>,
    tail: Option<EntryKey>,
}

impl<K, V, H, E> HashMap<K, V, FnEquivalence<H, E>>
where
    H: Fn(&K) -> i32,
    E: Fn(&K, &K) -> bool,
{
    /// Creates an empty map keyed by `hash_key` and `equal_keys`.
    pub fn new(hash_key: H, equal_keys: E) -> Self {
        Self::with_equivalence(FnEquivalence::new(hash_key, equal_keys))
    }

    /// Creates a map and `set`s each of `entries` in order.
    pub fn with_entries<I>(hash_key: H, equal_keys: E, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_entries_with(FnEquivalence::new(hash_key, equal_keys), entries)
    }
}

impl<K, V, Q> HashMap<K, V, Q> {
    pub fn with_equivalence(equivalence: Q) -> Self {
        Self::with_shared_equivalence(Rc::new(equivalence))
    }

    fn with_shared_equivalence(equivalence: Rc<Q>) -> Self {
        Self {
            equivalence,
            index: hashbrown::HashMap::new(),
            slots: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    /// Number of distinct logical keys.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn equivalence(&self) -> &Q {
        &self.equivalence
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.head = None;
        self.tail = None;
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            front: self.head,
            back: self.tail,
            remaining: self.slots.len(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Calls `callback(value, key, map)` for every entry in insertion order.
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&V, &K, &Self),
    {
        for (k, v) in self.iter() {
            callback(v, k, self);
        }
    }

    /// Number of distinct hash codes currently indexed.
    #[cfg(any(test, feature = "bench_internal"))]
    pub fn bucket_count(&self) -> usize {
        self.index.len()
    }

    fn push_back(&mut self, hash: i32, key: K, value: V) {
        let prev = self.tail;
        let k = self.slots.insert(Entry {
            key,
            value,
            hash,
            prev,
            next: None,
        });
        match prev.and_then(|p| self.slots.get_mut(p)) {
            Some(p) => p.next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        self.index.entry(hash).or_default().push(k);
    }

    /// Removes the entry from the arena and the insertion list. The caller
    /// is responsible for the bucket.
    fn unlink(&mut self, k: EntryKey) -> Option<Entry<K, V>> {
        let entry = self.slots.remove(k)?;
        match entry.prev.and_then(|p| self.slots.get_mut(p)) {
            Some(p) => p.next = entry.next,
            None => self.head = entry.next,
        }
        match entry.next.and_then(|n| self.slots.get_mut(n)) {
            Some(n) => n.prev = entry.prev,
            None => self.tail = entry.prev,
        }
        Some(entry)
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut bucketed = 0;
        for (&hash, bucket) in &self.index {
            assert!(!bucket.is_empty(), "empty bucket retained for {hash}");
            for &k in bucket {
                let e = self.slots.get(k).expect("bucket points at a live entry");
                assert_eq!(e.hash, hash, "entry filed under the wrong hash code");
            }
            bucketed += bucket.len();
        }
        assert_eq!(bucketed, self.slots.len(), "every entry is in exactly one bucket");

        let mut walked = 0;
        let mut prev = None;
        let mut cur = self.head;
        while let Some(k) = cur {
            let e = &self.slots[k];
            assert_eq!(e.prev, prev, "broken back link");
            prev = cur;
            cur = e.next;
            walked += 1;
        }
        assert_eq!(prev, self.tail);
        assert_eq!(walked, self.slots.len(), "insertion list covers every entry");
    }
}

impl<K, V, Q> HashMap<K, V, Q>
where
    Q: KeyEquivalence<K>,
{
    /// Creates a map with `equivalence` and `set`s each of `entries` in order.
    pub fn from_entries_with<I>(equivalence: Q, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_equivalence(equivalence);
        map.extend(entries);
        map
    }

    fn find_hashed(&self, hash: i32, key: &K) -> Option<EntryKey> {
        let bucket = self.index.get(&hash)?;
        bucket.iter().copied().find(|&k| {
            self.slots
                .get(k)
                .map(|e| self.equivalence.equal_keys(&e.key, key))
                .unwrap_or(false)
        })
    }

    fn find(&self, key: &K) -> Option<EntryKey> {
        self.find_hashed(self.equivalence.hash_key(key), key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let k = self.find(key)?;
        self.slots.get(k).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let k = self.find(key)?;
        self.slots.get_mut(k).map(|e| &mut e.value)
    }

    /// Returns the stored key instance, which may differ from `key` while
    /// still being equal to it, together with its value.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let k = self.find(key)?;
        self.slots.get(k).map(|e| (&e.key, &e.value))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Associates `value` with `key`.
    ///
    /// If an equal key is already stored, only its value is replaced: the
    /// stored key instance and its iteration position stay, and `key` is
    /// dropped. Otherwise the entry is appended.
    pub fn set(&mut self, key: K, value: V) -> &mut Self {
        let hash = self.equivalence.hash_key(&key);
        match self.find_hashed(hash, &key).and_then(|k| self.slots.get_mut(k)) {
            Some(e) => e.value = value,
            None => self.push_back(hash, key, value),
        }
        self
    }

    /// Removes the entry for `key`. Returns whether one was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes the entry for `key` and returns the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.equivalence.hash_key(key);
        let Self {
            index,
            slots,
            equivalence,
            ..
        } = self;
        let bucket = index.get_mut(&hash)?;
        let pos = bucket.iter().position(|&k| {
            slots
                .get(k)
                .map(|e| equivalence.equal_keys(&e.key, key))
                .unwrap_or(false)
        })?;
        let k = bucket.remove(pos);
        if bucket.is_empty() {
            index.remove(&hash);
        }
        let entry = self.unlink(k)?;
        Some((entry.key, entry.value))
    }
}

/// Eager copy of every entry, in order. Only the strategy is shared.
impl<K, V, Q> Clone for HashMap<K, V, Q>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut copy = Self::with_shared_equivalence(Rc::clone(&self.equivalence));
        let mut cur = self.head;
        while let Some(e) = cur.and_then(|k| self.slots.get(k)) {
            copy.push_back(e.hash, e.key.clone(), e.value.clone());
            cur = e.next;
        }
        copy
    }
}

impl<K, V, Q> Default for HashMap<K, V, Q>
where
    Q: Default,
{
    fn default() -> Self {
        Self::with_equivalence(Q::default())
    }
}

impl<K, V, Q> Extend<(K, V)> for HashMap<K, V, Q>
where
    Q: KeyEquivalence<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V, Q> FromIterator<(K, V)> for HashMap<K, V, Q>
where
    Q: KeyEquivalence<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries_with(Q::default(), iter)
    }
}

impl<K, V, Q> fmt::Debug for HashMap<K, V, Q>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(&K, &V)` in insertion order.
pub struct Iter<'a, K, V> {
    slots: &'a SlotMap<EntryKey, Entry<K, V>>,
    front: Option<EntryKey>,
    back: Option<EntryKey>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let e = self.slots.get(self.front?)?;
        self.front = e.next;
        self.remaining -= 1;
        Some((&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let e = self.slots.get(self.back?)?;
        self.back = e.prev;
        self.remaining -= 1;
        Some((&e.key, &e.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over keys in insertion order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over values in insertion order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Owning iterator over `(K, V)` in insertion order.
pub struct IntoIter<K, V> {
    slots: SlotMap<EntryKey, Entry<K, V>>,
    front: Option<EntryKey>,
    back: Option<EntryKey>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let e = self.slots.remove(self.front?)?;
        self.front = e.next;
        if self.slots.is_empty() {
            self.back = None;
        }
        Some((e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.slots.len(), Some(self.slots.len()))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let e = self.slots.remove(self.back?)?;
        self.back = e.prev;
        if self.slots.is_empty() {
            self.front = None;
        }
        Some((e.key, e.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<'a, K, V, Q> IntoIterator for &'a HashMap<K, V, Q> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, Q> IntoIterator for HashMap<K, V, Q> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots,
            front: self.head,
            back: self.tail,
        }
    }
}
