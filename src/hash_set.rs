//! HashSet: set adapter over [`HashMap`] with a `()` sentinel value.

use crate::equivalence::{FnEquivalence, KeyEquivalence};
use crate::hash_map::{self, HashMap};
use core::fmt;
use core::iter::FusedIterator;

/// An insertion-ordered set of structural keys.
///
/// ```
/// use structural_hashmap::HashSet;
///
/// let mut seen = HashSet::new(|n: &u32| (n % 10) as i32, |a: &u32, b: &u32| a == b);
/// seen.add(3).add(13).add(3);
/// assert_eq!(seen.iter().copied().collect::<Vec<_>>(), [3, 13]);
/// ```
pub struct HashSet<K, Q> {
    map: HashMap<K, (), Q>,
}

impl<K, H, E> HashSet<K, FnEquivalence<H, E>>
where
    H: Fn(&K) -> i32,
    E: Fn(&K, &K) -> bool,
{
    pub fn new(hash_key: H, equal_keys: E) -> Self {
        Self::with_equivalence(FnEquivalence::new(hash_key, equal_keys))
    }

    /// Creates a set and `add`s each of `items` in order.
    pub fn with_items<I>(hash_key: H, equal_keys: E, items: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        Self::from_items_with(FnEquivalence::new(hash_key, equal_keys), items)
    }
}

impl<K, Q> HashSet<K, Q> {
    pub fn with_equivalence(equivalence: Q) -> Self {
        Self {
            map: HashMap::with_equivalence(equivalence),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Keys in insertion order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.map.keys(),
        }
    }

    pub fn keys(&self) -> Iter<'_, K> {
        self.iter()
    }

    /// Same as [`keys`](Self::keys); a set's values are its keys.
    pub fn values(&self) -> Iter<'_, K> {
        self.iter()
    }

    /// Each key paired with itself, mirroring the map's entry shape.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &K)> + '_ {
        self.iter().map(|k| (k, k))
    }

    /// Calls `callback(key, key, set)` for every key in insertion order.
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&K, &K, &Self),
    {
        for k in self.iter() {
            callback(k, k, self);
        }
    }
}

impl<K, Q> HashSet<K, Q>
where
    Q: KeyEquivalence<K>,
{
    pub fn from_items_with<I>(equivalence: Q, items: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut set = Self::with_equivalence(equivalence);
        set.extend(items);
        set
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// The stored instance equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.map.get_key_value(key).map(|(k, _)| k)
    }

    /// Adds `key` unless an equal key is already stored, in which case the
    /// stored instance and its position are kept.
    pub fn add(&mut self, key: K) -> &mut Self {
        self.map.set(key, ());
        self
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.map.remove(key)
    }

    /// Removes and returns the stored instance equal to `key`.
    pub fn take(&mut self, key: &K) -> Option<K> {
        self.map.remove_entry(key).map(|(k, ())| k)
    }
}

impl<K, Q> Clone for HashSet<K, Q>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<K, Q> Default for HashSet<K, Q>
where
    Q: Default,
{
    fn default() -> Self {
        Self {
            map: HashMap::default(),
        }
    }
}

impl<K, Q> Extend<K> for HashSet<K, Q>
where
    Q: KeyEquivalence<K>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|k| (k, ())));
    }
}

impl<K, Q> FromIterator<K> for HashSet<K, Q>
where
    Q: KeyEquivalence<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_items_with(Q::default(), iter)
    }
}

impl<K, Q> fmt::Debug for HashSet<K, Q>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the keys of a [`HashSet`] in insertion order.
pub struct Iter<'a, K> {
    inner: hash_map::Keys<'a, K, ()>,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
impl<K> FusedIterator for Iter<'_, K> {}

/// Owning iterator over the keys of a [`HashSet`] in insertion order.
pub struct IntoIter<K> {
    inner: hash_map::IntoIter<K, ()>,
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, ())| k)
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}
impl<K> FusedIterator for IntoIter<K> {}

impl<'a, K, Q> IntoIterator for &'a HashSet<K, Q> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Q> IntoIterator for HashSet<K, Q> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mod10(n: &u32) -> i32 {
        (n % 10) as i32
    }

    fn same(a: &u32, b: &u32) -> bool {
        a == b
    }

    #[test]
    fn keeps_insertion_order() {
        let mut s = HashSet::with_items(mod10, same, [1, 2, 3, 11, 22, 33]);
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 11, 22, 33]);
        s.add(2).add(11).add(4);
        assert_eq!(
            s.iter().copied().collect::<Vec<_>>(),
            [1, 2, 3, 11, 22, 33, 4]
        );
        assert_eq!(s.len(), 7);
    }

    #[test]
    fn take_and_get_return_stored_instance() {
        // Equal when they agree modulo 100; the stored one is the first seen.
        let mut s = HashSet::new(|n: &u32| (n % 100) as i32, |a: &u32, b: &u32| a % 100 == b % 100);
        s.add(105).add(205);
        assert_eq!(s.len(), 1);
        assert_eq!(s.get(&5), Some(&105));
        assert_eq!(s.take(&305), Some(105));
        assert_eq!(s.take(&305), None);
        assert!(s.is_empty());
    }

    /// Invariant: `entries` and `for_each` expose each key in both positions.
    #[test]
    fn entries_pair_key_with_itself() {
        let s = HashSet::with_items(mod10, same, [7, 17]);
        for (a, b) in s.entries() {
            assert!(core::ptr::eq(a, b));
        }
        let mut n = 0;
        s.for_each(|v, k, set| {
            assert!(core::ptr::eq(v, k));
            assert!(core::ptr::eq(set, &s));
            n += 1;
        });
        assert_eq!(n, s.len());
        assert_eq!(s.values().rev().copied().collect::<Vec<_>>(), [17, 7]);
    }

    #[test]
    fn clone_is_independent() {
        let mut s = HashSet::with_items(mod10, same, [1, 2]);
        let c = s.clone();
        s.clear();
        assert_eq!(c.len(), 2);
        assert!(c.contains(&1));
        assert!(!s.contains(&1));
    }

    #[test]
    fn owned_iteration_and_debug() {
        let s = HashSet::with_items(mod10, same, [9, 19, 8]);
        assert_eq!(format!("{s:?}"), "{9, 19, 8}");
        assert_eq!(s.into_iter().collect::<Vec<_>>(), [9, 19, 8]);
    }
}
