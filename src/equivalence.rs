//! Key strategies: how a container hashes and compares its keys.
//!
//! A container is built around one strategy and keeps it for its whole
//! lifetime; clones share it. Strategies must be consistent: if
//! `equal_keys(a, b)` then `hash_key(a) == hash_key(b)`, and both must be
//! deterministic. Breaking that contract leaves lookups unspecified (keys may
//! go missing or duplicate), but never unsafe.

use core::fmt;

/// Caller-supplied hashing and equality for keys of type `K`.
pub trait KeyEquivalence<K: ?Sized> {
    fn hash_key(&self, key: &K) -> i32;
    fn equal_keys(&self, a: &K, b: &K) -> bool;
}

/// A strategy made of two plain functions. Use this when the key type is not
/// yours, or when the same type is keyed differently in different places.
///
/// ```
/// use structural_hashmap::{hash_tuple, FnEquivalence, KeyEquivalence};
///
/// let by_name = FnEquivalence::new(
///     |p: &(String, u32)| hash_tuple!(&p.0),
///     |a: &(String, u32), b: &(String, u32)| a.0 == b.0,
/// );
/// let first: (String, u32) = ("x".to_string(), 1);
/// let second: (String, u32) = ("x".to_string(), 2);
/// assert!(by_name.equal_keys(&first, &second));
/// ```
#[derive(Clone, Copy)]
pub struct FnEquivalence<H, E> {
    hash: H,
    equal: E,
}

impl<H, E> FnEquivalence<H, E> {
    pub const fn new(hash: H, equal: E) -> Self {
        Self { hash, equal }
    }
}

impl<K, H, E> KeyEquivalence<K> for FnEquivalence<H, E>
where
    K: ?Sized,
    H: Fn(&K) -> i32,
    E: Fn(&K, &K) -> bool,
{
    #[inline]
    fn hash_key(&self, key: &K) -> i32 {
        (self.hash)(key)
    }

    #[inline]
    fn equal_keys(&self, a: &K, b: &K) -> bool {
        (self.equal)(a, b)
    }
}

impl<H, E> fmt::Debug for FnEquivalence<H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnEquivalence")
    }
}

/// Keys that know their own structural hash and equality.
pub trait StructuralKey {
    fn structural_hash(&self) -> i32;
    fn structural_eq(&self, other: &Self) -> bool;
}

/// Strategy that defers to the key's [`StructuralKey`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Structural;

impl<K> KeyEquivalence<K> for Structural
where
    K: ?Sized + StructuralKey,
{
    #[inline]
    fn hash_key(&self, key: &K) -> i32 {
        key.structural_hash()
    }

    #[inline]
    fn equal_keys(&self, a: &K, b: &K) -> bool {
        a.structural_eq(b)
    }
}
