//! structural-hashmap: an insertion-ordered HashMap and HashSet whose keys
//! are hashed and compared by caller-supplied functions rather than by
//! `Hash`/`Eq`, plus deterministic 32-bit hash helpers for building composite
//! key hashes.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: key containers by structural values (records compared field by
//!   field, foreign types, projections) without wrapping every key in a
//!   newtype that implements `Hash`/`Eq`.
//! - Layers:
//!   - `hash_code`: pure functions producing 32-bit codes (FNV-1a strings,
//!     doubles, big integers, tuples) and `chain_hash` to fold fields.
//!   - `equivalence`: the `KeyEquivalence` strategy seam; either two plain
//!     functions (`FnEquivalence`) or a key-owned impl (`Structural`).
//!   - `HashMap<K, V, Q>`: chained buckets keyed by hash code, entries in a
//!     slot arena threaded on an insertion list.
//!   - `HashSet<K, Q>`: `HashMap<K, (), Q>`.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync`; the strategy is shared by clones
//!   through an `Rc`.
//! - Iteration order is insertion order of distinct logical keys. Updating
//!   an existing key keeps both its position and the key instance stored
//!   first.
//! - Empty buckets are never retained.
//! - No operation fails. Absent keys yield `None`/`false`.
//!
//! Strategy contract
//! - `equal_keys(a, b)` must imply `hash_key(a) == hash_key(b)`, and both
//!   must be deterministic. If they are not, lookups are unspecified (keys
//!   may appear missing or be stored twice) but the containers remain
//!   memory-safe. The containers do not try to detect this.
//!
//! Hash codes
//! - All hash arithmetic wraps in 32 bits, so codes are identical across
//!   platforms and match the reference vectors in the tests.
//! - Cached per entry: clone and iteration never call the strategy.
//!
//! Notes and non-goals
//! - Not an open-addressing table tuned for throughput; the index is a
//!   `hashbrown` map from hash code to bucket.
//! - No cryptographic guarantees from any of the hash helpers.
//! - No mutable iteration; values are updated through `get_mut` or `set`.

pub mod equivalence;
pub mod hash_code;
pub mod hash_map;
#[cfg(test)]
mod hash_map_proptest;
pub mod hash_set;

// Public surface
pub use equivalence::{FnEquivalence, KeyEquivalence, Structural, StructuralKey};
pub use hash_code::{
    chain_hash, drop_highest_non_sign_bit, hash_big_int, hash_number, hash_string, hash_tuple,
    hash_value, HashValue,
};
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use num_bigint::BigInt;
