//! Hash code primitives: deterministic 32-bit hashes for strings, numbers and
//! big integers, plus a combinator for folding field hashes into a composite
//! key hash.
//!
//! All arithmetic is wrapping two's-complement 32-bit arithmetic, so results
//! are identical on every platform.

use num_bigint::BigInt;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

const BIT_30: u32 = 0x4000_0000;

/// 32-bit FNV-1a over the UTF-16 code units of `s`.
///
/// The offset basis is masked to 31 bits before mixing.
///
/// ```
/// use structural_hashmap::hash_string;
///
/// assert_eq!(hash_string(""), 18652613);
/// assert_eq!(hash_string("simple"), 2523299967);
/// ```
pub fn hash_string(s: &str) -> u32 {
    s.encode_utf16()
        .fold(FNV_OFFSET_BASIS & 0x7fff_ffff, |h, unit| {
            (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
        })
}

/// Folds `added` into a running hash: `hash * 31 + added`, wrapping.
///
/// Not commutative; field order is part of the resulting code.
#[inline]
pub const fn chain_hash(hash: i32, added: i32) -> i32 {
    hash.wrapping_mul(31).wrapping_add(added)
}

/// Replaces bit 30 with the sign bit, keeping every other bit.
#[inline]
pub const fn drop_highest_non_sign_bit(i: i32) -> i32 {
    let u = i as u32;
    (((u >> 1) & BIT_30) | (u & !BIT_30)) as i32
}

/// Hashes a double.
///
/// Values exactly representable as `i32` hash to themselves (`-0.0` hashes to
/// `0`). Anything else, including NaN and the infinities, combines the low
/// and then the high 32-bit word of the IEEE-754 bit pattern.
///
/// ```
/// use structural_hashmap::hash_number;
///
/// assert_eq!(hash_number(-7.0), -7);
/// assert_eq!(hash_number(1.1), -645188801);
/// ```
pub fn hash_number(num: f64) -> i32 {
    let truncated = num as i32;
    if f64::from(truncated) == num {
        return truncated;
    }
    let bits = num.to_bits();
    let low = bits as u32;
    let high = (bits >> 32) as u32;
    chain_hash(low as i32, high as i32)
}

/// Absolute value modulo 2^32. The sign is discarded.
pub fn hash_big_int(value: &BigInt) -> u32 {
    value.magnitude().iter_u32_digits().next().unwrap_or(0)
}

/// A primitive value that participates in a composite hash.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HashValue<'a> {
    Str(&'a str),
    Number(f64),
    BigInt(&'a BigInt),
    Bool(bool),
    /// A slot that was never initialized.
    Undefined,
    /// An explicit "no value".
    Null,
}

impl<'a> From<&'a str> for HashValue<'a> {
    fn from(s: &'a str) -> Self {
        HashValue::Str(s)
    }
}

impl<'a> From<&'a String> for HashValue<'a> {
    fn from(s: &'a String) -> Self {
        HashValue::Str(s)
    }
}

impl<'a> From<&'a BigInt> for HashValue<'a> {
    fn from(b: &'a BigInt) -> Self {
        HashValue::BigInt(b)
    }
}

impl From<bool> for HashValue<'_> {
    fn from(b: bool) -> Self {
        HashValue::Bool(b)
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for HashValue<'_> {
                fn from(n: $t) -> Self {
                    HashValue::Number(f64::from(n))
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, u8, u16, u32, f32, f64);

impl<'a, T> From<Option<T>> for HashValue<'a>
where
    T: Into<HashValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(HashValue::Null, Into::into)
    }
}

/// Dispatches on the kind of `value`.
///
/// Unsigned string and big-integer hashes are reinterpreted bit-for-bit as
/// `i32`. `Undefined`, `false`, `true` and `Null` map to the fixed codes 1,
/// 2, 3 and 0.
pub fn hash_value(value: HashValue<'_>) -> i32 {
    match value {
        HashValue::Str(s) => hash_string(s) as i32,
        HashValue::Number(n) => hash_number(n),
        HashValue::BigInt(b) => hash_big_int(b) as i32,
        HashValue::Undefined => 1,
        HashValue::Bool(false) => 2,
        HashValue::Bool(true) => 3,
        HashValue::Null => 0,
    }
}

/// Hashes an ordered sequence of values, seeded with its length.
///
/// ```
/// use structural_hashmap::{hash_tuple, HashValue};
///
/// let ab = hash_tuple(&[HashValue::from("A"), HashValue::from("B")]);
/// let ba = hash_tuple(&[HashValue::from("B"), HashValue::from("A")]);
/// assert_ne!(ab, ba);
/// ```
pub fn hash_tuple(values: &[HashValue<'_>]) -> i32 {
    values
        .iter()
        .fold(values.len() as i32, |h, &v| chain_hash(h, hash_value(v)))
}

/// Hashes its arguments as a tuple, converting each with `HashValue::from`.
///
/// ```
/// use structural_hashmap::hash_tuple;
///
/// let from = String::from("A");
/// assert_eq!(hash_tuple!(&from, "B", 1), 190727685);
/// ```
#[macro_export]
macro_rules! hash_tuple {
    ($($value:expr),* $(,)?) => {
        $crate::hash_tuple(&[$($crate::HashValue::from($value)),*])
    };
}
