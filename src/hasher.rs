//! Key hashing policy.

/// Maps a string key to a hash; the map reduces it modulo its bucket count.
///
/// Implementations must be deterministic: the same key must always hash to
/// the same value for the lifetime of a map, or lookups will miss.
pub trait KeyHasher {
    fn hash_key(&self, key: &str) -> u64;
}

/// Polynomial rolling hash: `acc = 31 * acc + unit` over the key's UTF-16
/// code units, starting from 0.
///
/// Accumulation wraps in `u32`, so the result is always non-negative and
/// matches the classic `String.hashCode` layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolynomialHash;

impl KeyHasher for PolynomialHash {
    #[inline]
    fn hash_key(&self, key: &str) -> u64 {
        let acc = key
            .encode_utf16()
            .fold(0u32, |acc, unit| acc.wrapping_mul(31).wrapping_add(u32::from(unit)));
        u64::from(acc)
    }
}

impl<T: KeyHasher + ?Sized> KeyHasher for &T {
    fn hash_key(&self, key: &str) -> u64 {
        (**self).hash_key(key)
    }
}
