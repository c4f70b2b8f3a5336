//! Hash functions that can be injected into a `ProbingHashtable`

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Maps a key to the non-negative integer its probe sequence starts from.
///
/// Must be deterministic for the lifetime of a table.
pub trait KeyHasher<K: ?Sized> {
    /// Returns the base hash of `key`
    fn hash_key(&self, key: &K) -> u64;
}

impl<K, F> KeyHasher<K> for F
where
    K: ?Sized,
    F: Fn(&K) -> u64,
{
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

/// Uses an unsigned integer key as its own hash.
///
/// This is the default for numeric person ids: consecutive ids land in
/// consecutive slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityHash;

/// Implements `KeyHasher` for `IdentityHash` on lossless unsigned key types
macro_rules! identity_hash {
    ($($ty:ty),*) => {
        $(
            impl KeyHasher<$ty> for IdentityHash {
                fn hash_key(&self, key: &$ty) -> u64 {
                    u64::from(*key)
                }
            }
        )*
    };
}

identity_hash!(u8, u16, u32, u64);

impl KeyHasher<usize> for IdentityHash {
    #[allow(clippy::cast_possible_truncation)]
    fn hash_key(&self, key: &usize) -> u64 {
        *key as u64
    }
}

/// Hashes any `Hash` key with the standard library's `DefaultHasher`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdHash;

impl<K: Hash + ?Sized> KeyHasher<K> for StdHash {
    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }
}
