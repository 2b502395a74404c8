//! ChainedHashMap: string-keyed map with separate chaining.
//!
//! Each bucket is a [`LinkedList`]; the bucket for a key is
//! `hash(key) % capacity`. When a new entry pushes `len / capacity` above
//! the configured load factor, the bucket array doubles and every entry is
//! re-inserted against the new capacity.

use core::fmt;
use core::iter::Flatten;
use core::mem;
use core::slice;
use std::collections::HashSet;

use tracing::{debug, trace};

use crate::config::MapConfig;
use crate::error::{invariant_violated, MapError};
use crate::hasher::{KeyHasher, PolynomialHash};
use crate::linked_list::{LinkedList, Node};

#[derive(Clone)]
pub struct ChainedHashMap<V, H = PolynomialHash> {
    hasher: H,
    config: MapConfig,
    buckets: Vec<LinkedList<V>>,
    len: usize,
}

fn empty_buckets<V>(capacity: usize) -> Vec<LinkedList<V>> {
    (0..capacity).map(|_| LinkedList::new()).collect()
}

impl<V> ChainedHashMap<V> {
    pub fn new() -> Self {
        Self::with_hasher(PolynomialHash)
    }

    pub fn with_config(config: MapConfig) -> Result<Self, MapError> {
        Self::with_config_and_hasher(config, PolynomialHash)
    }
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, H: KeyHasher> ChainedHashMap<V, H> {
    pub fn with_hasher(hasher: H) -> Self {
        let config = MapConfig::default();
        Self {
            hasher,
            buckets: empty_buckets(config.initial_capacity),
            config,
            len: 0,
        }
    }

    pub fn with_config_and_hasher(config: MapConfig, hasher: H) -> Result<Self, MapError> {
        config.validate()?;
        Ok(Self {
            hasher,
            buckets: empty_buckets(config.initial_capacity),
            config,
            len: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Read-only view of the bucket array, in index order.
    pub fn buckets(&self) -> &[LinkedList<V>] {
        &self.buckets
    }

    fn checked_index(&self, key: &str) -> Result<usize, MapError> {
        let capacity = self.buckets.len();
        let index = (self.hasher.hash_key(key) % capacity as u64) as usize;
        if index < capacity {
            Ok(index)
        } else {
            Err(MapError::BucketOutOfRange { index, capacity })
        }
    }

    #[inline]
    fn bucket_index(&self, key: &str) -> usize {
        self.checked_index(key)
            .unwrap_or_else(|e| invariant_violated(e))
    }

    fn find(&self, key: &str) -> Option<&Node<V>> {
        let index = self.bucket_index(key);
        self.buckets[index].search(|n, _| n.key() == key)
    }

    /// Overwrites an existing entry or appends a new one. Never grows; the
    /// rehash pass relies on that.
    fn insert_entry(&mut self, key: String, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        if let Some(node) = bucket.search_mut(|n, _| n.key() == key) {
            return Some(mem::replace(node.value_mut(), value));
        }
        bucket.append(Node::new(key, value));
        self.len += 1;
        None
    }

    /// Inserts `value` under `key`.
    ///
    /// Returns the previous value when the key was already present; in that
    /// case `len` is unchanged and no growth check runs.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let old = self.insert_entry(key.into(), value);
        if old.is_none() && self.config.should_grow(self.len, self.capacity()) {
            self.grow();
        }
        old
    }

    /// Doubles the bucket array and re-inserts every entry in
    /// bucket-then-list order.
    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * 2;
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        let expected = mem::replace(&mut self.len, 0);
        for node in old.into_iter().flatten() {
            let (key, value) = node.into_parts();
            self.insert_entry(key, value);
        }
        debug_assert_eq!(self.len, expected);
        debug!(old_capacity, new_capacity, len = self.len, "grew hash map");
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(Node::value)
    }

    pub fn get_key_value(&self, key: &str) -> Option<(&str, &V)> {
        self.find(key).map(|n| (n.key(), n.value()))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .search_mut(|n, _| n.key() == key)
            .map(Node::value_mut)
    }

    pub fn has(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key`, returning its value, or `None` if it was absent.
    /// Capacity never shrinks.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];

        let mut position = None;
        bucket.search(|n, i| {
            let hit = n.key() == key;
            if hit {
                position = Some(i);
            }
            hit
        });
        let position = position?;

        let node = bucket
            .remove_at(position)
            .unwrap_or_else(|e| invariant_violated(e.into()));
        self.len -= 1;
        trace!(key, bucket = index, "removed entry");
        Some(node.into_parts().1)
    }

    /// Drops every entry and returns to the configured initial capacity.
    pub fn clear(&mut self) {
        let dropped = self.len;
        self.buckets = empty_buckets(self.config.initial_capacity);
        self.len = 0;
        debug!(dropped, capacity = self.capacity(), "cleared hash map");
    }

    fn collect<'a, T>(&'a self, mut f: impl FnMut(&'a Node<V>) -> T) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        for bucket in &self.buckets {
            bucket.search(|n, _| {
                out.push(f(n));
                false
            });
        }
        out
    }

    pub fn keys(&self) -> Vec<&str> {
        self.collect(|n| n.key())
    }

    pub fn values(&self) -> Vec<&V> {
        self.collect(|n| n.value())
    }

    pub fn entries(&self) -> Vec<(&str, &V)> {
        self.collect(|n| (n.key(), n.value()))
    }

    /// Iterates entries in the same order as [`entries`](Self::entries).
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.buckets.iter().flatten(),
            remaining: self.len,
        }
    }

    /// Checks every structural invariant of the map and its buckets.
    pub fn validate(&self) -> Result<(), MapError> {
        let capacity = self.capacity();
        if capacity < self.config.initial_capacity || !capacity.is_power_of_two() {
            return Err(MapError::InvalidCapacity(capacity));
        }

        let mut seen = HashSet::with_capacity(self.len);
        let mut counted = 0;
        for (found, bucket) in self.buckets.iter().enumerate() {
            bucket.validate()?;
            counted += bucket.len();
            for node in bucket {
                let expected = self.checked_index(node.key())?;
                if expected != found {
                    return Err(MapError::MisplacedKey {
                        key: node.key().to_string(),
                        found,
                        expected,
                    });
                }
                if !seen.insert(node.key()) {
                    return Err(MapError::DuplicateKey {
                        key: node.key().to_string(),
                    });
                }
            }
        }

        if counted != self.len {
            return Err(MapError::SizeMismatch {
                recorded: self.len,
                counted,
            });
        }
        Ok(())
    }
}

impl<V: fmt::Debug, H: KeyHasher> fmt::Debug for ChainedHashMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(key, value)` pairs of a `ChainedHashMap`.
pub struct Iter<'a, V> {
    inner: Flatten<slice::Iter<'a, LinkedList<V>>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.inner.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V, H: KeyHasher> IntoIterator for &'a ChainedHashMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V, H: KeyHasher> Extend<(K, V)> for ChainedHashMap<V, H> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ChainedHashMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}
