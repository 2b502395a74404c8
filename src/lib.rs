//! chained-hashmap: a single-threaded, string-keyed hash map using
//! separate chaining over arena-backed singly linked lists.
//!
//! Internal Design:
//!
//! Summary
//! - Layers:
//!   - LinkedList<V>: bucket chain. Nodes live in a `SlotMap` arena owned
//!     by the list; `head`, `tail` and `next` are generational handles,
//!     so there are no pointer cycles and no `unsafe`.
//!   - ChainedHashMap<V, H>: owns a `Vec` of buckets, picks one per key
//!     with `hash(key) % capacity`, and delegates storage and collision
//!     handling to that bucket's list.
//!
//! Constraints
//! - Single-threaded: all operations take `&self`/`&mut self` and run to
//!   completion. Wrap the map in a lock for shared mutation.
//! - Keys are `String`; lookups take `&str`. Values are generic.
//! - Capacity is a power of two, at least 16, doubling on growth and never
//!   shrinking except through `clear()`.
//!
//! Hashing
//! - The default `PolynomialHash` computes `acc = 31 * acc + unit` over
//!   UTF-16 code units with wrapping `u32` arithmetic. The choice only
//!   affects bucket layout and iteration order, never lookup results.
//! - Other policies plug in through the `KeyHasher` trait.
//!
//! Growth
//! - After a new entry is appended, if `len / capacity` is strictly above
//!   the load factor (0.75 by default) the bucket array doubles and every
//!   entry is re-inserted through the same routine `set` uses, minus the
//!   growth check. The population is fixed during the pass, so it cannot
//!   recurse.
//!
//! Failure model
//! - Missing keys are `None`/`false`, never errors.
//! - `LinkedList::remove_at` reports `ListError::OutOfRange`.
//! - A bucket index outside `0..capacity`, or a failed removal at a
//!   position the map itself just located, is an internal invariant
//!   violation: it is logged and panics.
//! - `validate()` on both layers checks the full set of structural
//!   invariants and returns a typed error; tests call it after every step.

pub mod config;
pub mod error;
pub mod hash_map;
#[cfg(test)]
mod hash_map_proptest;
pub mod hasher;
pub mod linked_list;

// Public surface
pub use config::{MapConfig, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, MIN_CAPACITY};
pub use error::{ListError, MapError};
pub use hash_map::ChainedHashMap;
pub use hasher::{KeyHasher, PolynomialHash};
pub use linked_list::{LinkedList, Node};
