//! Error types for the bucket lists and the map.

use thiserror::Error;

use crate::config::MIN_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index {index} is out of range for a list of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("list links are inconsistent: {0}")]
    BrokenLinks(&'static str),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error(transparent)]
    List(#[from] ListError),
    #[error("bucket index {index} is outside 0..{capacity}")]
    BucketOutOfRange { index: usize, capacity: usize },
    #[error("key {key:?} is stored in bucket {found} but hashes to bucket {expected}")]
    MisplacedKey {
        key: String,
        found: usize,
        expected: usize,
    },
    #[error("key {key:?} is stored more than once")]
    DuplicateKey { key: String },
    #[error("map records {recorded} entries but its buckets hold {counted}")]
    SizeMismatch { recorded: usize, counted: usize },
    #[error("capacity {0} is not a power of two of at least {min}", min = MIN_CAPACITY)]
    InvalidCapacity(usize),
    #[error("load factor {0} must be finite and positive")]
    InvalidLoadFactor(f64),
}

/// Reports a broken internal invariant and aborts the current operation.
#[cold]
#[track_caller]
pub(crate) fn invariant_violated(err: MapError) -> ! {
    tracing::error!(error = %err, "hash map invariant violated");
    panic!("hash map invariant violated: {err}")
}
