//! Sizing and growth settings for `ChainedHashMap`.

use crate::error::MapError;

/// Smallest bucket count a map may have.
pub const MIN_CAPACITY: usize = 16;
pub const DEFAULT_CAPACITY: usize = MIN_CAPACITY;
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Initial bucket count and the load factor that triggers growth.
///
/// The capacity is also what `clear()` returns the map to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    pub initial_capacity: usize,
    pub load_factor: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl MapConfig {
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if self.initial_capacity < MIN_CAPACITY || !self.initial_capacity.is_power_of_two() {
            return Err(MapError::InvalidCapacity(self.initial_capacity));
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(MapError::InvalidLoadFactor(self.load_factor));
        }
        Ok(())
    }

    /// True when `len` entries over `capacity` buckets is strictly above
    /// the load factor.
    #[inline]
    pub fn should_grow(&self, len: usize, capacity: usize) -> bool {
        len as f64 / capacity as f64 > self.load_factor
    }
}
