//! Resize thresholds for `ChainedHashMap`.

use crate::error::TableError;

/// When and by how much the bucket array grows or shrinks.
///
/// The table grows before an insert once `count >= capacity * grow_load_factor`,
/// to `capacity * grow_multiplier`. After a removal it shrinks once
/// `count <= capacity / shrink_load_factor` and `count > initial_capacity`,
/// to `capacity / shrink_divisor`, never below `initial_capacity`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizePolicy {
    pub initial_capacity: usize,
    pub grow_load_factor: usize,
    pub grow_multiplier: usize,
    pub shrink_load_factor: usize,
    pub shrink_divisor: usize,
}

impl ResizePolicy {
    pub const DEFAULT: Self = Self {
        initial_capacity: 17,
        grow_load_factor: 2,
        grow_multiplier: 3,
        shrink_load_factor: 4,
        shrink_divisor: 2,
    };

    pub fn validate(&self) -> Result<(), TableError> {
        if self.initial_capacity == 0 {
            return Err(TableError::InvalidPolicy("initial capacity must be non-zero"));
        }
        if self.grow_load_factor == 0 {
            return Err(TableError::InvalidPolicy("grow load factor must be non-zero"));
        }
        if self.grow_multiplier < 2 {
            return Err(TableError::InvalidPolicy("grow multiplier must be at least 2"));
        }
        if self.shrink_load_factor == 0 {
            return Err(TableError::InvalidPolicy("shrink load factor must be non-zero"));
        }
        if self.shrink_divisor < 2 {
            return Err(TableError::InvalidPolicy("shrink divisor must be at least 2"));
        }
        // A shrink must leave the load strictly below the grow threshold.
        if self.grow_load_factor.saturating_mul(self.shrink_load_factor) <= self.shrink_divisor {
            return Err(TableError::InvalidPolicy(
                "shrink threshold must sit below the grow threshold",
            ));
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn should_grow(&self, count: usize, capacity: usize) -> bool {
        count >= capacity.saturating_mul(self.grow_load_factor)
    }

    #[inline]
    pub(crate) fn grown(&self, capacity: usize) -> usize {
        capacity.saturating_mul(self.grow_multiplier)
    }

    #[inline]
    pub(crate) fn should_shrink(&self, count: usize, capacity: usize) -> bool {
        count <= capacity / self.shrink_load_factor && count > self.initial_capacity
    }

    #[inline]
    pub(crate) fn shrunk(&self, capacity: usize) -> usize {
        (capacity / self.shrink_divisor).max(self.initial_capacity)
    }
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
