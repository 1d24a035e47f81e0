//! Fleet size with its configured upper bound.

use crate::error::{Error, Result};

/// Vehicles allowed in a fleet unless configured otherwise.
pub const DEFAULT_MAX_VEHICLES: usize = 10;

/// A homogeneous fleet of `size` vehicles, all based at the depot.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Fleet;
///
/// let fleet = Fleet::new(3).unwrap();
/// assert_eq!(fleet.size(), 3);
/// assert!(Fleet::new(0).is_err());
/// assert!(Fleet::with_max(12, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fleet {
    size: usize,
}

impl Fleet {
    /// Creates a fleet bounded by [`DEFAULT_MAX_VEHICLES`].
    pub fn new(size: usize) -> Result<Self> {
        Self::with_max(size, DEFAULT_MAX_VEHICLES)
    }

    /// Creates a fleet of `size` vehicles, requiring `1 <= size <= max`.
    pub fn with_max(size: usize, max: usize) -> Result<Self> {
        if size == 0 || size > max {
            return Err(Error::InvalidFleet {
                requested: size,
                max,
            });
        }
        Ok(Self { size })
    }

    /// Number of vehicles.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Vehicle IDs, `0..size`.
    pub fn vehicle_ids(&self) -> std::ops::Range<usize> {
        0..self.size
    }
}
