//! R-Tree configuration.

use serde::{Deserialize, Serialize};

use super::rtree_constants::{DEFAULT_MAX_ENTRIES, MIN_MAX_ENTRIES};
use super::rtree_types::{SpatialError, SpatialResult};

/// Tuning parameters of an [`RTree`](super::RTree).
///
/// # Example
///
/// ```rust
/// use place_rtree::RTreeConfig;
///
/// let config = RTreeConfig::new().with_max_entries(8);
/// assert_eq!(config.max_entries(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RTreeConfig {
    /// Children a branch may hold before it has to split.
    max_entries: usize,
}

impl RTreeConfig {
    /// Creates a configuration with default values.
    ///
    /// Defaults:
    /// - Max entries: 16
    #[inline]
    pub fn new() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Returns the maximum number of children per branch.
    #[inline]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Sets the maximum number of children per branch.
    #[inline]
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries;
    }

    /// Sets the maximum number of children per branch.
    /// Builder-style method for chaining.
    #[inline]
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.set_max_entries(max_entries);
        self
    }

    /// Checks the configuration before a tree is built from it.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidArgument`] if `max_entries` is zero.
    pub fn validate(&self) -> SpatialResult<()> {
        if self.max_entries < MIN_MAX_ENTRIES {
            return Err(SpatialError::InvalidArgument(format!(
                "max_entries must be at least {}, got {}",
                MIN_MAX_ENTRIES, self.max_entries
            )));
        }
        Ok(())
    }
}

impl Default for RTreeConfig {
    fn default() -> Self {
        Self::new()
    }
}
