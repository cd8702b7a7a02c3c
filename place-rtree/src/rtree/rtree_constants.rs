//! Constants for the in-memory R-Tree.

/// Number of dimensions of every rectangle (latitude, longitude)
pub const DIMENSIONS: usize = 2;

/// Default maximum number of children per branch node
pub const DEFAULT_MAX_ENTRIES: usize = 16;

/// Smallest accepted `max_entries`
pub const MIN_MAX_ENTRIES: usize = 1;
