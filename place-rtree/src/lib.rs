//! # Place R-Tree - In-Memory Point Index
//!
//! This crate provides a two-dimensional R-Tree over points, with a
//! linear-cost node split and rectangle range search.
//!
//! ## Features
//!
//! - **Arena Nodes**: Parent and child links are indices, never cycles
//! - **Leaf Choice**: Largest overlap area first, nearest center otherwise
//! - **Linear Split**: Extreme-pair seeds chosen by normalized separation
//! - **Root Growth**: The tree gains a level whenever the root overflows
//! - **Integrity Checks**: Walk the tree and report broken invariants
//! - **Shared Handle**: Reader-writer locked wrapper for multi-threaded use
//!
//! ## R-Tree API
//!
//! ```rust
//! use place_rtree::{DataEntry, Interval, RTree, RTreeConfig, Rectangle};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = RTree::new(RTreeConfig::new().with_max_entries(4))?;
//!
//! // Add entries
//! tree.insert(DataEntry::new(1, 35.681, 139.767))?;
//! tree.insert(DataEntry::new(2, 34.985, 135.758))?;
//!
//! // Find entries
//! let query = Rectangle::new(Interval::new(35.0, 36.0), Interval::new(139.0, 140.0));
//! let results = tree.search(&query)?;
//! assert_eq!(results, vec![1]);
//! # Ok(())
//! # }
//! ```

pub mod geometry;
pub mod rtree;
pub mod shared;

// Re-export geometry types
pub use geometry::{Interval, Rectangle};

// Re-export R-Tree types
pub use rtree::{
    farthest_pair, DataEntry, DataId, IntegrityReport, Node, NodeId, NodeKind, RTree, RTreeConfig,
    RTreeStats, SpatialError, SpatialResult, DEFAULT_MAX_ENTRIES, DIMENSIONS,
};

pub use shared::SharedRTree;
