//! In-memory R-Tree implementation for point indexing.
//!
//! This module provides an R-Tree designed around a node arena with:
//! - Index-based parent and child links (no reference cycles)
//! - Leaf selection by overlap area, falling back to center distance
//! - Linear-cost splitting driven by normalized extreme-pair separation
//! - Bounding-rectangle maintenance propagated up to the root
//!
//! The tree is single-threaded; see [`SharedRTree`](crate::SharedRTree) for a
//! lock-guarded handle.

pub mod rtree_config;
pub mod rtree_constants;
pub mod rtree_split;
pub mod rtree_types;
mod rtree_impl;

pub use rtree_config::RTreeConfig;
pub use rtree_constants::{DEFAULT_MAX_ENTRIES, DIMENSIONS};
pub use rtree_impl::RTree;
pub use rtree_split::farthest_pair;
pub use rtree_types::{
    DataEntry, DataId, IntegrityReport, Node, NodeId, NodeKind, RTreeStats, SpatialError,
    SpatialResult,
};
