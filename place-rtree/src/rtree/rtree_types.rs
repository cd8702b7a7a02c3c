//! Core types of the in-memory R-Tree.
//!
//! This module defines the fundamental types used throughout the R-Tree:
//! - Error types and result types
//! - Arena node types (branch and data leaf)
//! - Statistics and integrity report structures

use crate::geometry::Rectangle;
use std::fmt::{Display, Formatter};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur in spatial indexing operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpatialError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for spatial operations
pub type SpatialResult<T> = Result<T, SpatialError>;

/// Externally supplied identifier stored in a data leaf
pub type DataId = u64;

// ============================================================================
// Node Types
// ============================================================================

/// Stable index of a node inside the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.index())
    }
}

/// What a node holds: children or a single data identifier, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Internal node owning an ordered list of children
    Branch { children: Vec<NodeId> },
    /// Data leaf holding one identifier
    Data { id: DataId },
}

/// A node stored in the tree's arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) rectangle: Rectangle,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn branch(parent: Option<NodeId>, rectangle: Rectangle) -> Self {
        Self {
            rectangle,
            parent,
            kind: NodeKind::Branch {
                children: Vec::new(),
            },
        }
    }

    pub(crate) fn data(entry: &DataEntry) -> Self {
        Self {
            rectangle: entry.rectangle(),
            parent: None,
            kind: NodeKind::Data { id: entry.id },
        }
    }

    pub fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Children of a branch; empty for a data leaf.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Branch { children } => children,
            NodeKind::Data { .. } => &[],
        }
    }

    /// Identifier of a data leaf; `None` for a branch.
    pub fn data_id(&self) -> Option<DataId> {
        match self.kind {
            NodeKind::Data { id } => Some(id),
            NodeKind::Branch { .. } => None,
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self.kind, NodeKind::Data { .. })
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.kind, NodeKind::Branch { .. })
    }

    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A point waiting to be inserted into the tree.
///
/// Dimension 0 of its rectangle is `lat`, dimension 1 is `lon`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataEntry {
    pub id: DataId,
    pub lat: f64,
    pub lon: f64,
}

impl DataEntry {
    pub fn new(id: DataId, lat: f64, lon: f64) -> Self {
        Self { id, lat, lon }
    }

    /// The degenerate rectangle this entry occupies.
    pub fn rectangle(&self) -> Rectangle {
        Rectangle::point(self.lat, self.lon)
    }

    pub(crate) fn validate(&self) -> SpatialResult<()> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(SpatialError::InvalidArgument(format!(
                "entry {} has non-finite coordinates ({}, {})",
                self.id, self.lat, self.lon
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Statistics about the R-Tree's shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RTreeStats {
    pub total_entries: u64,
    pub branch_nodes: u64,
    pub tree_height: u32,
    pub root_children: u64,
}

/// Result of walking the whole tree and checking its structural invariants
#[derive(Debug, Clone)]
pub struct IntegrityReport {
    pub is_valid: bool,
    pub nodes_checked: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            nodes_checked: 0,
            errors: Vec::new(),
        }
    }

    pub(crate) fn fail(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }
}

impl Default for IntegrityReport {
    fn default() -> Self {
        Self::new()
    }
}
