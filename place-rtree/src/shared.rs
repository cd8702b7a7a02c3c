//! Thread-safe handle around an [`RTree`].
//!
//! The tree itself takes no locks. `SharedRTree` wraps it in a reader-writer
//! lock so that insertions are exclusive while searches may run in parallel.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::geometry::Rectangle;
use crate::rtree::{
    DataEntry, DataId, IntegrityReport, RTree, RTreeConfig, RTreeStats, SpatialResult,
};

/// A cloneable, thread-safe R-Tree handle.
///
/// # Example
///
/// ```rust
/// use place_rtree::{DataEntry, RTreeConfig, Rectangle, SharedRTree};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tree = SharedRTree::new(RTreeConfig::new())?;
/// let writer = tree.clone();
/// std::thread::spawn(move || writer.insert(DataEntry::new(1, 35.0, 139.0)))
///     .join()
///     .expect("writer thread panicked")?;
///
/// assert_eq!(tree.search(&Rectangle::point(35.0, 139.0))?, vec![1]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SharedRTree {
    inner: Arc<RwLock<RTree>>,
}

impl SharedRTree {
    /// Creates a handle around a new empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: RTreeConfig) -> SpatialResult<Self> {
        Ok(Self::from_tree(RTree::new(config)?))
    }

    pub fn from_tree(tree: RTree) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Inserts under the write lock.
    pub fn insert(&self, entry: DataEntry) -> SpatialResult<()> {
        self.inner.write().insert(entry)
    }

    /// Inserts a batch under a single write lock, stopping at the first error.
    pub fn insert_all<I>(&self, entries: I) -> SpatialResult<()>
    where
        I: IntoIterator<Item = DataEntry>,
    {
        let mut tree = self.inner.write();
        for entry in entries {
            tree.insert(entry)?;
        }
        Ok(())
    }

    /// Searches under the read lock.
    pub fn search(&self, query: &Rectangle) -> SpatialResult<Vec<DataId>> {
        self.inner.read().search(query)
    }

    /// Runs `f` with shared access to the tree.
    pub fn with_tree<R>(&self, f: impl FnOnce(&RTree) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn len(&self) -> u64 {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> RTreeStats {
        self.inner.read().stats()
    }

    pub fn check_integrity(&self) -> IntegrityReport {
        self.inner.read().check_integrity()
    }
}

impl std::fmt::Debug for SharedRTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRTree")
            .field("entries", &self.len())
            .finish()
    }
}
