//! RTree implementation.

use crate::geometry::Rectangle;

use super::rtree_config::RTreeConfig;
use super::rtree_types::{
    DataEntry, DataId, IntegrityReport, Node, NodeId, NodeKind, RTreeStats, SpatialError,
    SpatialResult,
};

/// An in-memory two-dimensional R-Tree of points.
///
/// All nodes live in an arena owned by the tree; parent and child links are
/// [`NodeId`] indices into it. Nodes are never removed.
///
/// # Example
///
/// ```rust
/// use place_rtree::{DataEntry, Interval, RTree, RTreeConfig, Rectangle};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut tree = RTree::new(RTreeConfig::new().with_max_entries(2))?;
/// tree.insert(DataEntry::new(1, 1.0, 1.0))?;
/// tree.insert(DataEntry::new(2, 1.0, 2.0))?;
/// tree.insert(DataEntry::new(3, 2.0, 3.0))?;
///
/// let query = Rectangle::new(Interval::new(1.0, 2.0), Interval::new(2.0, 3.0));
/// let mut ids = tree.search(&query)?;
/// ids.sort();
/// assert_eq!(ids, vec![2, 3]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RTree {
    nodes: Vec<Node>,
    root: NodeId,
    config: RTreeConfig,
    entry_count: u64,
}

impl RTree {
    /// Creates an empty tree. The root starts as an empty branch covering
    /// every coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidArgument`] if the configuration is invalid.
    pub fn new(config: RTreeConfig) -> SpatialResult<Self> {
        config.validate()?;

        Ok(Self {
            nodes: vec![Node::branch(None, Rectangle::MAX)],
            root: NodeId(0),
            config,
            entry_count: 0,
        })
    }

    pub fn config(&self) -> &RTreeConfig {
        &self.config
    }

    /// Current root of the tree. Changes whenever the root splits.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of inserted entries.
    pub fn len(&self) -> u64 {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Number of branch levels between the root and the data leaves,
    /// 0 for an empty tree.
    pub fn height(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }

        let mut height = 1;
        let mut current = self.root;
        while !self.is_leaf_level(current) {
            match self.get(current).children().first() {
                Some(child) => current = *child,
                None => break,
            }
            height += 1;
        }
        height
    }

    pub fn stats(&self) -> RTreeStats {
        RTreeStats {
            total_entries: self.entry_count,
            branch_nodes: self.nodes.iter().filter(|n| n.is_branch()).count() as u64,
            tree_height: self.height(),
            root_children: self.get(self.root).len() as u64,
        }
    }

    /// Inserts a point.
    ///
    /// The entry goes into the leaf-level branch chosen by [`RTree::choose_leaf`];
    /// overflowing branches are split on the way back up and the root is
    /// replaced when it overflows itself.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidArgument`] if a coordinate is not finite.
    /// Validation happens before any node is touched.
    pub fn insert(&mut self, entry: DataEntry) -> SpatialResult<()> {
        entry.validate()?;

        let leaf = self.choose_leaf(&entry.rectangle());
        log::trace!("Inserting entry {} into node {}", entry.id, leaf);

        let data = self.alloc(Node::data(&entry));
        self.add_entry(leaf, data);

        let sibling = if leaf != self.root && self.is_overflow(leaf) {
            Some(self.split(leaf))
        } else {
            None
        };

        self.adjust(leaf, sibling);
        self.adjust_root();

        self.entry_count += 1;
        Ok(())
    }

    /// Finds the ids of entries matching `query`, starting at the root.
    ///
    /// At each leaf-level branch only the first child whose rectangle covers
    /// the query contributes (see [`Rectangle::covers`]); other branches are
    /// descended into whenever their rectangle overlaps the query.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidArgument`] if the query has a NaN bound.
    pub fn search(&self, query: &Rectangle) -> SpatialResult<Vec<DataId>> {
        self.search_from(self.root, query)
    }

    /// Same as [`RTree::search`] but starting at an arbitrary node.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidArgument`] if `node` does not belong to
    /// this tree or the query has a NaN bound.
    pub fn search_from(&self, node: NodeId, query: &Rectangle) -> SpatialResult<Vec<DataId>> {
        self.check_node(node)?;
        if query.has_nan() {
            return Err(SpatialError::InvalidArgument(format!(
                "query rectangle has a NaN bound: {}",
                query
            )));
        }

        let mut results = Vec::new();
        self.search_recursive(node, query, &mut results);
        Ok(results)
    }

    /// Walks the whole tree and checks its structural invariants.
    ///
    /// This verifies:
    /// - parent links match child lists and the root has no parent
    /// - every branch rectangle equals the bounding box of its children
    /// - no branch other than the root exceeds `max_entries`
    /// - branches hold either only data leaves or only branches
    /// - all data leaves sit at the same depth
    pub fn check_integrity(&self) -> IntegrityReport {
        let mut report = IntegrityReport::new();

        if self.get(self.root).parent.is_some() {
            report.fail(format!("root {} has a parent", self.root));
        }

        let mut data_depth: Option<usize> = None;
        let mut data_count = 0u64;
        let mut stack = vec![(self.root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            report.nodes_checked += 1;
            let node = self.get(id);

            let children = match &node.kind {
                NodeKind::Data { .. } => {
                    data_count += 1;
                    match data_depth {
                        None => data_depth = Some(depth),
                        Some(expected) if expected != depth => report.fail(format!(
                            "data leaf {} at depth {}, expected {}",
                            id, depth, expected
                        )),
                        _ => {}
                    }
                    continue;
                }
                NodeKind::Branch { children } => children,
            };

            if id != self.root {
                if children.is_empty() {
                    report.fail(format!("branch {} has no children", id));
                }
                if children.len() > self.config.max_entries() {
                    report.fail(format!(
                        "branch {} holds {} children, max is {}",
                        id,
                        children.len(),
                        self.config.max_entries()
                    ));
                }
            }

            if !children.is_empty() {
                let expected = Rectangle::bounding(children.iter().map(|c| &self.get(*c).rectangle));
                if expected != node.rectangle {
                    report.fail(format!(
                        "branch {} has rectangle {}, children span {}",
                        id, node.rectangle, expected
                    ));
                }

                let data_children = children.iter().filter(|c| self.get(**c).is_data()).count();
                if data_children != 0 && data_children != children.len() {
                    report.fail(format!("branch {} mixes data leaves and branches", id));
                }
            }

            for child in children {
                if self.get(*child).parent != Some(id) {
                    report.fail(format!(
                        "node {} is a child of {} but points to {:?}",
                        child,
                        id,
                        self.get(*child).parent
                    ));
                }
                stack.push((*child, depth + 1));
            }
        }

        if data_count != self.entry_count {
            report.fail(format!(
                "found {} data leaves, expected {}",
                data_count, self.entry_count
            ));
        }

        report
    }

    /// Renders `node` and its subtree for debugging. The format is not stable.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidArgument`] if `node` does not belong to this tree.
    pub fn to_debug_string(&self, node: NodeId, depth: usize) -> SpatialResult<String> {
        self.check_node(node)?;

        let mut out = String::new();
        self.write_debug(node, depth, &mut out);
        Ok(out)
    }

    /// Logs the dump from [`RTree::to_debug_string`] at debug level.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidArgument`] if `node` does not belong to this tree.
    pub fn debug_print(&self, node: NodeId, depth: usize) -> SpatialResult<()> {
        let dump = self.to_debug_string(node, depth)?;
        for line in dump.lines() {
            log::debug!("{}", line);
        }
        Ok(())
    }

    // ========================================================================
    // Arena helpers
    // ========================================================================

    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Appends `child` to `parent`'s children and points `child` back at it.
    pub(crate) fn add_entry(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Branch { children } = &mut self.nodes[parent.0].kind {
            children.push(child);
            self.nodes[child.0].parent = Some(parent);
        }
    }

    /// Empties a branch's child list and hands the old list to the caller.
    pub(crate) fn take_children(&mut self, node: NodeId) -> Vec<NodeId> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Branch { children } => std::mem::take(children),
            NodeKind::Data { .. } => Vec::new(),
        }
    }

    fn check_node(&self, node: NodeId) -> SpatialResult<()> {
        if node.index() >= self.nodes.len() {
            return Err(SpatialError::InvalidArgument(format!(
                "node {} does not belong to this tree",
                node
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Node predicates
    // ========================================================================

    pub(crate) fn is_overflow(&self, node: NodeId) -> bool {
        self.get(node).len() > self.config.max_entries()
    }

    /// True for branches whose children are data leaves, and for an empty root.
    pub(crate) fn is_leaf_level(&self, node: NodeId) -> bool {
        let children = self.get(node).children();
        if children.is_empty() {
            return node == self.root && self.get(node).is_branch();
        }
        children.iter().any(|c| self.get(*c).is_data())
    }

    /// Rebuilds a branch's rectangle from its children. A branch without
    /// children keeps its rectangle.
    pub(crate) fn recompute_rectangle(&mut self, node: NodeId) {
        let children = self.get(node).children();
        if children.is_empty() {
            return;
        }
        let bbox = Rectangle::bounding(children.iter().map(|c| &self.get(*c).rectangle));
        self.nodes[node.0].rectangle = bbox;
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Descends from the root to the leaf-level branch that should receive
    /// a rectangle.
    ///
    /// At every level the child with the strictly largest positive overlap
    /// area wins. Children that do not beat the running maximum compete on
    /// center distance instead, and the nearest one is used when nothing
    /// overlaps with a positive area. Earlier children win ties in both cases.
    pub(crate) fn choose_leaf(&self, rect: &Rectangle) -> NodeId {
        let mut current = self.root;

        while !self.is_leaf_level(current) {
            let children = self.get(current).children();

            let mut best = None;
            let mut max_area = 0.0;
            let mut nearest = None;
            let mut min_distance = f64::INFINITY;

            for child in children {
                let child_rect = &self.get(*child).rectangle;
                let area = child_rect.overlap_area(rect);
                if area > max_area {
                    best = Some(*child);
                    max_area = area;
                } else {
                    let distance = child_rect.distance(rect);
                    if distance < min_distance {
                        nearest = Some(*child);
                        min_distance = distance;
                    }
                }
            }

            match best.or(nearest).or_else(|| children.first().copied()) {
                Some(next) => current = next,
                None => break,
            }
        }

        current
    }

    /// Walks from `node` up to the root, recomputing rectangles and splitting
    /// overflowing non-root parents. `sibling` is the node split off `node`,
    /// if any.
    fn adjust(&mut self, mut node: NodeId, mut sibling: Option<NodeId>) {
        while let Some(parent) = self.get(node).parent {
            self.recompute_rectangle(node);
            if let Some(sibling) = sibling {
                self.recompute_rectangle(sibling);
            }

            sibling = if parent != self.root && self.is_overflow(parent) {
                Some(self.split(parent))
            } else {
                None
            };
            node = parent;
        }
    }

    /// Recomputes the root and grows the tree by one level if it overflows.
    fn adjust_root(&mut self) {
        let old_root = self.root;
        self.recompute_rectangle(old_root);

        if !self.is_overflow(old_root) {
            return;
        }

        let sibling = self.split(old_root);
        self.recompute_rectangle(old_root);
        self.recompute_rectangle(sibling);

        let new_root = self.alloc(Node::branch(None, Rectangle::EMPTY));
        self.add_entry(new_root, old_root);
        self.add_entry(new_root, sibling);

        // A half can only still overflow with max_entries == 1
        let mut idx = 0;
        while let Some(half) = self.get(new_root).children().get(idx).copied() {
            if self.is_overflow(half) {
                let extra = self.split(half);
                self.recompute_rectangle(half);
                self.recompute_rectangle(extra);
            } else {
                idx += 1;
            }
        }

        self.recompute_rectangle(new_root);
        self.root = new_root;

        log::debug!(
            "Root split: new root {} with {} children, old root {}",
            new_root,
            self.get(new_root).len(),
            old_root
        );
    }

    // ========================================================================
    // Search
    // ========================================================================

    fn search_recursive(&self, node: NodeId, query: &Rectangle, results: &mut Vec<DataId>) {
        let children = self.get(node).children();

        if self.is_leaf_level(node) {
            let first = children
                .iter()
                .map(|c| self.get(*c))
                .find(|c| c.rectangle.covers(query))
                .and_then(Node::data_id);
            if let Some(id) = first {
                results.push(id);
            }
            return;
        }

        for child in children {
            if self.get(*child).rectangle.overlaps(query) {
                self.search_recursive(*child, query, results);
            }
        }
    }

    // ========================================================================
    // Debug output
    // ========================================================================

    fn write_debug(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.get(id);
        let indent = depth * 2;

        out.push_str(&format!("{:indent$}{}\n", "", "-".repeat(depth + 1), indent = indent));
        out.push_str(&format!("{:indent$}node {}\n", "", id, indent = indent));
        if let NodeKind::Data { id } = node.kind() {
            out.push_str(&format!("{:indent$}data id {}\n", "", id, indent = indent));
        }
        out.push_str(&format!("{:indent$}rectangle {}\n", "", node.rectangle, indent = indent));
        out.push_str(&format!("{:indent$}depth {}\n", "", depth, indent = indent));
        out.push_str(&format!("{:indent$}children size {}\n", "", node.len(), indent = indent));

        for child in node.children() {
            self.write_debug(*child, depth + 1, out);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
