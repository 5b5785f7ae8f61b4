//! Generic rooted tree storage.
//!
//! [`RootedTree`] keeps every node and edge in a contiguous arena and refers to
//! them by index ([`NodeIndex`], [`EdgeIndex`]). The PhyloXML layer stores its
//! clades in a `RootedTree<Clade>`, but nothing in this module knows about
//! PhyloXML.
//!
//! # Structure
//! - Nodes are appended with [`RootedTree::add_node`] and connected with
//!   [`RootedTree::add_edge`]; indices never change once assigned.
//! - A tree has zero or one root. Every node reachable from the root has exactly
//!   one parent edge; the root has none.
//! - Children are kept in insertion order, which for parsed trees is document
//!   order.
//! - Branch lengths live on the edges and are optional.

use std::cmp::Ordering;

mod error;

#[cfg(test)]
mod tests;

pub use error::TreeError;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

/// Index of an edge in a tree (arena).
pub type EdgeIndex = usize;

/// Directed edge from a parent node to one of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    parent: NodeIndex,
    child: NodeIndex,
    /// Branch length; `None` if the source did not specify one
    pub distance: Option<f64>,
}

impl Edge {
    /// Index of the parent node.
    pub fn parent(&self) -> NodeIndex {
        self.parent
    }

    /// Index of the child node.
    pub fn child(&self) -> NodeIndex {
        self.child
    }
}

/// A rooted tree whose nodes carry a payload of type `N`.
#[derive(Debug, Clone, PartialEq)]
pub struct RootedTree<N> {
    nodes: Vec<N>,
    edges: Vec<Edge>,
    parent_edges: Vec<Option<EdgeIndex>>,
    child_edges: Vec<Vec<EdgeIndex>>,
    root: Option<NodeIndex>,
}

impl<N> Default for RootedTree<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Construction
// ============================================================================
impl<N> RootedTree<N> {
    /// Creates an empty tree without a root.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            parent_edges: Vec::new(),
            child_edges: Vec::new(),
            root: None,
        }
    }

    /// Creates an empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            edges: Vec::with_capacity(capacity.saturating_sub(1)),
            parent_edges: Vec::with_capacity(capacity),
            child_edges: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Adds a detached node and returns its index.
    pub fn add_node(&mut self, node: N) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(node);
        self.parent_edges.push(None);
        self.child_edges.push(Vec::new());
        index
    }

    /// Makes `index` the root of the tree.
    ///
    /// # Errors
    /// Fails if the index is unknown, if a root is already set, or if the node
    /// already hangs below a parent.
    pub fn set_root(&mut self, index: NodeIndex) -> Result<(), TreeError> {
        self.check_index(index)?;
        if let Some(root) = self.root {
            return Err(TreeError::RootAlreadySet(root));
        }
        if self.parent_edges[index].is_some() {
            return Err(TreeError::AlreadyHasParent(index));
        }
        self.root = Some(index);
        Ok(())
    }

    /// Connects `child` below `parent` and returns the new edge's index.
    ///
    /// # Errors
    /// Fails if either index is unknown, if `child` already has a parent, if
    /// `child` is the root, or if `child` is `parent` or one of its ancestors.
    pub fn add_edge(
        &mut self,
        parent: NodeIndex,
        child: NodeIndex,
        distance: Option<f64>,
    ) -> Result<EdgeIndex, TreeError> {
        self.check_index(parent)?;
        self.check_index(child)?;
        if self.root == Some(child) {
            return Err(TreeError::RootAsChild(child));
        }
        if self.parent_edges[child].is_some() {
            return Err(TreeError::AlreadyHasParent(child));
        }
        let mut ancestor = Some(parent);
        while let Some(node) = ancestor {
            if node == child {
                return Err(TreeError::WouldCreateCycle { parent, child });
            }
            ancestor = self.parent_edges[node].map(|edge| self.edges[edge].parent);
        }

        let index = self.edges.len();
        self.edges.push(Edge {
            parent,
            child,
            distance,
        });
        self.parent_edges[child] = Some(index);
        self.child_edges[parent].push(index);
        Ok(index)
    }

    fn check_index(&self, index: NodeIndex) -> Result<(), TreeError> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(TreeError::NodeOutOfRange(index))
        }
    }
}

// ============================================================================
// Accessors
// ============================================================================
impl<N> RootedTree<N> {
    /// Index of the root, if one has been set.
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Payload of the root node.
    pub fn root_node(&self) -> Option<&N> {
        self.root.map(|index| &self.nodes[index])
    }

    /// Returns the node at `index`, or `None` if out of range.
    pub fn get(&self, index: NodeIndex) -> Option<&N> {
        self.nodes.get(index)
    }

    /// Returns the node at `index` mutably, or `None` if out of range.
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut N> {
        self.nodes.get_mut(index)
    }

    /// Number of nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the tree holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over `(index, node)` pairs in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &N)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// All edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the edge at `index`.
    pub fn edge(&self, index: EdgeIndex) -> Option<&Edge> {
        self.edges.get(index)
    }

    /// Returns the edge at `index` mutably.
    pub fn edge_mut(&mut self, index: EdgeIndex) -> Option<&mut Edge> {
        self.edges.get_mut(index)
    }

    /// Parent of `index`; `None` for the root and for detached nodes.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.parent_edge(index).map(Edge::parent)
    }

    /// Incoming edge of `index`.
    pub fn parent_edge(&self, index: NodeIndex) -> Option<&Edge> {
        self.parent_edges
            .get(index)
            .copied()
            .flatten()
            .map(|edge| &self.edges[edge])
    }

    /// Index of the incoming edge of `index`.
    pub fn parent_edge_index(&self, index: NodeIndex) -> Option<EdgeIndex> {
        self.parent_edges.get(index).copied().flatten()
    }

    /// Edge connecting `parent` directly to `child`, if any.
    pub fn edge_between(&self, parent: NodeIndex, child: NodeIndex) -> Option<&Edge> {
        self.parent_edge(child).filter(|edge| edge.parent == parent)
    }

    /// Children of `index` in insertion order.
    pub fn children(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.child_edges
            .get(index)
            .into_iter()
            .flatten()
            .map(|&edge| self.edges[edge].child)
    }

    /// Children of `index` ordered by `compare` on their payloads.
    ///
    /// The set of children is the same as [`RootedTree::children`]; only the
    /// order differs. Equal payloads keep insertion order.
    pub fn children_sorted_by<F>(&self, index: NodeIndex, mut compare: F) -> Vec<NodeIndex>
    where
        F: FnMut(&N, &N) -> Ordering,
    {
        let mut children: Vec<NodeIndex> = self.children(index).collect();
        children.sort_by(|&a, &b| compare(&self.nodes[a], &self.nodes[b]));
        children
    }

    /// Number of children of `index`.
    pub fn child_count(&self, index: NodeIndex) -> usize {
        self.child_edges.get(index).map_or(0, Vec::len)
    }

    /// Whether `index` has no children.
    pub fn is_leaf(&self, index: NodeIndex) -> bool {
        self.child_count(index) == 0
    }

    /// First node (in arena order) whose payload satisfies `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<NodeIndex>
    where
        P: FnMut(&N) -> bool,
    {
        self.nodes.iter().position(|node| predicate(node))
    }
}

// ============================================================================
// Traversal and distances
// ============================================================================
impl<N> RootedTree<N> {
    /// Nodes reachable from the root in pre-order (parents before children,
    /// siblings in document order). Empty if no root is set.
    pub fn preorder(&self) -> Vec<NodeIndex> {
        match self.root {
            Some(root) => self.subtree_preorder(root),
            None => Vec::new(),
        }
    }

    /// Leaves reachable from the root, in pre-order.
    pub fn leaves(&self) -> Vec<NodeIndex> {
        self.preorder()
            .into_iter()
            .filter(|&index| self.is_leaf(index))
            .collect()
    }

    /// All nodes below `index` (excluding `index`) in pre-order.
    pub fn descendants(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut nodes = self.subtree_preorder(index);
        if !nodes.is_empty() {
            nodes.remove(0);
        }
        nodes
    }

    /// Ancestors of `index`, nearest first, ending at the root.
    pub fn ancestors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut ancestors = Vec::new();
        let mut current = index;
        while let Some(parent) = self.parent(current) {
            ancestors.push(parent);
            current = parent;
        }
        ancestors
    }

    /// Number of edges between `index` and the top of its subtree.
    pub fn depth(&self, index: NodeIndex) -> usize {
        self.ancestors(index).len()
    }

    /// Deepest node that has both `a` and `b` in its subtree.
    pub fn lowest_common_ancestor(&self, a: NodeIndex, b: NodeIndex) -> Option<NodeIndex> {
        if a >= self.nodes.len() || b >= self.nodes.len() {
            return None;
        }
        let mut path_a = self.ancestors(a);
        path_a.insert(0, a);
        let mut current = Some(b);
        while let Some(node) = current {
            if path_a.contains(&node) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Sum of branch lengths from `index` up to the top of its subtree.
    /// Edges without a distance count as zero.
    pub fn distance_to_root(&self, index: NodeIndex) -> f64 {
        let mut distance = 0.0;
        let mut current = index;
        while let Some(edge) = self.parent_edge(current) {
            distance += edge.distance.unwrap_or(0.0);
            current = edge.parent;
        }
        distance
    }

    /// Path length between two nodes, or `None` if they are not connected.
    pub fn distance(&self, a: NodeIndex, b: NodeIndex) -> Option<f64> {
        let lca = self.lowest_common_ancestor(a, b)?;
        let lca_distance = self.distance_to_root(lca);
        Some(self.distance_to_root(a) - lca_distance + self.distance_to_root(b) - lca_distance)
    }

    /// Sum of all known branch lengths.
    pub fn total_distance(&self) -> f64 {
        self.edges.iter().filter_map(|edge| edge.distance).sum()
    }

    fn subtree_preorder(&self, start: NodeIndex) -> Vec<NodeIndex> {
        if start >= self.nodes.len() {
            return Vec::new();
        }
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            order.push(index);
            // Push in reverse so the first child is visited first
            for &edge in self.child_edges[index].iter().rev() {
                stack.push(self.edges[edge].child);
            }
        }
        order
    }
}

impl<N> std::ops::Index<NodeIndex> for RootedTree<N> {
    type Output = N;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<N> std::ops::IndexMut<NodeIndex> for RootedTree<N> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}
