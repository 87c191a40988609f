//! Forest built from a flat "parent id → children" relation.

use std::collections::{BTreeMap, HashMap};

use tracing::{instrument, warn};

use crate::domain::node::{HierarchyNode, Indexed};

/// Immutable forest derived from an adjacency mapping.
///
/// Roots are the parent identifiers that never occur as a child. Roots and
/// every child list are sorted by identifier (ordinal byte order) once, at
/// construction.
///
/// The input is assumed to be a forest. An identifier listed under several
/// parents is kept under each of them; `parent_of` then reports the first
/// parent in ascending key order.
#[derive(Debug, Clone)]
pub struct HierarchyIndex<T> {
    roots: Vec<HierarchyNode<T>>,
    nodes_by_parent_id: BTreeMap<String, Vec<HierarchyNode<T>>>,
    parent_by_child_id: HashMap<String, String>,
}

impl<T> Default for HierarchyIndex<T> {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            nodes_by_parent_id: BTreeMap::new(),
            parent_by_child_id: HashMap::new(),
        }
    }
}

impl<T: Indexed> HierarchyIndex<T> {
    /// Build the forest. Repeated keys are merged into one child list.
    #[instrument(level = "debug", skip_all)]
    pub fn new<I, K>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<T>)>,
        K: Into<String>,
    {
        let mut nodes_by_parent_id: BTreeMap<String, Vec<HierarchyNode<T>>> = BTreeMap::new();
        for (parent, children) in adjacency {
            nodes_by_parent_id
                .entry(parent.into())
                .or_default()
                .extend(children.into_iter().map(HierarchyNode::child));
        }

        let mut parent_by_child_id = HashMap::new();
        for (parent, children) in nodes_by_parent_id.iter_mut() {
            children.sort_by(|a, b| a.index().cmp(b.index()));
            for child in children.iter() {
                parent_by_child_id
                    .entry(child.index().to_string())
                    .or_insert_with(|| parent.clone());
            }
        }

        // BTreeMap keys come out in ordinal order already
        let roots: Vec<_> = nodes_by_parent_id
            .keys()
            .filter(|key| !parent_by_child_id.contains_key(key.as_str()))
            .cloned()
            .map(HierarchyNode::root)
            .collect();

        tracing::debug!(
            "hierarchy: {} roots, {} parent groups",
            roots.len(),
            nodes_by_parent_id.len()
        );

        Self {
            roots,
            nodes_by_parent_id,
            parent_by_child_id,
        }
    }
}

impl<T> HierarchyIndex<T> {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn roots(&self) -> &[HierarchyNode<T>] {
        &self.roots
    }

    pub fn nodes_by_parent_id(&self) -> &BTreeMap<String, Vec<HierarchyNode<T>>> {
        &self.nodes_by_parent_id
    }

    /// Children of `node`, sorted.
    ///
    /// `None` when the identifier is not a parent key at all, which is not the
    /// same as a key holding an empty list.
    pub fn children_of<N: Indexed + ?Sized>(&self, node: &N) -> Option<&[HierarchyNode<T>]> {
        self.nodes_by_parent_id
            .get(node.index())
            .map(|children| children.as_slice())
    }

    /// Identifier of the parent listing `node` as a child.
    ///
    /// Roots and unknown identifiers both yield `None`.
    pub fn parent_of<N: Indexed + ?Sized>(&self, node: &N) -> Option<&str> {
        self.parent_by_child_id
            .get(node.index())
            .map(|parent| parent.as_str())
    }

    /// Root of the tree containing `node`, or `None` if `node` is not part of
    /// the structure.
    pub fn root_of<N: Indexed + ?Sized>(&self, node: &N) -> Option<&HierarchyNode<T>> {
        let mut current = node.index();
        // a walk longer than the number of stored children can only be a cycle
        for _ in 0..=self.parent_by_child_id.len() {
            if let Some(root) = self.root_by_index(current) {
                return Some(root);
            }
            current = self.parent_of(current)?;
        }
        warn!("parent chain of '{}' does not reach a root", node.index());
        None
    }

    /// True if `node` is a root or a stored child.
    pub fn contains<N: Indexed + ?Sized>(&self, node: &N) -> bool {
        self.root_by_index(node.index()).is_some()
            || self.parent_by_child_id.contains_key(node.index())
    }

    /// Total number of stored children. Synthetic roots are not counted.
    pub fn node_count(&self) -> usize {
        self.nodes_by_parent_id.values().map(Vec::len).sum()
    }

    /// Depth-first pre-order traversal.
    pub fn iter(&self) -> PreOrderIter<'_, T> {
        PreOrderIter::new(self)
    }

    /// Visit every node in pre-order: a root, its subtree, then the next root.
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(&HierarchyNode<T>),
    {
        for (_, node) in self.iter() {
            visitor(node);
        }
    }

    /// Number of levels of the deepest tree, 0 for an empty forest.
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    /// Identifiers without children, in traversal order.
    pub fn leaves(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| self.children_of(*node).map_or(true, <[_]>::is_empty))
            .map(|(_, node)| node.index())
            .collect()
    }

    fn root_by_index(&self, index: &str) -> Option<&HierarchyNode<T>> {
        self.roots
            .binary_search_by(|root| root.index().cmp(index))
            .ok()
            .map(|pos| &self.roots[pos])
    }
}

/// Pre-order iterator yielding `(depth, node)`, roots at depth 0.
///
/// Uses an explicit stack. A child whose identifier is already on the
/// current ancestor path is skipped, so cyclic input still terminates.
pub struct PreOrderIter<'a, T> {
    index: &'a HierarchyIndex<T>,
    stack: Vec<(usize, &'a HierarchyNode<T>)>,
    path: Vec<&'a str>,
}

impl<'a, T> PreOrderIter<'a, T> {
    fn new(index: &'a HierarchyIndex<T>) -> Self {
        let stack = index.roots.iter().rev().map(|root| (0, root)).collect();
        Self {
            index,
            stack,
            path: Vec::new(),
        }
    }
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = (usize, &'a HierarchyNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, node)) = self.stack.pop() {
            self.path.truncate(depth);
            if self.path.contains(&node.index()) {
                warn!("cycle at '{}', subtree skipped", node.index());
                continue;
            }
            self.path.push(node.index());

            if let Some(children) = self.index.children_of(node) {
                // reversed so the smallest identifier is popped first
                for child in children.iter().rev() {
                    self.stack.push((depth + 1, child));
                }
            }
            return Some((depth, node));
        }
        None
    }
}
