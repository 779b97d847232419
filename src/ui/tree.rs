//! Tree data structures for traversal and spanning-tree views
//!
//! Provides `TreeNode` for hierarchical data and `FlattenedNode`
//! for rendering the tree line by line with box-drawing prefixes.
//! Trees can be as deep as the graph is long, so every walk here uses an
//! explicit stack.

use std::collections::HashMap;

use crate::graph::{format_weight, Traversal};

/// A node in a traversal tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Vertex name
    pub name: String,
    /// Weight of the edge from the parent, `None` for the root
    pub weight: Option<f64>,
    /// Vertices reached from this one
    pub children: Vec<TreeNode>,
    /// Depth in the tree (0 = root)
    pub depth: usize,
}

impl TreeNode {
    /// Create a new root node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: None,
            children: Vec::new(),
            depth: 0,
        }
    }

    /// Create a node reached over an edge of the given weight
    pub fn with_weight(name: impl Into<String>, weight: f64) -> Self {
        let mut node = Self::new(name);
        node.weight = Some(weight);
        node
    }

    /// Build the tree described by a traversal's parent links
    ///
    /// Children keep visitation order. Returns `None` for an empty traversal.
    pub fn from_traversal(traversal: &Traversal) -> Option<Self> {
        let root = traversal.visits.first()?;
        let position: HashMap<&str, usize> = traversal
            .visits
            .iter()
            .enumerate()
            .map(|(i, visit)| (visit.vertex.as_str(), i))
            .collect();

        // Every visit comes after its parent, so walking backwards finishes
        // each subtree before its parent needs it.
        let mut pending: Vec<Vec<TreeNode>> = vec![Vec::new(); traversal.visits.len()];
        for (i, visit) in traversal.visits.iter().enumerate().skip(1).rev() {
            let mut children = std::mem::take(&mut pending[i]);
            children.reverse();
            let node = TreeNode {
                name: visit.vertex.clone(),
                weight: Some(visit.weight.unwrap_or(0.0)),
                children,
                depth: visit.depth,
            };
            if let Some(&parent) = visit.parent.as_deref().and_then(|p| position.get(p)) {
                pending[parent].push(node);
            }
        }

        let mut children = std::mem::take(&mut pending[0]);
        children.reverse();
        Some(TreeNode {
            name: root.vertex.clone(),
            weight: None,
            children,
            depth: 0,
        })
    }

    /// Add a child node
    pub fn add_child(&mut self, mut child: TreeNode) {
        child.set_depth(self.depth + 1);
        self.children.push(child);
    }

    fn set_depth(&mut self, depth: usize) {
        let mut stack = vec![(self, depth)];
        while let Some((node, depth)) = stack.pop() {
            node.depth = depth;
            stack.extend(node.children.iter_mut().map(|child| (child, depth + 1)));
        }
    }

    /// Pre-order iterator over this subtree
    fn descendants(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Check if this node has children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        self.descendants().count()
    }

    /// Sum of the edge weights in this subtree
    pub fn total_weight(&self) -> f64 {
        self.descendants()
            .skip(1)
            .map(|node| node.weight.unwrap_or(0.0))
            .sum()
    }

    /// Flatten the tree into a list for rendering
    pub fn flatten(&self) -> Vec<FlattenedNode> {
        let mut result = Vec::new();
        let mut stack: Vec<(&TreeNode, bool, Vec<bool>)> = vec![(self, true, Vec::new())];

        while let Some((node, is_last, ancestors)) = stack.pop() {
            // The root draws no branch, so it contributes no column.
            let mut child_ancestors = ancestors.clone();
            if node.depth > 0 {
                child_ancestors.push(is_last);
            }
            let child_count = node.children.len();
            for (i, child) in node.children.iter().enumerate().rev() {
                stack.push((child, i + 1 == child_count, child_ancestors.clone()));
            }

            result.push(FlattenedNode {
                name: node.name.clone(),
                weight: node.weight,
                depth: node.depth,
                is_last_child: is_last,
                ancestors_last: ancestors,
            });
        }
        result
    }
}

impl Drop for TreeNode {
    // Unlinks children iteratively; the derived drop would recurse once
    // per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// A flattened representation of a tree node for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedNode {
    /// Vertex name
    pub name: String,
    /// Edge weight from the parent
    pub weight: Option<f64>,
    /// Depth in the tree
    pub depth: usize,
    /// Whether this is the last child of its parent
    pub is_last_child: bool,
    /// `is_last_child` of each non-root ancestor, outermost first
    pub ancestors_last: Vec<bool>,
}

impl FlattenedNode {
    /// Build the tree prefix (indentation and branch lines)
    pub fn tree_prefix(&self) -> String {
        let mut prefix = String::new();

        for &is_last in &self.ancestors_last {
            if is_last {
                prefix.push_str("    ");
            } else {
                prefix.push_str("│   ");
            }
        }

        if self.depth > 0 {
            if self.is_last_child {
                prefix.push_str("└── ");
            } else {
                prefix.push_str("├── ");
            }
        }

        prefix
    }

    /// Vertex name with the edge weight, e.g. `B (2.0)`
    pub fn label(&self) -> String {
        match self.weight {
            Some(weight) => format!("{} ({})", self.name, format_weight(weight)),
            None => self.name.clone(),
        }
    }

    /// The full rendered line
    pub fn line(&self) -> String {
        format!("{}{}", self.tree_prefix(), self.label())
    }
}
