//! Minimum spanning tree (Prim).

use super::model::{Graph, GraphError, GraphResult};
use petgraph::graph::NodeIndex;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use tracing::debug;

impl Graph {
    /// Builds a minimum spanning tree with Prim's algorithm.
    ///
    /// Grows the tree from `root`, always taking the lightest edge that
    /// leaves it. Equal weights are broken by the names of the joined
    /// vertices. Only `root`'s component is spanned, so a disconnected
    /// graph yields a tree over part of its vertices.
    ///
    /// # Returns
    ///
    /// A new undirected graph holding the tree. It always contains `root`.
    ///
    /// # Errors
    ///
    /// * [`GraphError::RequiresUndirected`] for directed graphs
    /// * [`GraphError::UnknownVertex`] if `root` is missing
    ///
    /// # Example
    ///
    /// ```rust
    /// use grafo::graph::Graph;
    ///
    /// let mut graph = Graph::undirected();
    /// graph.connect("A", "B", 1.0).unwrap();
    /// graph.connect("B", "C", 2.0).unwrap();
    /// graph.connect("A", "C", 5.0).unwrap();
    ///
    /// let tree = graph.minimum_spanning_tree("A").unwrap();
    /// assert_eq!(tree.size(), 2);
    /// assert_eq!(tree.total_weight(), 3.0);
    /// ```
    pub fn minimum_spanning_tree(&self, root: &str) -> GraphResult<Graph> {
        if self.is_directed() {
            return Err(GraphError::RequiresUndirected);
        }
        let root_idx = self.index_of(root)?;
        debug!(root, "prim");

        let mut tree = Graph::undirected();
        tree.add_vertex(root);

        let mut in_tree = HashSet::from([root_idx]);
        let mut frontier = BinaryHeap::new();
        self.push_frontier(root_idx, &in_tree, &mut frontier);

        while let Some(candidate) = frontier.pop() {
            if in_tree.contains(&candidate.to) {
                continue;
            }
            in_tree.insert(candidate.to);

            let (from, to) = (self.name_of(candidate.from), self.name_of(candidate.to));
            tree.connect(from, to, candidate.weight)?;
            self.push_frontier(candidate.to, &in_tree, &mut frontier);
        }

        debug!(edges = tree.size(), weight = tree.total_weight(), "spanning tree built");
        Ok(tree)
    }

    fn push_frontier<'a>(
        &'a self,
        idx: NodeIndex,
        in_tree: &HashSet<NodeIndex>,
        frontier: &mut BinaryHeap<Candidate<'a>>,
    ) {
        for (next, weight) in self.neighbor_indices(idx) {
            if !in_tree.contains(&next) {
                frontier.push(Candidate {
                    weight,
                    from: idx,
                    to: next,
                    names: (self.name_of(idx), self.name_of(next)),
                });
            }
        }
    }
}

/// Edge leaving the tree, ordered lightest first.
#[derive(Debug)]
struct Candidate<'a> {
    weight: f64,
    from: NodeIndex,
    to: NodeIndex,
    names: (&'a str, &'a str),
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse everything.
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.names.cmp(&self.names))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
