//! Path search: exhaustive simple paths and Dijkstra shortest paths.

use super::model::{format_weight, Edge, Graph, GraphError, GraphResult};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// A walk through the graph: a start vertex followed by weighted hops.
///
/// An empty path (no hops) means origin and destination are the same.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub start: String,
    pub hops: Vec<Edge>,
}

impl Path {
    /// Creates a path with no hops.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            hops: Vec::new(),
        }
    }

    /// All vertices along the path, start included.
    pub fn vertices(&self) -> Vec<&str> {
        std::iter::once(self.start.as_str())
            .chain(self.hops.iter().map(|hop| hop.to.as_str()))
            .collect()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Last vertex of the path.
    pub fn end(&self) -> &str {
        self.hops.last().map_or(self.start.as_str(), |hop| hop.to.as_str())
    }

    pub fn total_weight(&self) -> f64 {
        self.hops.iter().map(|hop| hop.weight).sum()
    }
}

impl fmt::Display for Path {
    /// Formats as `A → B (2.0) → C (3.0)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        for hop in &self.hops {
            write!(f, " → {} ({})", hop.to, format_weight(hop.weight))?;
        }
        Ok(())
    }
}

impl Graph {
    /// Finds every simple path between two vertices.
    ///
    /// Paths never repeat a vertex. They are produced by backtracking in
    /// neighbour-name order, so the output order is stable. Directed graphs
    /// only follow arcs forward.
    ///
    /// # Arguments
    ///
    /// * `from` - Origin vertex
    /// * `to` - Destination vertex
    ///
    /// # Returns
    ///
    /// All paths found. When `from == to` the result is a single empty path.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if either endpoint is missing.
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
    /// let paths = graph.all_paths("A", "C").unwrap();
    /// assert_eq!(paths.len(), 2);
    /// assert_eq!(paths[0].to_string(), "A → B (1.0) → C (2.0)");
    /// ```
    pub fn all_paths(&self, from: &str, to: &str) -> GraphResult<Vec<Path>> {
        let start = self.index_of(from)?;
        let goal = self.index_of(to)?;
        debug!(from, to, "searching all simple paths");

        if start == goal {
            return Ok(vec![Path::new(from)]);
        }

        let mut search = PathSearch {
            graph: self,
            goal,
            on_path: HashSet::from([start]),
            hops: Vec::new(),
            found: Vec::new(),
        };
        search.run(start);

        let paths: Vec<Path> = search
            .found
            .into_iter()
            .map(|hops| Path {
                start: from.to_string(),
                hops,
            })
            .collect();
        debug!(count = paths.len(), "paths found");
        Ok(paths)
    }

    /// Total weight of each path from [`Graph::all_paths`], in the same order.
    pub fn path_weights(&self, from: &str, to: &str) -> GraphResult<Vec<f64>> {
        Ok(self
            .all_paths(from, to)?
            .iter()
            .map(Path::total_weight)
            .collect())
    }

    /// Edge count of each path from [`Graph::all_paths`], in the same order.
    pub fn path_lengths(&self, from: &str, to: &str) -> GraphResult<Vec<usize>> {
        Ok(self.all_paths(from, to)?.iter().map(Path::len).collect())
    }

    /// Finds the lightest path between two vertices with Dijkstra's algorithm.
    ///
    /// Returns `Ok(None)` when `to` is unreachable from `from`.
    ///
    /// # Errors
    ///
    /// * [`GraphError::UnknownVertex`] if either endpoint is missing
    /// * [`GraphError::NegativeWeight`] if any edge weight is below zero
    pub fn shortest_path(&self, from: &str, to: &str) -> GraphResult<Option<Path>> {
        let start = self.index_of(from)?;
        let goal = self.index_of(to)?;

        if let Some(edge) = self.inner().edge_references().find(|e| *e.weight() < 0.0) {
            return Err(GraphError::NegativeWeight {
                from: self.name_of(edge.source()).to_string(),
                to: self.name_of(edge.target()).to_string(),
                weight: *edge.weight(),
            });
        }
        debug!(from, to, "dijkstra");

        let mut dist: HashMap<NodeIndex, f64> = HashMap::from([(start, 0.0)]);
        let mut previous: HashMap<NodeIndex, (NodeIndex, f64)> = HashMap::new();
        let mut settled: HashSet<NodeIndex> = HashSet::new();
        let mut heap = BinaryHeap::from([State {
            cost: 0.0,
            node: start,
        }]);

        while let Some(State { cost, node }) = heap.pop() {
            if !settled.insert(node) {
                continue;
            }
            if node == goal {
                break;
            }

            for (next, weight) in self.neighbor_indices(node) {
                let candidate = cost + weight;
                let better = dist.get(&next).map_or(true, |&known| candidate < known);
                if better && !settled.contains(&next) {
                    dist.insert(next, candidate);
                    previous.insert(next, (node, weight));
                    heap.push(State {
                        cost: candidate,
                        node: next,
                    });
                }
            }
        }

        if !settled.contains(&goal) {
            return Ok(None);
        }

        let mut hops = Vec::new();
        let mut current = goal;
        while let Some(&(prev, weight)) = previous.get(&current) {
            hops.push(Edge::new(self.name_of(prev), self.name_of(current), weight));
            current = prev;
        }
        hops.reverse();

        Ok(Some(Path {
            start: from.to_string(),
            hops,
        }))
    }
}

struct PathSearch<'g> {
    graph: &'g Graph,
    goal: NodeIndex,
    on_path: HashSet<NodeIndex>,
    hops: Vec<Edge>,
    found: Vec<Vec<Edge>>,
}

/// A vertex on the current path and the neighbours still to try from it.
struct Branch {
    node: NodeIndex,
    neighbours: Vec<(NodeIndex, f64)>,
    next: usize,
}

impl PathSearch<'_> {
    fn branch(&self, node: NodeIndex) -> Branch {
        Branch {
            node,
            neighbours: self.graph.neighbor_indices(node),
            next: 0,
        }
    }

    /// Backtracking over an explicit stack; memory grows with path length
    /// on the heap, never on the call stack.
    fn run(&mut self, start: NodeIndex) {
        let mut branches = vec![self.branch(start)];

        while let Some(branch) = branches.last_mut() {
            let Some(&(next, weight)) = branch.neighbours.get(branch.next) else {
                // Exhausted: step back off this vertex
                if let Some(done) = branches.pop() {
                    if !branches.is_empty() {
                        self.on_path.remove(&done.node);
                        self.hops.pop();
                    }
                }
                continue;
            };
            branch.next += 1;
            let current = branch.node;

            if self.on_path.contains(&next) {
                continue;
            }

            self.hops.push(Edge::new(
                self.graph.name_of(current),
                self.graph.name_of(next),
                weight,
            ));
            if next == self.goal {
                self.found.push(self.hops.clone());
                self.hops.pop();
            } else {
                self.on_path.insert(next);
                branches.push(self.branch(next));
            }
        }
    }
}

/// Min-heap entry for Dijkstra.
#[derive(Debug, Clone, Copy)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the cheapest entry first.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
