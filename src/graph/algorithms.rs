//! Structural analyses: connectivity, cycles, planarity and traversals.

use super::model::{Graph, GraphKind, GraphResult};
use petgraph::algo::{connected_components, is_cyclic_directed, is_cyclic_undirected, tarjan_scc};
use petgraph::graph::NodeIndex;
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Order in which a traversal visits vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Level by level, nearest vertices first
    #[default]
    BreadthFirst,
    /// Follow each branch to its end before backtracking
    DepthFirst,
}

impl FromStr for TraversalOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfs" | "breadth" | "breadth-first" => Ok(Self::BreadthFirst),
            "dfs" | "depth" | "depth-first" => Ok(Self::DepthFirst),
            _ => Err(format!("Unknown traversal order: {s}. Use bfs or dfs")),
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BreadthFirst => write!(f, "bfs"),
            Self::DepthFirst => write!(f, "dfs"),
        }
    }
}

/// One step of a traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    /// Vertex reached at this step
    pub vertex: String,
    /// Vertex it was reached from, `None` for the start
    pub parent: Option<String>,
    /// Weight of the edge from the parent
    pub weight: Option<f64>,
    /// Number of edges from the start vertex along the tree
    pub depth: usize,
}

/// Result of a traversal: visits in order, each linked to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Traversal {
    pub order: TraversalOrder,
    pub visits: Vec<Visit>,
}

impl Traversal {
    /// Vertex names in visitation order.
    pub fn vertices(&self) -> Vec<&str> {
        self.visits.iter().map(|v| v.vertex.as_str()).collect()
    }

    /// The start vertex, if anything was visited.
    pub fn root(&self) -> Option<&str> {
        self.visits.first().map(|v| v.vertex.as_str())
    }

    /// Visits whose parent is `name`, in visitation order.
    pub fn children_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Visit> + 'a {
        self.visits
            .iter()
            .filter(move |v| v.parent.as_deref() == Some(name))
    }
}

impl Graph {
    /// Checks whether every vertex can reach every other one.
    ///
    /// Directed graphs are tested for weak connectivity. The empty graph
    /// counts as connected.
    pub fn is_connected(&self) -> bool {
        self.is_empty() || connected_components(self.inner()) == 1
    }

    /// Checks strong connectivity.
    ///
    /// For undirected graphs this is the same as [`Graph::is_connected`].
    pub fn is_strongly_connected(&self) -> bool {
        match self.kind() {
            GraphKind::Undirected => self.is_connected(),
            GraphKind::Directed => self.is_empty() || tarjan_scc(self.inner()).len() == 1,
        }
    }

    /// Groups vertices into (weakly) connected components.
    ///
    /// Each group is sorted and groups are ordered by their first vertex.
    pub fn components(&self) -> Vec<Vec<String>> {
        let graph = self.inner();
        let mut sets = UnionFind::new(graph.node_count());
        for edge in graph.edge_references() {
            sets.union(edge.source().index(), edge.target().index());
        }

        let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for idx in graph.node_indices() {
            groups
                .entry(sets.find(idx.index()))
                .or_default()
                .push(self.name_of(idx).to_string());
        }

        let mut components: Vec<Vec<String>> = groups
            .into_values()
            .map(|mut group| {
                group.sort();
                group
            })
            .collect();
        components.sort();
        components
    }

    /// Checks whether the graph contains a cycle.
    ///
    /// Self-loops count as cycles. Directed graphs only report cycles
    /// that follow edge direction.
    pub fn is_cyclic(&self) -> bool {
        match self.kind() {
            GraphKind::Undirected => is_cyclic_undirected(self.inner()),
            GraphKind::Directed => is_cyclic_directed(self.inner()),
        }
    }

    /// Finds one cycle, if any.
    ///
    /// Returns the vertices in order; the last one connects back to the
    /// first. Search starts from vertices in name order and explores
    /// neighbours in name order, so the result is deterministic.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grafo::graph::Graph;
    ///
    /// let mut graph = Graph::undirected();
    /// graph.connect("A", "B", 1.0).unwrap();
    /// graph.connect("B", "C", 1.0).unwrap();
    /// graph.connect("C", "A", 1.0).unwrap();
    ///
    /// assert_eq!(graph.find_cycle(), Some(vec!["A".into(), "B".into(), "C".into()]));
    /// ```
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut search = CycleSearch {
            graph: self,
            visited: HashSet::new(),
            stack: Vec::new(),
            on_stack: HashMap::new(),
        };

        for vertex in self.vertices() {
            let Ok(idx) = self.index_of(&vertex.name) else {
                continue;
            };
            if search.visited.contains(&idx) {
                continue;
            }
            if let Some(cycle) = search.visit(idx) {
                debug!(length = cycle.len(), "cycle found");
                return Some(
                    cycle
                        .into_iter()
                        .map(|i| self.name_of(i).to_string())
                        .collect(),
                );
            }
        }
        None
    }

    /// Tests the edge-count conditions every planar graph satisfies.
    ///
    /// Works on the underlying simple graph: direction and self-loops are
    /// ignored. A graph with `V >= 3` vertices is rejected when
    /// `E > 3V - 6`, or when it has no triangle and `E > 2V - 4`. This
    /// rejects K5 and K3,3 but is a bound, not an embedding test.
    pub fn is_planar(&self) -> bool {
        let v = self.order();
        if v < 3 {
            return true;
        }

        let mut adjacency: BTreeMap<NodeIndex, BTreeSet<NodeIndex>> = BTreeMap::new();
        for edge in self.inner().edge_references() {
            let (a, b) = (edge.source(), edge.target());
            if a == b {
                continue;
            }
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }
        let e = adjacency.values().map(BTreeSet::len).sum::<usize>() / 2;

        if e > 3 * v - 6 {
            return false;
        }

        let has_triangle = adjacency.iter().any(|(a, neighbours)| {
            neighbours.iter().filter(|b| *b > a).any(|b| {
                adjacency
                    .get(b)
                    .is_some_and(|second| second.intersection(neighbours).next().is_some())
            })
        });

        has_triangle || e <= 2 * v - 4
    }

    /// Vertices reachable from `start` in breadth-first order.
    pub fn bfs(&self, start: &str) -> GraphResult<Vec<String>> {
        Ok(self.names(self.traversal_tree(start, TraversalOrder::BreadthFirst)?))
    }

    /// Vertices reachable from `start` in depth-first (preorder) order.
    pub fn dfs(&self, start: &str) -> GraphResult<Vec<String>> {
        Ok(self.names(self.traversal_tree(start, TraversalOrder::DepthFirst)?))
    }

    /// Traverses from `start`, recording how each vertex was reached.
    ///
    /// Neighbours are explored in name order. Directed graphs follow
    /// outgoing arcs only.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`](super::GraphError::UnknownVertex) if
    /// `start` is not in the graph.
    pub fn traversal_tree(&self, start: &str, order: TraversalOrder) -> GraphResult<Traversal> {
        let start_idx = self.index_of(start)?;
        debug!(start, %order, "traversal");

        let visits = match order {
            TraversalOrder::BreadthFirst => self.breadth_first(start_idx),
            TraversalOrder::DepthFirst => self.depth_first(start_idx),
        };
        Ok(Traversal { order, visits })
    }

    fn breadth_first(&self, start: NodeIndex) -> Vec<Visit> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, None, None, 0)]);
        let mut visits = Vec::new();

        while let Some((idx, parent, weight, depth)) = queue.pop_front() {
            for (next, w) in self.neighbor_indices(idx) {
                if seen.insert(next) {
                    queue.push_back((next, Some(idx), Some(w), depth + 1));
                }
            }
            visits.push(self.visit(idx, parent, weight, depth));
        }
        visits
    }

    fn depth_first(&self, start: NodeIndex) -> Vec<Visit> {
        let mut seen = HashSet::new();
        let mut stack = vec![(start, None, None, 0)];
        let mut visits = Vec::new();

        while let Some((idx, parent, weight, depth)) = stack.pop() {
            if !seen.insert(idx) {
                continue;
            }
            // Reversed so the smallest name is popped first.
            for (next, w) in self.neighbor_indices(idx).into_iter().rev() {
                if !seen.contains(&next) {
                    stack.push((next, Some(idx), Some(w), depth + 1));
                }
            }
            visits.push(self.visit(idx, parent, weight, depth));
        }
        visits
    }

    fn visit(
        &self,
        idx: NodeIndex,
        parent: Option<NodeIndex>,
        weight: Option<f64>,
        depth: usize,
    ) -> Visit {
        Visit {
            vertex: self.name_of(idx).to_string(),
            parent: parent.map(|p| self.name_of(p).to_string()),
            weight,
            depth,
        }
    }

    fn names(&self, traversal: Traversal) -> Vec<String> {
        traversal.visits.into_iter().map(|v| v.vertex).collect()
    }
}

struct CycleSearch<'g> {
    graph: &'g Graph,
    visited: HashSet<NodeIndex>,
    /// Current DFS path
    stack: Vec<NodeIndex>,
    /// Position of each vertex on `stack`
    on_stack: HashMap<NodeIndex, usize>,
}

/// A vertex on the DFS path and the neighbours still to explore from it.
struct Frame {
    node: NodeIndex,
    parent: Option<NodeIndex>,
    neighbours: Vec<(NodeIndex, f64)>,
    next: usize,
}

impl CycleSearch<'_> {
    fn enter(&mut self, node: NodeIndex, parent: Option<NodeIndex>) -> Frame {
        self.visited.insert(node);
        self.on_stack.insert(node, self.stack.len());
        self.stack.push(node);
        Frame {
            node,
            parent,
            neighbours: self.graph.neighbor_indices(node),
            next: 0,
        }
    }

    /// Depth-first search from `root` over an explicit frame stack.
    fn visit(&mut self, root: NodeIndex) -> Option<Vec<NodeIndex>> {
        let mut frames = vec![self.enter(root, None)];

        while let Some(frame) = frames.last_mut() {
            let Some(&(next, _)) = frame.neighbours.get(frame.next) else {
                if let Some(done) = frames.pop() {
                    self.stack.pop();
                    self.on_stack.remove(&done.node);
                }
                continue;
            };
            frame.next += 1;
            let (node, parent) = (frame.node, frame.parent);

            if let Some(&pos) = self.on_stack.get(&next) {
                // In an undirected graph the edge back to the parent is the
                // one we arrived by, not a cycle.
                let is_tree_edge = !self.graph.is_directed() && Some(next) == parent;
                if !is_tree_edge {
                    return Some(self.stack[pos..].to_vec());
                }
            } else if !self.visited.contains(&next) {
                let child = self.enter(next, Some(node));
                frames.push(child);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_support::{chain, chain_name};
    use crate::graph::GraphError;

    fn build(kind: GraphKind, edges: &[(&str, &str)]) -> Graph {
        let mut graph = Graph::new(kind);
        for (from, to) in edges {
            graph.connect(from, to, 1.0).unwrap();
        }
        graph
    }

    fn complete(n: usize) -> Graph {
        let names: Vec<String> = (0..n).map(|i| format!("V{i}")).collect();
        let mut graph = Graph::undirected();
        for i in 0..n {
            for j in (i + 1)..n {
                graph.connect(&names[i], &names[j], 1.0).unwrap();
            }
        }
        graph
    }

    #[test]
    fn test_empty_graph_is_connected() {
        assert!(Graph::undirected().is_connected());
        assert!(Graph::directed().is_strongly_connected());
    }

    #[test]
    fn test_connected_and_disconnected() {
        let mut graph = build(GraphKind::Undirected, &[("A", "B"), ("B", "C")]);
        assert!(graph.is_connected());

        graph.add_vertex("D");
        assert!(!graph.is_connected());
        assert_eq!(
            graph.components(),
            vec![
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                vec!["D".to_string()]
            ]
        );
    }

    #[test]
    fn test_directed_weak_and_strong_connectivity() {
        let mut graph = build(GraphKind::Directed, &[("A", "B"), ("B", "C")]);
        assert!(graph.is_connected());
        assert!(!graph.is_strongly_connected());

        graph.connect("C", "A", 1.0).unwrap();
        assert!(graph.is_strongly_connected());
    }

    #[test]
    fn test_tree_is_acyclic() {
        let graph = build(GraphKind::Undirected, &[("A", "B"), ("A", "C"), ("C", "D")]);
        assert!(!graph.is_cyclic());
        assert_eq!(graph.find_cycle(), None);
    }

    #[test]
    fn test_undirected_cycle() {
        let graph = build(
            GraphKind::Undirected,
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "B")],
        );
        assert!(graph.is_cyclic());
        assert_eq!(
            graph.find_cycle(),
            Some(vec!["B".to_string(), "C".to_string(), "D".to_string()])
        );
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let graph = build(GraphKind::Undirected, &[("A", "A")]);
        assert!(graph.is_cyclic());
        assert_eq!(graph.find_cycle(), Some(vec!["A".to_string()]));

        let directed = build(GraphKind::Directed, &[("A", "A")]);
        assert!(directed.is_cyclic());
    }

    #[test]
    fn test_directed_cycle_respects_direction() {
        let dag = build(GraphKind::Directed, &[("A", "B"), ("A", "C"), ("B", "C")]);
        assert!(!dag.is_cyclic());
        assert_eq!(dag.find_cycle(), None);

        let cyclic = build(GraphKind::Directed, &[("A", "B"), ("B", "C"), ("C", "A")]);
        assert!(cyclic.is_cyclic());
        assert_eq!(
            cyclic.find_cycle(),
            Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        );
    }

    #[test]
    fn test_two_way_arcs_form_directed_cycle() {
        let graph = build(GraphKind::Directed, &[("A", "B"), ("B", "A")]);
        assert_eq!(
            graph.find_cycle(),
            Some(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn test_small_graphs_are_planar() {
        assert!(Graph::undirected().is_planar());
        assert!(build(GraphKind::Undirected, &[("A", "B")]).is_planar());
        assert!(complete(4).is_planar());
    }

    #[test]
    fn test_k5_is_not_planar() {
        assert!(!complete(5).is_planar());
    }

    #[test]
    fn test_k33_is_not_planar() {
        let mut graph = Graph::undirected();
        for a in ["A1", "A2", "A3"] {
            for b in ["B1", "B2", "B3"] {
                graph.connect(a, b, 1.0).unwrap();
            }
        }
        assert!(!graph.is_planar());

        // Dropping one edge brings it back under the bipartite bound
        let mut graph = Graph::undirected();
        for a in ["A1", "A2", "A3"] {
            for b in ["B1", "B2", "B3"] {
                if (a, b) != ("A3", "B3") {
                    graph.connect(a, b, 1.0).unwrap();
                }
            }
        }
        assert!(graph.is_planar());
    }

    #[test]
    fn test_planarity_ignores_loops_and_direction() {
        let mut graph = complete(4);
        graph.connect("V0", "V0", 1.0).unwrap();
        assert!(graph.is_planar());

        let directed = build(
            GraphKind::Directed,
            &[("A", "B"), ("B", "A"), ("B", "C"), ("C", "A")],
        );
        assert!(directed.is_planar());
    }

    #[test]
    fn test_bfs_order() {
        let graph = build(
            GraphKind::Undirected,
            &[("A", "C"), ("A", "B"), ("B", "D"), ("C", "E")],
        );
        assert_eq!(graph.bfs("A").unwrap(), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_dfs_order() {
        let graph = build(
            GraphKind::Undirected,
            &[("A", "C"), ("A", "B"), ("B", "D"), ("C", "E")],
        );
        assert_eq!(graph.dfs("A").unwrap(), vec!["A", "B", "D", "C", "E"]);
    }

    #[test]
    fn test_traversal_respects_direction() {
        let graph = build(GraphKind::Directed, &[("A", "B"), ("C", "A")]);
        assert_eq!(graph.bfs("A").unwrap(), vec!["A", "B"]);
        assert_eq!(graph.dfs("B").unwrap(), vec!["B"]);
    }

    #[test]
    fn test_traversal_unknown_start() {
        let graph = build(GraphKind::Undirected, &[("A", "B")]);
        assert_eq!(
            graph.bfs("Z"),
            Err(GraphError::UnknownVertex("Z".to_string()))
        );
    }

    #[test]
    fn test_traversal_tree_links() {
        let mut graph = Graph::undirected();
        graph.connect("A", "B", 2.0).unwrap();
        graph.connect("B", "C", 3.0).unwrap();
        graph.connect("A", "C", 9.0).unwrap();

        let tree = graph.traversal_tree("A", TraversalOrder::DepthFirst).unwrap();
        assert_eq!(tree.root(), Some("A"));
        assert_eq!(tree.vertices(), vec!["A", "B", "C"]);

        let c = &tree.visits[2];
        assert_eq!(c.parent.as_deref(), Some("B"));
        assert_eq!(c.weight, Some(3.0));
        assert_eq!(c.depth, 2);

        let bfs = graph.traversal_tree("A", TraversalOrder::BreadthFirst).unwrap();
        let children: Vec<&str> = bfs.children_of("A").map(|v| v.vertex.as_str()).collect();
        assert_eq!(children, vec!["B", "C"]);
    }

    #[test]
    fn test_traversal_order_parse() {
        assert_eq!("bfs".parse::<TraversalOrder>(), Ok(TraversalOrder::BreadthFirst));
        assert_eq!("DFS".parse::<TraversalOrder>(), Ok(TraversalOrder::DepthFirst));
        assert!("sideways".parse::<TraversalOrder>().is_err());
        assert_eq!(TraversalOrder::DepthFirst.to_string(), "dfs");
    }

    #[test]
    fn test_cycle_search_on_long_chain() {
        let len = 100_000;
        let mut graph = chain(GraphKind::Undirected, len);
        assert!(!graph.is_cyclic());
        assert_eq!(graph.find_cycle(), None);

        graph.connect(&chain_name(len - 1), &chain_name(0), 1.0).unwrap();
        let cycle = graph.find_cycle().unwrap();
        assert_eq!(cycle.len(), len);
        assert_eq!(cycle[0], chain_name(0));
        assert_eq!(cycle[len - 1], chain_name(len - 1));
    }

    #[test]
    fn test_directed_cycle_search_on_long_chain() {
        let len = 100_000;
        let graph = chain(GraphKind::Directed, len);
        assert_eq!(graph.find_cycle(), None);
        assert_eq!(graph.dfs(&chain_name(0)).unwrap().len(), len);
    }
}
