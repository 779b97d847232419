//! Weighted graph implementation using petgraph.
//!
//! Provides a graph structure addressed by vertex name, with a single
//! weighted edge per vertex pair. The same store backs directed and
//! undirected graphs; the [`GraphKind`] decides how edges are read.

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Weight assigned to edges declared without one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Errors produced by graph operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// The named vertex does not exist in the graph.
    #[error("Vertex not found: {0}")]
    UnknownVertex(String),

    /// The two vertices exist but share no edge.
    #[error("Vertices are not adjacent: {from} -> {to}")]
    NotAdjacent { from: String, to: String },

    /// Edge weights must be finite numbers.
    #[error("Invalid edge weight: {0}")]
    InvalidWeight(f64),

    /// Shortest paths are only defined for non-negative weights.
    #[error("Negative edge weight {weight} on {from} -> {to}")]
    NegativeWeight { from: String, to: String, weight: f64 },

    /// The operation is only defined on undirected graphs.
    #[error("Operation requires an undirected graph")]
    RequiresUndirected,
}

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Whether edges have a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    /// Edges connect both endpoints symmetrically
    #[default]
    Undirected,
    /// Edges point from their origin to their destination
    Directed,
}

impl GraphKind {
    /// Returns the kind matching a `directed` flag.
    pub fn from_directed(directed: bool) -> Self {
        if directed {
            Self::Directed
        } else {
            Self::Undirected
        }
    }

    /// Connector used when printing an edge of this kind.
    pub fn connector(&self) -> &'static str {
        match self {
            Self::Undirected => "--",
            Self::Directed => "->",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undirected => write!(f, "undirected"),
            Self::Directed => write!(f, "directed"),
        }
    }
}

/// A named vertex.
///
/// Vertices are ordered by name, and `Display` honours width and
/// alignment flags so they can be padded in tables.
///
/// ```rust
/// use grafo::graph::Vertex;
///
/// let v = Vertex::new("A");
/// assert_eq!(format!("{v}"), "A");
/// assert_eq!(format!("{v:3}|"), "A  |");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    /// Unique vertex name
    pub name: String,
}

impl Vertex {
    /// Creates a new vertex.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name)
    }
}

/// A weighted edge between two named vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Origin vertex name
    pub from: String,
    /// Destination vertex name
    pub to: String,
    /// Edge weight
    pub weight: f64,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// Returns true if both endpoints are the same vertex.
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Formats a weight the way every report prints it.
///
/// Whole numbers keep one decimal place (`2.0`), other values print
/// as-is (`2.25`).
pub fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 && weight.is_finite() {
        format!("{weight:.1}")
    } else {
        format!("{weight}")
    }
}

/// A weighted graph addressed by vertex name.
///
/// Uses petgraph's `DiGraph` internally. For undirected graphs each edge is
/// stored once and read in both directions.
///
/// # Example
///
/// ```rust
/// use grafo::graph::Graph;
///
/// let mut graph = Graph::undirected();
/// graph.add_vertex("A");
/// graph.add_vertex("B");
/// graph.add_edge("A", "B", 2.5).unwrap();
///
/// assert_eq!(graph.order(), 2);
/// assert_eq!(graph.size(), 1);
/// assert_eq!(graph.weight("B", "A").unwrap(), 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    /// The underlying petgraph store
    graph: DiGraph<Vertex, f64>,
    /// Maps vertex names to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
    kind: GraphKind,
}

impl Default for Graph {
    fn default() -> Self {
        Self::undirected()
    }
}

impl Graph {
    /// Creates a new empty graph of the given kind.
    pub fn new(kind: GraphKind) -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            kind,
        }
    }

    /// Creates a new empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    /// Creates a new empty directed graph.
    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    /// Creates a new graph with pre-allocated capacity.
    pub fn with_capacity(kind: GraphKind, vertices: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(vertices, edges),
            node_indices: HashMap::with_capacity(vertices),
            kind,
        }
    }

    /// Returns the kind of this graph.
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Returns true for directed graphs.
    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    /// Adds a vertex to the graph.
    ///
    /// If a vertex with the same name already exists, returns its
    /// existing node index without modification.
    pub fn add_vertex(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(name) {
            return idx;
        }

        let idx = self.graph.add_node(Vertex::new(name));
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    /// Adds a weighted edge between two existing vertices.
    ///
    /// If the pair is already adjacent, its weight is replaced. In an
    /// undirected graph `(a, b)` and `(b, a)` are the same pair.
    ///
    /// # Errors
    ///
    /// * [`GraphError::InvalidWeight`] if `weight` is NaN or infinite
    /// * [`GraphError::UnknownVertex`] if either endpoint is missing
    ///
    /// # Example
    ///
    /// ```rust
    /// use grafo::graph::{Graph, GraphError};
    ///
    /// let mut graph = Graph::undirected();
    /// graph.add_vertex("A");
    ///
    /// let err = graph.add_edge("A", "Z", 1.0).unwrap_err();
    /// assert_eq!(err, GraphError::UnknownVertex("Z".to_string()));
    /// ```
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> GraphResult<()> {
        if !weight.is_finite() {
            return Err(GraphError::InvalidWeight(weight));
        }
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;

        match self.find_edge(from_idx, to_idx) {
            Some(edge) => self.graph[edge] = weight,
            None => {
                self.graph.add_edge(from_idx, to_idx, weight);
            }
        }
        Ok(())
    }

    /// Adds a weighted edge, creating missing endpoints first.
    pub fn connect(&mut self, from: &str, to: &str, weight: f64) -> GraphResult<()> {
        if !weight.is_finite() {
            return Err(GraphError::InvalidWeight(weight));
        }
        self.add_vertex(from);
        self.add_vertex(to);
        self.add_edge(from, to, weight)
    }

    /// Gets the weight of the edge between two vertices.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] for a missing endpoint and
    /// [`GraphError::NotAdjacent`] when no edge joins them.
    pub fn weight(&self, from: &str, to: &str) -> GraphResult<f64> {
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;

        self.find_edge(from_idx, to_idx)
            .map(|edge| self.graph[edge])
            .ok_or_else(|| GraphError::NotAdjacent {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    /// Gets the neighbours of a vertex with the connecting weights.
    ///
    /// Neighbours are sorted by name. Directed graphs only report
    /// outgoing arcs. An unknown vertex has no neighbours.
    pub fn neighbors(&self, name: &str) -> Vec<(&str, f64)> {
        let Some(&idx) = self.node_indices.get(name) else {
            return Vec::new();
        };

        self.neighbor_indices(idx)
            .into_iter()
            .map(|(next, weight)| (self.name_of(next), weight))
            .collect()
    }

    /// Returns the degree of a vertex.
    ///
    /// Counts incident edges; a self-loop contributes two. For directed
    /// graphs this is in-degree plus out-degree.
    pub fn degree(&self, name: &str) -> Option<usize> {
        let &idx = self.node_indices.get(name)?;
        Some(
            self.graph.edges_directed(idx, Direction::Outgoing).count()
                + self.graph.edges_directed(idx, Direction::Incoming).count(),
        )
    }

    /// Returns the number of arcs entering a vertex.
    pub fn in_degree(&self, name: &str) -> Option<usize> {
        let &idx = self.node_indices.get(name)?;
        Some(self.graph.edges_directed(idx, Direction::Incoming).count())
    }

    /// Returns the number of arcs leaving a vertex.
    pub fn out_degree(&self, name: &str) -> Option<usize> {
        let &idx = self.node_indices.get(name)?;
        Some(self.graph.edges_directed(idx, Direction::Outgoing).count())
    }

    /// Returns every vertex with its degree, sorted by name.
    pub fn degrees(&self) -> Vec<(String, usize)> {
        self.vertices()
            .into_iter()
            .map(|v| (v.name.clone(), self.degree(&v.name).unwrap_or(0)))
            .collect()
    }

    /// Gets a vertex by name.
    pub fn get_vertex(&self, name: &str) -> Option<&Vertex> {
        self.node_indices
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Returns all vertices sorted by name.
    pub fn vertices(&self) -> Vec<&Vertex> {
        let mut vertices: Vec<&Vertex> = self.graph.node_weights().collect();
        vertices.sort();
        vertices
    }

    /// Returns all vertex names sorted.
    pub fn vertex_names(&self) -> Vec<&str> {
        self.vertices().into_iter().map(|v| v.name.as_str()).collect()
    }

    /// Returns all edges sorted by `(from, to)`.
    ///
    /// Undirected edges are reported once, with the smaller name first.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .graph
            .edge_references()
            .map(|edge| {
                let mut from = self.name_of(edge.source());
                let mut to = self.name_of(edge.target());
                if !self.is_directed() && to < from {
                    std::mem::swap(&mut from, &mut to);
                }
                Edge::new(from, to, *edge.weight())
            })
            .collect();
        edges.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.to.cmp(&b.to)));
        edges
    }

    /// Returns the number of vertices (the order of the graph).
    pub fn order(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges (the size of the graph).
    pub fn size(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Checks if a vertex exists in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    /// Checks if an edge joins the two vertices.
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.weight(from, to).is_ok()
    }

    /// Sum of all edge weights, each edge counted once.
    pub fn total_weight(&self) -> f64 {
        self.graph.edge_weights().sum()
    }

    /// Mean edge weight, or zero for a graph without edges.
    pub fn mean_weight(&self) -> f64 {
        if self.size() == 0 {
            0.0
        } else {
            self.total_weight() / self.size() as f64
        }
    }

    pub(crate) fn inner(&self) -> &DiGraph<Vertex, f64> {
        &self.graph
    }

    pub(crate) fn index_of(&self, name: &str) -> GraphResult<NodeIndex> {
        self.node_indices
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(name.to_string()))
    }

    pub(crate) fn name_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].name
    }

    /// Neighbour indices sorted by vertex name.
    pub(crate) fn neighbor_indices(&self, idx: NodeIndex) -> Vec<(NodeIndex, f64)> {
        let mut result: Vec<(NodeIndex, f64)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (edge.target(), *edge.weight()))
            .collect();

        if !self.is_directed() {
            // Self-loops were already reported on the outgoing side.
            result.extend(
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .filter(|edge| edge.source() != idx)
                    .map(|edge| (edge.source(), *edge.weight())),
            );
        }

        result.sort_by(|a, b| self.name_of(a.0).cmp(self.name_of(b.0)));
        result
    }

    fn find_edge(&self, from: NodeIndex, to: NodeIndex) -> Option<EdgeIndex> {
        match self.kind {
            GraphKind::Directed => self.graph.find_edge(from, to),
            GraphKind::Undirected => self
                .graph
                .find_edge_undirected(from, to)
                .map(|(edge, _)| edge),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut graph = Graph::undirected();
        graph.connect("A", "B", 2.5).unwrap();
        graph.connect("A", "C", 1.0).unwrap();
        graph.connect("B", "C", 3.0).unwrap();
        graph
    }

    #[test]
    fn test_create_empty_graph() {
        let graph = Graph::new(GraphKind::Undirected);
        assert_eq!(graph.order(), 0);
        assert_eq!(graph.size(), 0);
        assert!(graph.is_empty());
        assert_eq!(graph.mean_weight(), 0.0);
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph = Graph::undirected();
        let idx = graph.add_vertex("A");
        let idx2 = graph.add_vertex("A");

        assert_eq!(idx, idx2);
        assert_eq!(graph.order(), 1);
        assert!(graph.contains("A"));
    }

    #[test]
    fn test_add_edge_requires_vertices() {
        let mut graph = Graph::undirected();
        graph.add_vertex("A");

        assert_eq!(
            graph.add_edge("A", "B", 1.0),
            Err(GraphError::UnknownVertex("B".to_string()))
        );
        assert_eq!(
            graph.add_edge("X", "A", 1.0),
            Err(GraphError::UnknownVertex("X".to_string()))
        );
        assert_eq!(graph.size(), 0);
    }

    #[test]
    fn test_add_edge_rejects_non_finite_weight() {
        let mut graph = Graph::undirected();
        graph.add_vertex("A");
        graph.add_vertex("B");

        assert!(matches!(
            graph.add_edge("A", "B", f64::NAN),
            Err(GraphError::InvalidWeight(_))
        ));
        assert!(matches!(
            graph.connect("C", "D", f64::INFINITY),
            Err(GraphError::InvalidWeight(_))
        ));
        // Rejected before any vertex is created
        assert!(!graph.contains("C"));
    }

    #[test]
    fn test_undirected_edge_is_symmetric() {
        let graph = triangle();

        assert_eq!(graph.weight("A", "B").unwrap(), 2.5);
        assert_eq!(graph.weight("B", "A").unwrap(), 2.5);
        assert!(graph.contains_edge("C", "A"));
    }

    #[test]
    fn test_re_adding_edge_replaces_weight() {
        let mut graph = triangle();
        graph.add_edge("B", "A", 7.0).unwrap();

        assert_eq!(graph.size(), 3);
        assert_eq!(graph.weight("A", "B").unwrap(), 7.0);
    }

    #[test]
    fn test_directed_edges_have_orientation() {
        let mut graph = Graph::directed();
        graph.connect("A", "B", 1.0).unwrap();
        graph.connect("B", "A", 4.0).unwrap();

        assert_eq!(graph.size(), 2);
        assert_eq!(graph.weight("A", "B").unwrap(), 1.0);
        assert_eq!(graph.weight("B", "A").unwrap(), 4.0);

        graph.add_vertex("C");
        graph.connect("A", "C", 1.0).unwrap();
        assert_eq!(
            graph.weight("C", "A"),
            Err(GraphError::NotAdjacent {
                from: "C".to_string(),
                to: "A".to_string()
            })
        );
    }

    #[test]
    fn test_neighbors_sorted_with_weights() {
        let mut graph = Graph::undirected();
        graph.connect("A", "D", 4.0).unwrap();
        graph.connect("C", "A", 3.0).unwrap();
        graph.connect("A", "B", 2.0).unwrap();

        assert_eq!(
            graph.neighbors("A"),
            vec![("B", 2.0), ("C", 3.0), ("D", 4.0)]
        );
        assert_eq!(graph.neighbors("C"), vec![("A", 3.0)]);
        assert!(graph.neighbors("missing").is_empty());
    }

    #[test]
    fn test_directed_neighbors_are_outgoing() {
        let mut graph = Graph::directed();
        graph.connect("A", "B", 1.0).unwrap();
        graph.connect("C", "A", 1.0).unwrap();

        assert_eq!(graph.neighbors("A"), vec![("B", 1.0)]);
        assert!(graph.neighbors("B").is_empty());
    }

    #[test]
    fn test_degree() {
        let mut graph = triangle();
        graph.add_vertex("D");

        assert_eq!(graph.degree("A"), Some(2));
        assert_eq!(graph.degree("D"), Some(0));
        assert_eq!(graph.degree("missing"), None);
        assert_eq!(
            graph.degrees(),
            vec![
                ("A".to_string(), 2),
                ("B".to_string(), 2),
                ("C".to_string(), 2),
                ("D".to_string(), 0)
            ]
        );
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let mut graph = Graph::undirected();
        graph.connect("A", "A", 1.0).unwrap();

        assert_eq!(graph.degree("A"), Some(2));
        assert_eq!(graph.neighbors("A"), vec![("A", 1.0)]);
        assert!(graph.edges()[0].is_loop());
    }

    #[test]
    fn test_directed_in_out_degree() {
        let mut graph = Graph::directed();
        graph.connect("A", "B", 1.0).unwrap();
        graph.connect("C", "B", 1.0).unwrap();

        assert_eq!(graph.in_degree("B"), Some(2));
        assert_eq!(graph.out_degree("B"), Some(0));
        assert_eq!(graph.degree("B"), Some(2));
    }

    #[test]
    fn test_edges_sorted_and_normalized() {
        let mut graph = Graph::undirected();
        graph.connect("C", "A", 3.0).unwrap();
        graph.connect("B", "A", 2.0).unwrap();

        let edges = graph.edges();
        assert_eq!(edges[0], Edge::new("A", "B", 2.0));
        assert_eq!(edges[1], Edge::new("A", "C", 3.0));
    }

    #[test]
    fn test_vertices_sorted() {
        let mut graph = Graph::undirected();
        graph.add_vertex("C");
        graph.add_vertex("A");
        graph.add_vertex("B");

        assert_eq!(graph.vertex_names(), vec!["A", "B", "C"]);
        assert_eq!(graph.get_vertex("B"), Some(&Vertex::new("B")));
    }

    #[test]
    fn test_weight_totals() {
        let graph = triangle();
        assert!((graph.total_weight() - 6.5).abs() < f64::EPSILON);
        assert!((graph.mean_weight() - 6.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_graph_kind_display() {
        assert_eq!(GraphKind::Undirected.to_string(), "undirected");
        assert_eq!(GraphKind::Directed.to_string(), "directed");
        assert_eq!(GraphKind::default(), GraphKind::Undirected);
        assert_eq!(GraphKind::from_directed(true), GraphKind::Directed);
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(2.0), "2.0");
        assert_eq!(format_weight(2.25), "2.25");
        assert_eq!(format_weight(-1.0), "-1.0");
    }

    #[test]
    fn test_graph_error_display() {
        let err = GraphError::UnknownVertex("Z".to_string());
        assert_eq!(err.to_string(), "Vertex not found: Z");

        let err = GraphError::NotAdjacent {
            from: "A".to_string(),
            to: "B".to_string(),
        };
        assert!(err.to_string().contains("A -> B"));
    }
}
