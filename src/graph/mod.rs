//! Graph module for weighted graph modeling and analysis.
//!
//! This module provides the [`Graph`] struct, a name-addressed weighted
//! graph over petgraph, together with connectivity, cycle, planarity,
//! path and spanning-tree algorithms.
//!
//! # Example
//!
//! ```rust
//! use grafo::graph::Graph;
//!
//! let mut graph = Graph::undirected();
//! graph.connect("A", "B", 2.0).unwrap();
//! graph.connect("B", "C", 1.0).unwrap();
//!
//! assert_eq!(graph.order(), 3);
//! assert_eq!(graph.size(), 2);
//! assert!(graph.is_connected());
//! assert!(!graph.is_cyclic());
//! ```

mod algorithms;
mod model;
mod paths;
mod spanning;

pub use algorithms::{Traversal, TraversalOrder, Visit};
pub use model::{
    format_weight, Edge, Graph, GraphError, GraphKind, GraphResult, Vertex, DEFAULT_WEIGHT,
};
pub use paths::Path;
