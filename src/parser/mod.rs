//! Parser module for graph files.
//!
//! # Supported Formats
//!
//! - **Edge list** - `u v [weight]` per line, comma or whitespace separated
//! - **Sectioned** - `VERTICES:` followed by `EDGES:` (or `ARESTAS:`)
//! - **JSON** - `{"name", "directed", "vertices", "edges": [{"from", "to", "weight"}]}`
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use grafo::parser::{parse_file, LoadOptions};
//!
//! let loaded = parse_file(Path::new("input.txt"), &LoadOptions::default()).unwrap();
//! println!("{}: {} vertices", loaded.name, loaded.graph.order());
//! ```

pub mod edge_list;
pub mod json;
mod loader;
pub mod sectioned;
pub mod types;

pub use loader::{detect_format, parse_file, parse_str, DEFAULT_GRAPH_NAME};
pub use types::{
    EdgeRecord, GraphDocument, GraphFormat, LoadOptions, LoadedGraph, ParseError, ParseResult,
};
