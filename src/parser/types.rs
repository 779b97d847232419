//! Shared types for graph file parsing.
//!
//! This module defines the load options, file formats, errors, and the
//! serde document used by the JSON format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::graph::{Graph, GraphError, GraphKind, DEFAULT_WEIGHT};

/// Errors that can occur while loading a graph file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A line does not match the expected layout.
    #[error("Invalid format on line {line}: {message}")]
    InvalidLine { line: usize, message: String },

    /// A well-formed line was rejected by the graph.
    #[error("Error on line {line}: {source}")]
    Graph {
        line: usize,
        #[source]
        source: GraphError,
    },

    /// A graph error outside any line (JSON documents).
    #[error("Invalid graph: {0}")]
    InvalidGraph(#[from] GraphError),

    /// The file declares no vertices.
    #[error("File contains no vertices")]
    Empty,
}

impl ParseError {
    pub(crate) fn invalid_line(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidLine {
            line,
            message: message.into(),
        }
    }

    /// The 1-based line the error was reported on, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidLine { line, .. } | Self::Graph { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Supported graph file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFormat {
    /// One edge per line: `u v [weight]`
    #[default]
    EdgeList,
    /// `VERTICES:` and `EDGES:` sections
    Sectioned,
    /// A JSON document
    Json,
}

impl FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "edges" | "edge-list" | "edgelist" => Ok(Self::EdgeList),
            "sectioned" | "sections" => Ok(Self::Sectioned),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Unknown graph format: {s}. Supported: edge-list, sectioned, json"
            )),
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeList => write!(f, "edge-list"),
            Self::Sectioned => write!(f, "sectioned"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// How a file becomes a graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Kind of the graph to build. A JSON `directed` field overrides it.
    pub kind: GraphKind,
    /// Uppercase every vertex name
    pub uppercase: bool,
    /// Weight for edge-list lines without one
    pub default_weight: f64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            kind: GraphKind::Undirected,
            uppercase: false,
            default_weight: DEFAULT_WEIGHT,
        }
    }
}

impl LoadOptions {
    /// Applies the name normalisation these options ask for.
    pub fn normalize(&self, name: &str) -> String {
        let name = name.trim();
        if self.uppercase {
            name.to_uppercase()
        } else {
            name.to_string()
        }
    }
}

/// A parsed graph together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    /// Display name: the JSON `name`, the file stem, or `graph`
    pub name: String,
    pub format: GraphFormat,
    pub graph: Graph,
}

/// JSON graph document.
///
/// # Example
///
/// ```
/// use grafo::parser::GraphDocument;
///
/// let json = r#"{"name": "roads", "edges": [{"from": "A", "to": "B", "weight": 3}]}"#;
/// let doc: GraphDocument = serde_json::from_str(json).unwrap();
/// assert_eq!(doc.name.as_deref(), Some("roads"));
/// assert_eq!(doc.edges[0].weight, Some(3.0));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Overrides the configured kind when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directed: Option<bool>,

    /// Vertices without edges must be listed here; the rest are implied.
    #[serde(default)]
    pub vertices: Vec<String>,

    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// One edge of a [`GraphDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_format_from_str() {
        assert_eq!("json".parse::<GraphFormat>(), Ok(GraphFormat::Json));
        assert_eq!("Edge-List".parse::<GraphFormat>(), Ok(GraphFormat::EdgeList));
        assert_eq!("sectioned".parse::<GraphFormat>(), Ok(GraphFormat::Sectioned));
        assert!("yaml".parse::<GraphFormat>().is_err());
    }

    #[test]
    fn test_graph_format_display_round_trips() {
        for format in [GraphFormat::EdgeList, GraphFormat::Sectioned, GraphFormat::Json] {
            assert_eq!(format.to_string().parse::<GraphFormat>(), Ok(format));
        }
    }

    #[test]
    fn test_normalize() {
        let options = LoadOptions::default();
        assert_eq!(options.normalize("  a "), "a");

        let upper = LoadOptions {
            uppercase: true,
            ..LoadOptions::default()
        };
        assert_eq!(upper.normalize("ab"), "AB");
    }

    #[test]
    fn test_error_line() {
        let err = ParseError::invalid_line(4, "bad");
        assert_eq!(err.line(), Some(4));
        assert_eq!(err.to_string(), "Invalid format on line 4: bad");
        assert_eq!(ParseError::Empty.line(), None);
    }

    #[test]
    fn test_document_defaults() {
        let doc: GraphDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.name.is_none());
        assert!(doc.vertices.is_empty());
        assert!(doc.edges.is_empty());
    }
}
