//! Parser for sectioned graph files.
//!
//! ```text
//! # comment
//! VERTICES:
//! A
//! B
//! EDGES:
//! A B 4
//! ```
//!
//! `ARESTAS:` is accepted as a synonym for `EDGES:`. Section headers are
//! case-insensitive. Edges must name declared vertices and always carry a
//! weight.

use super::edge_list::parse_weight;
use super::types::{LoadOptions, ParseError, ParseResult};
use crate::graph::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Vertices,
    Edges,
}

/// Returns the section a header line opens, if it is one.
fn section_header(text: &str) -> Option<Section> {
    match text.to_uppercase().as_str() {
        "VERTICES:" => Some(Section::Vertices),
        "EDGES:" | "ARESTAS:" => Some(Section::Edges),
        _ => None,
    }
}

/// Returns true if the content has a `VERTICES:` header line.
pub fn looks_sectioned(content: &str) -> bool {
    content
        .lines()
        .any(|line| section_header(line.trim()) == Some(Section::Vertices))
}

/// Parses sectioned content into a graph.
///
/// # Errors
///
/// * [`ParseError::InvalidLine`] for content before any section, edge
///   lines without exactly three fields, and unparsable weights
/// * [`ParseError::Graph`] for edges naming undeclared vertices
/// * [`ParseError::Empty`] when no vertex was declared
pub fn parse(content: &str, options: &LoadOptions) -> ParseResult<Graph> {
    let mut graph = Graph::new(options.kind);
    let mut section = None;

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        if let Some(header) = section_header(text) {
            section = Some(header);
            continue;
        }

        match section {
            None => {
                return Err(ParseError::invalid_line(
                    line,
                    format!("'{text}' appears before any VERTICES: or EDGES: section"),
                ))
            }
            Some(Section::Vertices) => {
                graph.add_vertex(&options.normalize(text));
            }
            Some(Section::Edges) => {
                let fields: Vec<&str> = text.split_whitespace().collect();
                let [from, to, weight] = fields.as_slice() else {
                    return Err(ParseError::invalid_line(
                        line,
                        format!("'{text}'. Use 'origin destination weight'"),
                    ));
                };
                let weight = parse_weight(line, weight)?;
                graph
                    .add_edge(&options.normalize(from), &options.normalize(to), weight)
                    .map_err(|source| ParseError::Graph { line, source })?;
            }
        }
    }

    if graph.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(graph)
}
