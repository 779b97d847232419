//! Parser for JSON graph documents.

use super::types::{GraphDocument, LoadOptions, ParseResult};
use crate::graph::{Graph, GraphKind};

/// Parses a JSON document into its optional name and graph.
///
/// A `directed` field in the document wins over `options.kind`. Edge
/// endpoints are created on demand.
pub fn parse(content: &str, options: &LoadOptions) -> ParseResult<(Option<String>, Graph)> {
    let document: GraphDocument = serde_json::from_str(content)?;
    let graph = build(&document, options)?;
    Ok((document.name, graph))
}

/// Builds a graph from an already deserialised document.
pub fn build(document: &GraphDocument, options: &LoadOptions) -> ParseResult<Graph> {
    let kind = document
        .directed
        .map_or(options.kind, GraphKind::from_directed);
    let mut graph = Graph::with_capacity(kind, document.vertices.len(), document.edges.len());

    for vertex in &document.vertices {
        graph.add_vertex(&options.normalize(vertex));
    }
    for edge in &document.edges {
        graph.connect(
            &options.normalize(&edge.from),
            &options.normalize(&edge.to),
            edge.weight.unwrap_or(options.default_weight),
        )?;
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseError;

    #[test]
    fn test_parse_document() {
        let json = r#"{
            "name": "roads",
            "vertices": ["E"],
            "edges": [
                {"from": "A", "to": "B", "weight": 2.5},
                {"from": "B", "to": "C"}
            ]
        }"#;
        let (name, graph) = parse(json, &LoadOptions::default()).unwrap();

        assert_eq!(name.as_deref(), Some("roads"));
        assert_eq!(graph.vertex_names(), vec!["A", "B", "C", "E"]);
        assert_eq!(graph.weight("A", "B").unwrap(), 2.5);
        assert_eq!(graph.weight("B", "C").unwrap(), 1.0);
    }

    #[test]
    fn test_directed_field_overrides_options() {
        let json = r#"{"directed": true, "edges": [{"from": "A", "to": "B"}]}"#;
        let (_, graph) = parse(json, &LoadOptions::default()).unwrap();
        assert!(graph.is_directed());
    }

    #[test]
    fn test_invalid_json() {
        let err = parse("{ not json", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
