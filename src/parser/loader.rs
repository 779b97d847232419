//! Format detection and loading entry points.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::{GraphFormat, LoadOptions, LoadedGraph, ParseResult};
use super::{edge_list, json, sectioned};

/// Name used when neither the document nor the path provides one.
pub const DEFAULT_GRAPH_NAME: &str = "graph";

/// Guesses the layout of a graph file.
///
/// A `.json` extension or content starting with `{` is JSON. Content with
/// a `VERTICES:` line is sectioned. Anything else is an edge list.
///
/// # Example
///
/// ```
/// use grafo::parser::{detect_format, GraphFormat};
///
/// assert_eq!(detect_format(None, "{\"edges\": []}"), GraphFormat::Json);
/// assert_eq!(detect_format(None, "VERTICES:\nA\n"), GraphFormat::Sectioned);
/// assert_eq!(detect_format(None, "A B 1\n"), GraphFormat::EdgeList);
/// ```
pub fn detect_format(path: Option<&Path>, content: &str) -> GraphFormat {
    let json_extension = path
        .and_then(Path::extension)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if json_extension || content.trim_start().starts_with('{') {
        GraphFormat::Json
    } else if sectioned::looks_sectioned(content) {
        GraphFormat::Sectioned
    } else {
        GraphFormat::EdgeList
    }
}

/// Parses graph content in a known format.
///
/// # Example
///
/// ```
/// use grafo::parser::{parse_str, GraphFormat, LoadOptions};
///
/// let loaded = parse_str("A B 2\n", GraphFormat::EdgeList, &LoadOptions::default()).unwrap();
/// assert_eq!(loaded.name, "graph");
/// assert_eq!(loaded.graph.size(), 1);
/// ```
pub fn parse_str(
    content: &str,
    format: GraphFormat,
    options: &LoadOptions,
) -> ParseResult<LoadedGraph> {
    let (name, graph) = match format {
        GraphFormat::EdgeList => (None, edge_list::parse(content, options)?),
        GraphFormat::Sectioned => (None, sectioned::parse(content, options)?),
        GraphFormat::Json => json::parse(content, options)?,
    };

    Ok(LoadedGraph {
        name: name.unwrap_or_else(|| DEFAULT_GRAPH_NAME.to_string()),
        format,
        graph,
    })
}

/// Reads and parses a graph file, detecting its format.
///
/// The graph is named after the JSON `name` field when present, otherwise
/// after the file stem.
pub fn parse_file(path: &Path, options: &LoadOptions) -> ParseResult<LoadedGraph> {
    let content = fs::read_to_string(path)?;
    let format = detect_format(Some(path), &content);
    debug!(path = %path.display(), %format, "loading graph");

    let mut loaded = parse_str(&content, format, options)?;
    if format != GraphFormat::Json || loaded.name == DEFAULT_GRAPH_NAME {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            loaded.name = stem.to_string();
        }
    }

    debug!(
        name = %loaded.name,
        vertices = loaded.graph.order(),
        edges = loaded.graph.size(),
        "graph loaded"
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(
            detect_format(Some(Path::new("g.JSON")), "A B"),
            GraphFormat::Json
        );
        assert_eq!(
            detect_format(Some(Path::new("g.txt")), "  {}"),
            GraphFormat::Json
        );
    }

    #[test]
    fn test_parse_file_edge_list_named_by_stem() {
        let file = temp_with(".txt", "A B 1\nB C 2\n");
        let loaded = parse_file(file.path(), &LoadOptions::default()).unwrap();

        let stem = file.path().file_stem().unwrap().to_str().unwrap();
        assert_eq!(loaded.name, stem);
        assert_eq!(loaded.format, GraphFormat::EdgeList);
        assert_eq!(loaded.graph.size(), 2);
    }

    #[test]
    fn test_parse_file_json_keeps_document_name() {
        let file = temp_with(".json", r#"{"name": "metro", "edges": [{"from": "A", "to": "B"}]}"#);
        let loaded = parse_file(file.path(), &LoadOptions::default()).unwrap();

        assert_eq!(loaded.name, "metro");
        assert_eq!(loaded.format, GraphFormat::Json);
    }

    #[test]
    fn test_parse_file_sectioned() {
        let file = temp_with(".graph", "VERTICES:\nA\nB\nEDGES:\nA B 3\n");
        let loaded = parse_file(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(loaded.format, GraphFormat::Sectioned);
        assert_eq!(loaded.graph.weight("A", "B").unwrap(), 3.0);
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file(Path::new("/nonexistent/graph.txt"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
