//! Parser for edge-list files.
//!
//! One edge per line, fields separated by commas or whitespace:
//!
//! ```text
//! # comment
//! A B 2.5
//! B,C
//! D
//! ```
//!
//! A missing weight takes the configured default. A lone name declares an
//! isolated vertex.

use super::types::{LoadOptions, ParseError, ParseResult};
use crate::graph::Graph;

/// Parses edge-list content into a graph.
///
/// # Example
///
/// ```
/// use grafo::parser::{edge_list, LoadOptions};
///
/// let graph = edge_list::parse("A B 2\nB, C\n", &LoadOptions::default()).unwrap();
/// assert_eq!(graph.size(), 2);
/// assert_eq!(graph.weight("B", "C").unwrap(), 1.0);
/// ```
pub fn parse(content: &str, options: &LoadOptions) -> ParseResult<Graph> {
    let mut graph = Graph::new(options.kind);

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let fields = split_fields(text);
        if fields.iter().any(|f| f.is_empty()) {
            return Err(ParseError::invalid_line(line, format!("empty field in '{text}'")));
        }

        match fields.as_slice() {
            [name] => {
                graph.add_vertex(&options.normalize(name));
            }
            [from, to] => connect(&mut graph, options, line, from, to, options.default_weight)?,
            [from, to, weight] => {
                let weight = parse_weight(line, weight)?;
                connect(&mut graph, options, line, from, to, weight)?;
            }
            _ => {
                return Err(ParseError::invalid_line(
                    line,
                    format!("expected 'origin destination [weight]', got '{text}'"),
                ))
            }
        }
    }

    Ok(graph)
}

pub(crate) fn split_fields(text: &str) -> Vec<&str> {
    if text.contains(',') {
        text.split(',').map(str::trim).collect()
    } else {
        text.split_whitespace().collect()
    }
}

pub(crate) fn parse_weight(line: usize, field: &str) -> ParseResult<f64> {
    field
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| ParseError::invalid_line(line, format!("invalid weight '{field}'")))
}

fn connect(
    graph: &mut Graph,
    options: &LoadOptions,
    line: usize,
    from: &str,
    to: &str,
    weight: f64,
) -> ParseResult<()> {
    graph
        .connect(&options.normalize(from), &options.normalize(to), weight)
        .map_err(|source| ParseError::Graph { line, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphKind;

    #[test]
    fn test_parse_whitespace_and_commas() {
        let content = "A B 2.5\nB,C,3\nC D\n";
        let graph = parse(content, &LoadOptions::default()).unwrap();

        assert_eq!(graph.order(), 4);
        assert_eq!(graph.size(), 3);
        assert_eq!(graph.weight("A", "B").unwrap(), 2.5);
        assert_eq!(graph.weight("B", "C").unwrap(), 3.0);
        assert_eq!(graph.weight("C", "D").unwrap(), 1.0);
    }

    #[test]
    fn test_comments_blank_lines_and_isolated_vertex() {
        let content = "# roads\n\nA B\n   \nZ\n";
        let graph = parse(content, &LoadOptions::default()).unwrap();

        assert_eq!(graph.vertex_names(), vec!["A", "B", "Z"]);
        assert_eq!(graph.degree("Z"), Some(0));
    }

    #[test]
    fn test_default_weight_and_uppercase() {
        let options = LoadOptions {
            uppercase: true,
            default_weight: 7.0,
            ..LoadOptions::default()
        };
        let graph = parse("a b\n", &options).unwrap();
        assert_eq!(graph.weight("A", "B").unwrap(), 7.0);
    }

    #[test]
    fn test_directed_kind() {
        let options = LoadOptions {
            kind: GraphKind::Directed,
            ..LoadOptions::default()
        };
        let graph = parse("A B\n", &options).unwrap();
        assert!(graph.is_directed());
        assert!(graph.weight("B", "A").is_err());
    }

    #[test]
    fn test_empty_content_is_empty_graph() {
        let graph = parse("# nothing\n", &LoadOptions::default()).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse("A B\nA B x\n", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidLine { line: 2, .. }));

        let err = parse("A B 1 2\n", &LoadOptions::default()).unwrap_err();
        assert_eq!(err.line(), Some(1));

        let err = parse("A,\n", &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("empty field"));

        let err = parse("A B inf\n", &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("invalid weight"));
    }
}
