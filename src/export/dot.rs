//! Graphviz DOT export implementation.

use super::{ExportData, Exporter};
use crate::graph::format_weight;
use std::io::{self, Write};

/// DOT exporter implementation.
pub struct DotExporter;

/// Quotes an identifier, escaping backslashes and quotes.
fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Exporter for DotExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let keyword = if data.is_directed() { "digraph" } else { "graph" };
        let connector = data.kind.connector();

        writeln!(writer, "{} {} {{", keyword, quote(&data.name))?;
        for vertex in &data.vertices {
            writeln!(writer, "    {};", quote(&vertex.name))?;
        }
        for edge in &data.edges {
            writeln!(
                writer,
                "    {} {} {} [label=\"{}\"];",
                quote(&edge.from),
                connector,
                quote(&edge.to),
                format_weight(edge.weight)
            )?;
        }
        writeln!(writer, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_data;
    use crate::graph::Graph;

    fn export_string(data: &ExportData) -> String {
        let mut output = Vec::new();
        DotExporter.export(data, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_dot_undirected() {
        let dot = export_string(&sample_data());

        assert!(dot.starts_with("graph \"roads\" {\n"));
        assert!(dot.contains("    \"D\";\n"));
        assert!(dot.contains("    \"A\" -- \"B\" [label=\"2.0\"];\n"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_dot_directed() {
        let mut graph = Graph::directed();
        graph.connect("B", "A", 1.5).unwrap();
        let dot = export_string(&ExportData::from_graph("g", &graph));

        assert!(dot.starts_with("digraph \"g\" {"));
        assert!(dot.contains("\"B\" -> \"A\" [label=\"1.5\"];"));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote(r"a\b"), r#""a\\b""#);
    }
}
