//! Markdown export implementation.
//!
//! Exports the graph report in Markdown format for documentation and reporting.

use super::{ExportData, Exporter};
use crate::graph::format_weight;
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Pipes inside a cell would split it.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        // Title
        writeln!(writer, "# Graph Report")?;
        writeln!(writer)?;
        writeln!(writer, "**Graph:** {} ({})", data.name, data.kind)?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Value |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Vertices | {} |", data.vertices.len())?;
        writeln!(writer, "| Edges | {} |", data.edges.len())?;
        writeln!(writer, "| Total Weight | {:.2} |", data.total_weight)?;
        writeln!(writer, "| Mean Weight | {:.2} |", data.mean_weight)?;
        writeln!(writer, "| Components | {} |", data.components)?;
        writeln!(writer)?;

        // Properties
        writeln!(writer, "## Properties")?;
        writeln!(writer)?;
        writeln!(writer, "| Property | Result |")?;
        writeln!(writer, "|----------|--------|")?;
        writeln!(writer, "| Connected | {} |", yes_no(data.connected))?;
        writeln!(writer, "| Cyclic | {} |", yes_no(data.cyclic))?;
        writeln!(writer, "| Planar | {} |", yes_no(data.planar))?;
        writeln!(writer)?;

        // Vertices
        if !data.vertices.is_empty() {
            writeln!(writer, "## Vertices ({})", data.vertices.len())?;
            writeln!(writer)?;
            writeln!(writer, "| Vertex | Degree |")?;
            writeln!(writer, "|--------|--------|")?;
            for vertex in &data.vertices {
                writeln!(writer, "| {} | {} |", cell(&vertex.name), vertex.degree)?;
            }
            writeln!(writer)?;
        }

        // Edges
        if !data.edges.is_empty() {
            writeln!(writer, "## Edges ({})", data.edges.len())?;
            writeln!(writer)?;
            writeln!(writer, "| From | To | Weight |")?;
            writeln!(writer, "|------|----|--------|")?;
            for edge in &data.edges {
                writeln!(
                    writer,
                    "| {} | {} | {} |",
                    cell(&edge.from),
                    cell(&edge.to),
                    format_weight(edge.weight)
                )?;
            }
            writeln!(writer)?;
        }

        // Adjacency matrix
        if !data.matrix.is_empty() {
            writeln!(writer, "## Adjacency Matrix")?;
            writeln!(writer)?;

            let header: Vec<String> = data.vertex_names().map(cell).collect();
            writeln!(writer, "|   | {} |", header.join(" | "))?;
            writeln!(writer, "|---|{}", "---|".repeat(header.len()))?;
            for (name, row) in header.iter().zip(&data.matrix) {
                let values: Vec<String> = row
                    .iter()
                    .map(|w| w.map_or_else(|| "-".to_string(), |w| format!("{w:.1}")))
                    .collect();
                writeln!(writer, "| **{}** | {} |", name, values.join(" | "))?;
            }
            writeln!(writer)?;
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by grafo*")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_data;

    fn export_string(data: &ExportData) -> String {
        let mut output = Vec::new();
        MarkdownExporter.export(data, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_markdown_export_summary() {
        let md_str = export_string(&sample_data());

        assert!(md_str.contains("# Graph Report"));
        assert!(md_str.contains("**Graph:** roads (undirected)"));
        assert!(md_str.contains("| Vertices | 4 |"));
        assert!(md_str.contains("| Edges | 3 |"));
        assert!(md_str.contains("| Total Weight | 6.50 |"));
        assert!(md_str.contains("| Components | 2 |"));
    }

    #[test]
    fn test_markdown_export_properties() {
        let md_str = export_string(&sample_data());

        assert!(md_str.contains("| Connected | no |"));
        assert!(md_str.contains("| Cyclic | yes |"));
        assert!(md_str.contains("| Planar | yes |"));
    }

    #[test]
    fn test_markdown_export_tables() {
        let md_str = export_string(&sample_data());

        assert!(md_str.contains("| D | 0 |"));
        assert!(md_str.contains("| B | C | 1.5 |"));
        assert!(md_str.contains("|   | A | B | C | D |"));
        assert!(md_str.contains("|---|---|---|---|---|"));
        assert!(md_str.contains("| **A** | - | 2.0 | 3.0 | - |"));
    }

    #[test]
    fn test_markdown_export_footer() {
        let md_str = export_string(&sample_data());

        assert!(md_str.contains("---"));
        assert!(md_str.ends_with("*Generated by grafo*\n"));
    }

    #[test]
    fn test_markdown_empty_graph_skips_tables() {
        let data = ExportData::from_graph("empty", &crate::graph::Graph::undirected());
        let md_str = export_string(&data);

        assert!(!md_str.contains("## Edges"));
        assert!(!md_str.contains("## Adjacency Matrix"));
        assert!(md_str.contains("| Connected | yes |"));
    }
}
