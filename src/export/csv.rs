//! CSV export implementation.
//!
//! Exports the edge list in CSV format for spreadsheet use.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "from,to,weight")?;

        for edge in &data.edges {
            writeln!(
                writer,
                "{},{},{}",
                Self::escape_field(&edge.from),
                Self::escape_field(&edge.to),
                edge.weight
            )?;
        }

        // Isolated vertices get a row of their own so nothing is lost.
        for vertex in data.vertices.iter().filter(|v| v.degree == 0) {
            writeln!(writer, "{},,", Self::escape_field(&vertex.name))?;
        }

        Ok(())
    }
}
