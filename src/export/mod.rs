//! Export functionality for graphs and their analysis results.
//!
//! This module provides exporters for writing a graph snapshot in
//! various formats: JSON, CSV, Markdown, HTML and Graphviz DOT.

pub mod csv;
pub mod dot;
pub mod html;
pub mod json;
pub mod markdown;

pub use html::HtmlOptions;

use crate::graph::{Edge, Graph, GraphKind};
use crate::render::matrix_values;
use std::io::{self, Write};
use tracing::info;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - one edge per row
    Csv,
    /// Markdown format - documentation/reporting
    Markdown,
    /// HTML format - interactive network diagram
    Html,
    /// Graphviz DOT format
    Dot,
}

impl ExportFormat {
    /// Conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Dot => "dot",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "html" | "htm" => Ok(ExportFormat::Html),
            "dot" | "graphviz" | "gv" => Ok(ExportFormat::Dot),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, markdown, html, dot",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Dot => write!(f, "dot"),
        }
    }
}

/// A vertex with its degree, as exported.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSummary {
    pub name: String,
    pub degree: usize,
}

/// Data container for export operations.
///
/// A snapshot of the graph and the results of its structural checks.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Graph name
    pub name: String,
    pub kind: GraphKind,
    /// Vertices sorted by name
    pub vertices: Vec<VertexSummary>,
    /// Edges sorted by endpoints, each undirected edge once
    pub edges: Vec<Edge>,
    pub total_weight: f64,
    pub mean_weight: f64,
    /// Number of (weakly) connected components
    pub components: usize,
    pub connected: bool,
    pub cyclic: bool,
    pub planar: bool,
    /// Adjacency matrix in vertex order, `None` where no edge exists
    pub matrix: Vec<Vec<Option<f64>>>,
}

impl ExportData {
    /// Create export data from a graph.
    pub fn from_graph(name: impl Into<String>, graph: &Graph) -> Self {
        Self {
            name: name.into(),
            kind: graph.kind(),
            vertices: graph
                .degrees()
                .into_iter()
                .map(|(name, degree)| VertexSummary { name, degree })
                .collect(),
            edges: graph.edges(),
            total_weight: graph.total_weight(),
            mean_weight: graph.mean_weight(),
            components: graph.components().len(),
            connected: graph.is_connected(),
            cyclic: graph.is_cyclic(),
            planar: graph.is_planar(),
            matrix: matrix_values(graph),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    /// Vertex names in matrix order
    pub fn vertex_names(&self) -> impl Iterator<Item = &str> {
        self.vertices.iter().map(|v| v.name.as_str())
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format with default HTML options.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    export_with(format, data, &HtmlOptions::default(), writer)
}

/// Export data in the specified format.
///
/// `html` only affects [`ExportFormat::Html`].
pub fn export_with<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    html: &HtmlOptions,
    writer: &mut W,
) -> io::Result<()> {
    info!(
        name = %data.name,
        %format,
        vertices = data.vertices.len(),
        edges = data.edges.len(),
        "exporting graph"
    );
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Csv => csv::CsvExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
        ExportFormat::Html => html::HtmlExporter::new(html.clone()).export(data, writer),
        ExportFormat::Dot => dot::DotExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ExportData;
    use crate::graph::Graph;

    /// Triangle A-B-C plus an isolated vertex D.
    pub fn sample_data() -> ExportData {
        let mut graph = Graph::undirected();
        graph.connect("A", "B", 2.0).unwrap();
        graph.connect("B", "C", 1.5).unwrap();
        graph.connect("C", "A", 3.0).unwrap();
        graph.add_vertex("D");
        ExportData::from_graph("roads", &graph)
    }
}
