//! JSON export implementation.
//!
//! Exports the graph snapshot in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

#[derive(Serialize)]
struct JsonVertex<'a> {
    name: &'a str,
    degree: usize,
}

#[derive(Serialize)]
struct JsonEdge<'a> {
    from: &'a str,
    to: &'a str,
    weight: f64,
}

#[derive(Serialize)]
struct JsonSummary {
    vertices: usize,
    edges: usize,
    total_weight: f64,
    mean_weight: f64,
    components: usize,
}

#[derive(Serialize)]
struct JsonProperties {
    connected: bool,
    cyclic: bool,
    planar: bool,
}

#[derive(Serialize)]
struct JsonProject<'a> {
    name: &'a str,
    directed: bool,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    project: JsonProject<'a>,
    summary: JsonSummary,
    vertices: Vec<JsonVertex<'a>>,
    edges: Vec<JsonEdge<'a>>,
    properties: JsonProperties,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let export = JsonExport {
            project: JsonProject {
                name: &data.name,
                directed: data.is_directed(),
            },
            summary: JsonSummary {
                vertices: data.vertices.len(),
                edges: data.edges.len(),
                total_weight: data.total_weight,
                mean_weight: data.mean_weight,
                components: data.components,
            },
            vertices: data
                .vertices
                .iter()
                .map(|v| JsonVertex {
                    name: &v.name,
                    degree: v.degree,
                })
                .collect(),
            edges: data
                .edges
                .iter()
                .map(|e| JsonEdge {
                    from: &e.from,
                    to: &e.to,
                    weight: e.weight,
                })
                .collect(),
            properties: JsonProperties {
                connected: data.connected,
                cyclic: data.cyclic,
                planar: data.planar,
            },
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
