//! HTML export implementation.
//!
//! Writes a standalone page that draws the graph as an interactive network
//! with vis-network, loaded from a CDN. Open the file in any browser.

use super::{ExportData, Exporter};
use crate::graph::format_weight;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Page settings for the HTML export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HtmlOptions {
    /// Heading and document title
    pub title: String,
    /// Canvas height in pixels
    pub height: u32,
    /// Canvas width in pixels
    pub width: u32,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: "Graph Visualization".to_string(),
            height: 600,
            width: 800,
        }
    }
}

/// HTML exporter implementation.
pub struct HtmlExporter {
    options: HtmlOptions,
}

impl HtmlExporter {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }
}

#[derive(Serialize)]
struct VisNode<'a> {
    id: &'a str,
    label: &'a str,
    title: String,
}

#[derive(Serialize)]
struct VisEdge<'a> {
    from: &'a str,
    to: &'a str,
    value: f64,
    label: String,
    title: String,
}

/// Escapes text for use in HTML content.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialises data for embedding in a `<script>` block.
fn script_json<T: Serialize>(value: &T) -> io::Result<String> {
    let json =
        serde_json::to_string(value).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(json.replace("</", "<\\/"))
}

impl Exporter for HtmlExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let nodes: Vec<VisNode> = data
            .vertices
            .iter()
            .map(|v| VisNode {
                id: &v.name,
                label: &v.name,
                title: format!("Vertex: {}", v.name),
            })
            .collect();

        let edges: Vec<VisEdge> = data
            .edges
            .iter()
            .map(|e| VisEdge {
                from: &e.from,
                to: &e.to,
                value: e.weight,
                label: format_weight(e.weight),
                title: format!("Weight: {}", format_weight(e.weight)),
            })
            .collect();

        let title = escape_html(&self.options.title);
        let (width, height) = (self.options.width, self.options.height);
        let arrows = data.is_directed();
        let nodes = script_json(&nodes)?;
        let edges = script_json(&edges)?;

        // Substituted values are written once and never rescanned.
        write!(
            writer,
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
<style>
  body {{ font-family: sans-serif; }}
  #network {{ width: {width}px; height: {height}px; border: 1px solid lightgray; }}
</style>
</head>
<body>
<h1>{title}</h1>
<div id="network"></div>
<script>
  const nodes = new vis.DataSet({nodes});
  const edges = new vis.DataSet({edges});
  const options = {{
    edges: {{ arrows: {{ to: {{ enabled: {arrows} }} }} }},
    physics: {{ enabled: true }}
  }};
  new vis.Network(document.getElementById("network"), {{ nodes, edges }}, options);
</script>
</body>
</html>
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_data;
    use crate::graph::Graph;

    fn render(data: &ExportData, options: HtmlOptions) -> String {
        let mut output = Vec::new();
        HtmlExporter::new(options).export(data, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_html_page_settings() {
        let options = HtmlOptions {
            title: "Roads & Rails".to_string(),
            height: 400,
            width: 500,
        };
        let html = render(&sample_data(), options);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Roads &amp; Rails</title>"));
        assert!(html.contains("width: 500px; height: 400px;"));
        assert!(html.contains("vis-network.min.js"));
        assert!(html.contains("enabled: false"));
    }

    #[test]
    fn test_html_nodes_and_edges() {
        let html = render(&sample_data(), HtmlOptions::default());

        assert!(html.contains(r#""title":"Vertex: D""#));
        assert!(html.contains(r#"{"from":"A","to":"B","value":2.0,"label":"2.0","title":"Weight: 2.0"}"#));
        // each undirected edge appears once
        assert_eq!(html.matches(r#""from":"#).count(), 3);
    }

    #[test]
    fn test_html_directed_arrows() {
        let mut graph = Graph::directed();
        graph.connect("A", "B", 1.0).unwrap();
        let html = render(&ExportData::from_graph("g", &graph), HtmlOptions::default());

        assert!(html.contains("enabled: true } }"));
    }

    #[test]
    fn test_html_script_injection_is_neutralised() {
        let mut graph = Graph::undirected();
        graph.add_vertex("</script><b>");
        let html = render(&ExportData::from_graph("g", &graph), HtmlOptions::default());

        assert!(!html.contains("</script><b>"));
        assert!(html.contains(r#"<\/script><b>"#));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'"#), "&lt;a href=&quot;x&quot;&gt;&#39;");
    }

    #[test]
    fn test_html_placeholder_like_names_are_kept() {
        let mut graph = Graph::undirected();
        graph.connect("__EDGES__", "__NODES__", 1.0).unwrap();
        let options = HtmlOptions {
            title: "__NODES__ and __EDGES__".to_string(),
            ..HtmlOptions::default()
        };
        let html = render(&ExportData::from_graph("g", &graph), options);

        assert!(html.contains("<title>__NODES__ and __EDGES__</title>"));
        assert!(html.contains(r#"{"id":"__EDGES__","label":"__EDGES__","title":"Vertex: __EDGES__"}"#));
        assert!(html.contains(r#"{"from":"__EDGES__","to":"__NODES__","#));
        assert_eq!(html.matches("new vis.DataSet([").count(), 2);
        assert_eq!(html.matches(r#""from":"#).count(), 1);
    }
}
