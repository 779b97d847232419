//! Text listings: adjacency lists, summaries, paths and trees.
//!
//! Each listing is a [`fmt::Display`] type writing straight into the
//! formatter; the free functions render them to a `String`.

use std::fmt;

use crate::graph::{format_weight, Graph, Path};
use crate::ui::tree::TreeNode;

const FRAME_WIDTH: usize = 50;

/// Writes `B (2.0), C (1.0)` for the neighbours of `name`, or `-`.
fn write_connections(f: &mut fmt::Formatter<'_>, graph: &Graph, name: &str) -> fmt::Result {
    let neighbours = graph.neighbors(name);
    if neighbours.is_empty() {
        return f.write_str("-");
    }
    for (i, (next, weight)) in neighbours.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{next} ({})", format_weight(weight))?;
    }
    Ok(())
}

/// Each vertex with its neighbours, framed with totals.
pub struct AdjacencyList<'a>(pub &'a Graph);

impl fmt::Display for AdjacencyList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;
        writeln!(f, "{}", "=".repeat(FRAME_WIDTH))?;
        writeln!(f, "Adjacency list ({})", graph.kind())?;
        writeln!(f, "{}", "-".repeat(FRAME_WIDTH))?;

        for vertex in graph.vertices() {
            write!(f, "{vertex} -> ")?;
            write_connections(f, graph, &vertex.name)?;
            writeln!(f)?;
        }

        writeln!(f, "{}", "-".repeat(FRAME_WIDTH))?;
        writeln!(f, "Vertices: {} | Edges: {}", graph.order(), graph.size())
    }
}

/// Renders each vertex with its neighbours, framed with totals.
pub fn adjacency_list(graph: &Graph) -> String {
    AdjacencyList(graph).to_string()
}

/// Counts, weight statistics and per-vertex details under a title.
pub struct Summary<'a> {
    pub graph: &'a Graph,
    pub title: &'a str,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.graph;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count().max(1)))?;
        writeln!(f, "Vertices: {}", graph.order())?;
        writeln!(f, "Edges: {}", graph.size())?;
        writeln!(f, "Total weight: {:.2}", graph.total_weight())?;
        writeln!(f, "Mean weight: {:.2}", graph.mean_weight())?;
        writeln!(f)?;

        for (name, degree) in graph.degrees() {
            write!(f, "{name} (degree {degree}): ")?;
            write_connections(f, graph, &name)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Renders counts, weight statistics and per-vertex details.
///
/// ```text
/// Road map
/// ========
/// Vertices: 3
/// Edges: 2
/// Total weight: 3.00
/// Mean weight: 1.50
///
/// A (degree 1): B (1.0)
/// ```
pub fn summary(graph: &Graph, title: &str) -> String {
    Summary { graph, title }.to_string()
}

/// Numbered paths between two vertices with their total weights.
pub struct PathListing<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub paths: &'a [Path],
}

impl fmt::Display for PathListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.paths.is_empty() {
            return writeln!(f, "No paths found from {} to {}.", self.from, self.to);
        }

        writeln!(f, "Paths found: {}", self.paths.len())?;
        for (i, path) in self.paths.iter().enumerate() {
            if path.is_empty() {
                writeln!(
                    f,
                    "Path {}: origin and destination are the same vertex ({})",
                    i + 1,
                    path.start
                )?;
            } else {
                writeln!(
                    f,
                    "Path {}: {} | total weight {}",
                    i + 1,
                    path,
                    format_weight(path.total_weight())
                )?;
            }
        }
        Ok(())
    }
}

/// Renders numbered paths between two vertices with their total weights.
pub fn path_listing(from: &str, to: &str, paths: &[Path]) -> String {
    PathListing { from, to, paths }.to_string()
}

/// Renders a tree with box-drawing branches, one line per node.
pub fn tree_lines(tree: &TreeNode) -> Vec<String> {
    tree.flatten().iter().map(|node| node.line()).collect()
}
