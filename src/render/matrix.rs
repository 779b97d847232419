//! Adjacency matrix rendering.

use crate::graph::Graph;

const NO_EDGE: &str = "null";
const MIN_CELL_WIDTH: usize = 4;

/// Cell values of the adjacency matrix, rows and columns in name order.
///
/// `None` marks a missing edge. For directed graphs rows are origins.
pub fn matrix_values(graph: &Graph) -> Vec<Vec<Option<f64>>> {
    let names = graph.vertex_names();
    names
        .iter()
        .map(|from| {
            names
                .iter()
                .map(|to| graph.weight(from, to).ok())
                .collect()
        })
        .collect()
}

/// Renders the adjacency matrix as a text table.
///
/// ```text
///   | A    B
/// ==+==========
/// A | null 2.0
/// --+----------
/// B | 2.0  null
/// ```
pub fn adjacency_matrix(graph: &Graph) -> String {
    let names = graph.vertex_names();
    if names.is_empty() {
        return "(empty graph)\n".to_string();
    }

    let cells: Vec<Vec<String>> = matrix_values(graph)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.map_or_else(|| NO_EDGE.to_string(), |w| format!("{w:.1}")))
                .collect()
        })
        .collect();

    let label_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    let cell_width = names
        .iter()
        .map(|n| n.chars().count())
        .chain(cells.iter().flatten().map(|c| c.chars().count()))
        .fold(MIN_CELL_WIDTH, usize::max);
    let body_width = names.len() * (cell_width + 1) - 1;

    let row_line = |label: &str, values: &[String]| {
        let body: Vec<String> = values
            .iter()
            .map(|v| format!("{v:^cell_width$}"))
            .collect();
        format!("{label:<label_width$} | {}", body.join(" "))
            .trim_end()
            .to_string()
    };
    let rule = |fill: &str| {
        format!(
            "{}{fill}+{fill}{}",
            fill.repeat(label_width),
            fill.repeat(body_width)
        )
    };

    let header: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    let mut lines = vec![row_line("", header.as_slice()), rule("=")];
    for (i, (&name, row)) in names.iter().zip(&cells).enumerate() {
        if i > 0 {
            lines.push(rule("-"));
        }
        lines.push(row_line(name, row.as_slice()));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_values() {
        let mut graph = Graph::directed();
        graph.connect("A", "B", 2.0).unwrap();

        assert_eq!(
            matrix_values(&graph),
            vec![vec![None, Some(2.0)], vec![None, None]]
        );
    }

    #[test]
    fn test_render_undirected() {
        let mut graph = Graph::undirected();
        graph.connect("A", "B", 2.0).unwrap();

        let text = adjacency_matrix(&graph);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "  |  A    B");
        assert_eq!(lines[1], "==+==========");
        assert_eq!(lines[2], "A | null 2.0");
        assert_eq!(lines[3], "--+----------");
        assert_eq!(lines[4], "B | 2.0  null");
    }

    #[test]
    fn test_long_names_widen_cells() {
        let mut graph = Graph::undirected();
        graph.connect("Lisbon", "Porto", 313.5).unwrap();

        let text = adjacency_matrix(&graph);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[2].starts_with("Lisbon | "));
        assert!(lines[2].contains("313.5"));
        // every rule spans the full table
        assert_eq!(lines[1].chars().count(), "Lisbon | ".len() + 2 * 6 + 1);
    }

    #[test]
    fn test_empty_graph() {
        assert_eq!(adjacency_matrix(&Graph::undirected()), "(empty graph)\n");
    }
}
