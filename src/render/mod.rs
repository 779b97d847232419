//! Plain-text renderings of graphs and analysis results.
//!
//! Used by the CLI for stdout output and by the TUI output pane.

mod listing;
mod matrix;

pub use listing::{
    adjacency_list, path_listing, summary, tree_lines, AdjacencyList, PathListing, Summary,
};
pub use matrix::{adjacency_matrix, matrix_values};
