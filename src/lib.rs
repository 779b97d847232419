//! grafo - weighted graph explorer with an interactive terminal menu
//!
//! Loads undirected or directed weighted graphs from edge-list, sectioned
//! or JSON files, analyses their structure (connectivity, cycles,
//! planarity, paths, spanning trees, traversals) and renders or exports
//! the results.

pub mod check;
pub mod config;
pub mod export;
pub mod graph;
pub mod logging;
pub mod parser;
pub mod render;
pub mod ui;
