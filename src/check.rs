//! Batch loading of graph files.
//!
//! Backs the `check` command: every graph file under a path is loaded and
//! summarised, and failures are collected instead of stopping the run.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::parser::{self, GraphFormat, LoadOptions, ParseError};

/// Extensions picked up when checking a directory
pub const GRAPH_EXTENSIONS: [&str; 3] = ["txt", "json", "graph"];

/// Properties of a file that loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub path: PathBuf,
    pub format: GraphFormat,
    pub vertices: usize,
    pub edges: usize,
    pub connected: bool,
    pub cyclic: bool,
    pub planar: bool,
}

/// A file that could not be loaded.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ParseError,
}

/// Outcome of checking a file or directory.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub loaded: Vec<FileSummary>,
    pub failed: Vec<FileFailure>,
}

impl CheckReport {
    /// Number of files examined.
    pub fn total(&self) -> usize {
        self.loaded.len() + self.failed.len()
    }

    /// True when at least one file was examined and none failed.
    pub fn is_success(&self) -> bool {
        self.total() > 0 && self.failed.is_empty()
    }
}

/// Returns true for paths with one of [`GRAPH_EXTENSIONS`], ignoring case.
pub fn is_graph_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            GRAPH_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Lists the files to check: `path` itself when it is not a directory,
/// otherwise every graph file below it in file-name order.
pub fn graph_files(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }

    WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_graph_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

/// Loads every file from [`graph_files`], recording each outcome.
pub fn check_path(path: &Path, options: &LoadOptions) -> CheckReport {
    let mut report = CheckReport::default();

    for file in graph_files(path) {
        match parser::parse_file(&file, options) {
            Ok(loaded) => {
                let graph = &loaded.graph;
                report.loaded.push(FileSummary {
                    format: loaded.format,
                    vertices: graph.order(),
                    edges: graph.size(),
                    connected: graph.is_connected(),
                    cyclic: graph.is_cyclic(),
                    planar: graph.is_planar(),
                    path: file,
                });
            }
            Err(error) => {
                warn!(path = %file.display(), %error, "skipping graph file");
                report.failed.push(FileFailure { path: file, error });
            }
        }
    }

    debug!(
        loaded = report.loaded.len(),
        failed = report.failed.len(),
        "check finished"
    );
    report
}
