//! Exit status and output of the `grafo` binary.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn grafo(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grafo"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_check_fails_when_any_file_is_broken() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("good.txt"), "A B 1\n").unwrap();
    fs::write(dir.path().join("broken.txt"), "A B heavy\n").unwrap();
    fs::write(dir.path().join("notes.md"), "not a graph\n").unwrap();

    let output = grafo(&dir, &["check", "."]);

    assert!(!output.status.success());
    let out = stdout(&output);
    assert!(out.contains("ok      ./good.txt"));
    assert!(out.contains("FAILED  ./broken.txt"));
    assert!(!out.contains("notes.md"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 of 2 graph files failed"));
}

#[test]
fn test_check_succeeds_on_valid_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("good.txt"), "A B 1\nB C 1\n").unwrap();

    let output = grafo(&dir, &["check", "."]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("3 vertices, 2 edges"));
}

#[test]
fn test_check_fails_without_graph_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.md"), "not a graph\n").unwrap();

    let output = grafo(&dir, &["check", "."]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No graph files found"));
}

#[test]
fn test_shortest_unreachable_target_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("split.txt"), "A B 1\nC D 1\n").unwrap();

    let output = grafo(&dir, &["shortest", "split.txt", "--from", "A", "--to", "D"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No path from A to D"));
}

#[test]
fn test_shortest_reachable_target_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("roads.txt"), "A B 1\nB C 2\nA C 5\n").unwrap();

    let output = grafo(&dir, &["shortest", "roads.txt", "--from", "A", "--to", "C"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Shortest path:"));
    assert!(out.contains("Total weight: 3"));
}
