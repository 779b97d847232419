//! Terminal user interface
//!
//! An interactive menu over a loaded graph, with an output pane for the
//! listings and trees produced by each action.

mod app;
pub mod tree;

pub use app::{run_app, App, MenuAction, Prompt, VirtualScrollState};
pub use tree::{FlattenedNode, TreeNode};
