//! Application state and TUI event loop
//!
//! Manages the menu, the field prompts and the output pane of the
//! interactive graph explorer.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use super::tree::TreeNode;
use crate::graph::{format_weight, Graph, GraphError, TraversalOrder};
use crate::parser::LoadOptions;
use crate::render;

/// Scroll state for the output pane
#[derive(Debug, Default, Clone)]
pub struct VirtualScrollState {
    /// First visible row index
    pub offset: usize,
    /// Number of visible rows in the viewport
    pub viewport_height: usize,
}

impl VirtualScrollState {
    /// Create a new virtual scroll state
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the viewport height
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
    }

    /// Largest offset that still fills the viewport
    fn max_offset(&self, total: usize) -> usize {
        total.saturating_sub(self.viewport_height.max(1))
    }

    /// Calculate the visible range for the given total
    pub fn visible_range(&self, total: usize) -> (usize, usize) {
        if total == 0 || self.viewport_height == 0 {
            return (0, 0);
        }
        let start = self.offset.min(self.max_offset(total));
        let end = (start + self.viewport_height).min(total);
        (start, end)
    }

    pub fn scroll_down(&mut self, rows: usize, total: usize) {
        self.offset = (self.offset + rows).min(self.max_offset(total));
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.offset = self.offset.saturating_sub(rows);
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self, total: usize) {
        self.offset = self.max_offset(total);
    }

    /// Rows moved by one page
    fn page(&self) -> usize {
        self.viewport_height.max(1)
    }
}

/// An entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ShowGraph,
    Matrix,
    Summary,
    Connected,
    Cyclic,
    Planar,
    AddEdge,
    AllPaths,
    ShortestPath,
    SpanningTree,
    Traverse,
    Quit,
}

impl MenuAction {
    /// Menu entries in display order
    pub const ALL: [MenuAction; 12] = [
        MenuAction::ShowGraph,
        MenuAction::Matrix,
        MenuAction::Summary,
        MenuAction::Connected,
        MenuAction::Cyclic,
        MenuAction::Planar,
        MenuAction::AddEdge,
        MenuAction::AllPaths,
        MenuAction::ShortestPath,
        MenuAction::SpanningTree,
        MenuAction::Traverse,
        MenuAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::ShowGraph => "Show graph",
            MenuAction::Matrix => "Adjacency matrix",
            MenuAction::Summary => "Summary",
            MenuAction::Connected => "Connected?",
            MenuAction::Cyclic => "Cyclic?",
            MenuAction::Planar => "Planar?",
            MenuAction::AddEdge => "Add edge",
            MenuAction::AllPaths => "All paths",
            MenuAction::ShortestPath => "Shortest path",
            MenuAction::SpanningTree => "Spanning tree",
            MenuAction::Traverse => "Traverse",
            MenuAction::Quit => "Quit",
        }
    }

    /// Fields asked for before the action runs
    pub fn prompts(&self) -> &'static [&'static str] {
        match self {
            MenuAction::AddEdge => &["Origin", "Destination", "Weight (blank for default)"],
            MenuAction::AllPaths | MenuAction::ShortestPath => &["Origin", "Destination"],
            MenuAction::SpanningTree => &["Root"],
            MenuAction::Traverse => &["Start", "Order (bfs/dfs, blank for bfs)"],
            _ => &[],
        }
    }
}

/// Fields being collected for an action
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub action: MenuAction,
    /// Confirmed fields so far
    pub answers: Vec<String>,
    /// Text typed for the current field
    pub input: String,
}

impl Prompt {
    fn new(action: MenuAction) -> Self {
        Self {
            action,
            answers: Vec::new(),
            input: String::new(),
        }
    }

    /// Label of the field being typed
    pub fn current_label(&self) -> &'static str {
        self.action
            .prompts()
            .get(self.answers.len())
            .copied()
            .unwrap_or("")
    }

    fn is_complete(&self) -> bool {
        self.answers.len() == self.action.prompts().len()
    }
}

/// Failure of a menu action, shown in the output pane
#[derive(Debug, thiserror::Error)]
enum ActionError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("{0}")]
    Input(String),
}

/// Application state
pub struct App {
    /// The graph being explored
    pub graph: Graph,
    /// Name shown in the header and used as the summary title
    pub source: String,
    /// Name normalisation and default weight for inserted edges
    pub options: LoadOptions,
    /// Currently selected menu entry
    pub selected_index: usize,
    /// Title of the output pane
    pub output_title: String,
    /// Lines of the output pane
    pub output: Vec<String>,
    /// Whether the last action failed
    pub output_is_error: bool,
    /// Active field prompt, if any
    pub prompt: Option<Prompt>,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Scroll state of the output pane
    pub scroll_state: VirtualScrollState,
    /// List state for ratatui
    list_state: ListState,
}

impl App {
    /// Create a new application over a loaded graph
    pub fn new(graph: Graph, source: impl Into<String>, options: LoadOptions) -> Self {
        let source = source.into();
        let mut app = Self {
            graph,
            output_title: "Output".to_string(),
            output: vec![format!("Loaded {source}. Choose an action from the menu.")],
            output_is_error: false,
            source,
            options,
            selected_index: 0,
            prompt: None,
            should_quit: false,
            scroll_state: VirtualScrollState::new(),
            list_state: ListState::default(),
        };
        app.list_state.select(Some(0));
        app
    }

    /// The currently highlighted menu entry
    pub fn selected_action(&self) -> MenuAction {
        MenuAction::ALL[self.selected_index]
    }

    /// Move selection to the next menu entry
    pub fn select_next(&mut self) {
        self.selected_index = (self.selected_index + 1).min(MenuAction::ALL.len() - 1);
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection to the previous menu entry
    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.list_state.select(Some(self.selected_index));
    }

    /// Jump to the first menu entry
    pub fn select_first(&mut self) {
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    /// Jump to the last menu entry
    pub fn select_last(&mut self) {
        self.selected_index = MenuAction::ALL.len() - 1;
        self.list_state.select(Some(self.selected_index));
    }

    /// Run the selected entry, asking for its fields first
    pub fn activate_selected(&mut self) {
        let action = self.selected_action();
        if action.prompts().is_empty() {
            self.execute(action, &[]);
        } else {
            self.prompt = Some(Prompt::new(action));
        }
    }

    /// Type a character into the active prompt
    pub fn prompt_push(&mut self, c: char) {
        if let Some(prompt) = &mut self.prompt {
            prompt.input.push(c);
        }
    }

    /// Delete the last typed character
    pub fn prompt_pop(&mut self) {
        if let Some(prompt) = &mut self.prompt {
            prompt.input.pop();
        }
    }

    /// Confirm the current field; runs the action once all are filled
    pub fn prompt_submit(&mut self) {
        let Some(mut prompt) = self.prompt.take() else {
            return;
        };

        let answer = std::mem::take(&mut prompt.input).trim().to_string();
        prompt.answers.push(answer);

        if prompt.is_complete() {
            self.execute(prompt.action, &prompt.answers);
        } else {
            self.prompt = Some(prompt);
        }
    }

    /// Abandon the active prompt
    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Signal that the application should quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Runs an action with its answers and shows the result
    pub fn execute(&mut self, action: MenuAction, answers: &[String]) {
        debug!(action = action.label(), ?answers, "menu action");
        if action == MenuAction::Quit {
            self.quit();
            return;
        }

        match self.run_action(action, answers) {
            Ok(text) => {
                self.output_is_error = false;
                self.set_output(action.label(), text);
            }
            Err(err) => {
                self.output_is_error = true;
                self.set_output("Error", format!("{}: {err}", action.label()));
            }
        }
    }

    fn set_output(&mut self, title: &str, text: String) {
        self.output_title = title.to_string();
        self.output = text.lines().map(str::to_string).collect();
        self.scroll_state.scroll_to_top();
    }

    fn answer(&self, answers: &[String], index: usize) -> Result<String, ActionError> {
        match answers.get(index) {
            Some(value) if !value.is_empty() => Ok(self.options.normalize(value)),
            _ => Err(ActionError::Input("a vertex name is required".to_string())),
        }
    }

    fn run_action(&mut self, action: MenuAction, answers: &[String]) -> Result<String, ActionError> {
        let graph = &self.graph;
        let text = match action {
            MenuAction::ShowGraph => render::adjacency_list(graph),
            MenuAction::Matrix => render::adjacency_matrix(graph),
            MenuAction::Summary => render::summary(graph, &self.source),
            MenuAction::Connected => describe_connectivity(graph),
            MenuAction::Cyclic => match graph.find_cycle() {
                Some(mut cycle) => {
                    // Close the loop back to the first vertex
                    if let Some(first) = cycle.first().cloned() {
                        cycle.push(first);
                    }
                    format!("The graph contains a cycle: {}", cycle.join(" → "))
                }
                None => "The graph is acyclic.".to_string(),
            },
            MenuAction::Planar => {
                if graph.is_planar() {
                    "The graph passes the planarity edge bounds (it may be planar).".to_string()
                } else {
                    "The graph is not planar.".to_string()
                }
            }
            MenuAction::AddEdge => {
                let from = self.answer(answers, 0)?;
                let to = self.answer(answers, 1)?;
                let weight = match answers.get(2).map(String::as_str) {
                    None | Some("") => self.options.default_weight,
                    Some(raw) => raw
                        .parse::<f64>()
                        .map_err(|_| ActionError::Input(format!("invalid weight '{raw}'")))?,
                };
                self.graph.connect(&from, &to, weight)?;
                format!(
                    "Edge added: {from} {} {to} ({})\nVertices: {} | Edges: {}",
                    self.graph.kind().connector(),
                    format_weight(weight),
                    self.graph.order(),
                    self.graph.size()
                )
            }
            MenuAction::AllPaths => {
                let from = self.answer(answers, 0)?;
                let to = self.answer(answers, 1)?;
                render::path_listing(&from, &to, &graph.all_paths(&from, &to)?)
            }
            MenuAction::ShortestPath => {
                let from = self.answer(answers, 0)?;
                let to = self.answer(answers, 1)?;
                match graph.shortest_path(&from, &to)? {
                    Some(path) if path.is_empty() => {
                        "Origin and destination are the same vertex.".to_string()
                    }
                    Some(path) => format!(
                        "Shortest path: {path}\nTotal weight: {}",
                        format_weight(path.total_weight())
                    ),
                    None => format!("No path from {from} to {to}."),
                }
            }
            MenuAction::SpanningTree => {
                let root = self.answer(answers, 0)?;
                let tree = graph.minimum_spanning_tree(&root)?;
                let mut lines = tree_text(&tree, &root, TraversalOrder::DepthFirst)?;
                lines.push(String::new());
                lines.push(format!(
                    "Edges: {} | Total weight: {}",
                    tree.size(),
                    format_weight(tree.total_weight())
                ));
                lines.join("\n")
            }
            MenuAction::Traverse => {
                let start = self.answer(answers, 0)?;
                let order = match answers.get(1).map(String::as_str) {
                    None | Some("") => TraversalOrder::BreadthFirst,
                    Some(raw) => raw.parse::<TraversalOrder>().map_err(ActionError::Input)?,
                };
                let traversal = graph.traversal_tree(&start, order)?;
                let mut lines = vec![format!("Order ({order}): {}", traversal.vertices().join(", "))];
                lines.push(String::new());
                lines.extend(tree_text(graph, &start, order)?);
                lines.join("\n")
            }
            MenuAction::Quit => String::new(),
        };
        Ok(text)
    }
}

fn describe_connectivity(graph: &Graph) -> String {
    let components = graph.components();
    let mut text = if graph.is_connected() {
        "The graph is connected.".to_string()
    } else {
        let groups: Vec<String> = components
            .iter()
            .map(|group| format!("{{{}}}", group.join(", ")))
            .collect();
        format!(
            "The graph is not connected. Components ({}): {}",
            components.len(),
            groups.join(" ")
        )
    };
    if graph.is_directed() {
        let strong = if graph.is_strongly_connected() {
            "\nIt is strongly connected."
        } else {
            "\nIt is not strongly connected."
        };
        text.push_str(strong);
    }
    text
}

fn tree_text(graph: &Graph, root: &str, order: TraversalOrder) -> Result<Vec<String>, ActionError> {
    let traversal = graph.traversal_tree(root, order)?;
    Ok(TreeNode::from_traversal(&traversal)
        .map(|tree| render::tree_lines(&tree))
        .unwrap_or_default())
}

/// Run the TUI application
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if app.prompt.is_some() {
                    // Prompt mode key handling
                    match key.code {
                        KeyCode::Esc => app.cancel_prompt(),
                        KeyCode::Enter => app.prompt_submit(),
                        KeyCode::Backspace => app.prompt_pop(),
                        KeyCode::Char(c) => app.prompt_push(c),
                        _ => {}
                    }
                } else {
                    let total = app.output.len();
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
                        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
                        KeyCode::Char('g') => app.select_first(),
                        KeyCode::Char('G') => app.select_last(),
                        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected(),
                        // Output pane scrolling
                        KeyCode::PageDown | KeyCode::Char('d') => {
                            let page = app.scroll_state.page();
                            app.scroll_state.scroll_down(page, total);
                        }
                        KeyCode::PageUp | KeyCode::Char('u') => {
                            let page = app.scroll_state.page();
                            app.scroll_state.scroll_up(page);
                        }
                        KeyCode::Home => app.scroll_state.scroll_to_top(),
                        KeyCode::End => app.scroll_state.scroll_to_bottom(total),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Render the application UI
fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Menu and output
            Constraint::Length(3), // Footer or prompt
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(chunks[1]);

    render_header(frame, app, chunks[0]);
    render_menu(frame, app, body[0]);
    render_output(frame, app, body[1]);
    if app.prompt.is_some() {
        render_prompt(frame, app, chunks[2]);
    } else {
        render_footer(frame, chunks[2]);
    }
}

/// Render the header
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let text = format!(
        "grafo - {} ({}, {} vertices, {} edges)",
        app.source,
        app.graph.kind(),
        app.graph.order(),
        app.graph.size()
    );
    let header = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_menu(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = MenuAction::ALL
        .iter()
        .enumerate()
        .map(|(i, action)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(action.label()),
            ]))
        })
        .collect();

    let menu = List::new(items)
        .block(
            Block::default()
                .title("Menu")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

    frame.render_stateful_widget(menu, area, &mut app.list_state);
}

/// Render the output pane with virtual scrolling
fn render_output(frame: &mut Frame, app: &mut App, area: Rect) {
    // Border takes 2 rows (top + bottom)
    let viewport_height = (area.height as usize).saturating_sub(2);
    app.scroll_state.set_viewport_height(viewport_height);

    let total = app.output.len();
    let (start, end) = app.scroll_state.visible_range(total);
    let color = if app.output_is_error {
        Color::Red
    } else {
        Color::White
    };
    let lines: Vec<Line> = app.output[start..end]
        .iter()
        .map(|line| Line::styled(line.clone(), Style::default().fg(color)))
        .collect();

    let title = if total > viewport_height && viewport_height > 0 {
        format!("{} ({}-{} of {})", app.output_title, start + 1, end, total)
    } else {
        app.output_title.clone()
    };

    let output = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray)),
    );
    frame.render_widget(output, area);
}

fn render_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let Some(prompt) = &app.prompt else {
        return;
    };

    let title = format!(
        "{} - {} (Enter to confirm, Esc to cancel)",
        prompt.action.label(),
        prompt.current_label()
    );
    let content = Line::from(vec![
        Span::styled(prompt.input.clone(), Style::default().fg(Color::White)),
        Span::styled(
            "_",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let bar = Paragraph::new(content).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(bar, area);
}

/// Render the footer with help text
fn render_footer(frame: &mut Frame, area: Rect) {
    let help_text = Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Run  "),
        Span::styled("d/u", Style::default().fg(Color::Yellow)),
        Span::raw(" Scroll  "),
        Span::styled("Home/End", Style::default().fg(Color::Yellow)),
        Span::raw(" Top/Bot  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
