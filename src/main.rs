use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, level_filters::LevelFilter};

use grafo::check;
use grafo::config::Config;
use grafo::export::{self, ExportData, ExportFormat};
use grafo::graph::{format_weight, TraversalOrder};
use grafo::logging;
use grafo::parser::{self, LoadOptions, LoadedGraph};
use grafo::render;
use grafo::ui::{self, App, TreeNode};

#[derive(Parser)]
#[command(name = "grafo")]
#[command(version)]
#[command(about = "Weighted graph explorer with an interactive terminal menu", long_about = None)]
struct Cli {
    /// Config file (defaults to ./grafo.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Treat edges as directed arcs
    #[arg(long, global = true)]
    directed: bool,

    /// Uppercase vertex names
    #[arg(long, global = true)]
    uppercase: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GraphFile {
    /// Graph file (defaults to the configured input)
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the adjacency list
    Show(GraphFile),
    /// Print the adjacency matrix
    Matrix(GraphFile),
    /// Print counts, weights and per-vertex degrees
    Summary {
        #[command(flatten)]
        graph: GraphFile,

        /// Heading of the summary (defaults to the graph name)
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Load graph files and report structural properties
    Check {
        /// A graph file or a directory of graph files
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// List every simple path between two vertices
    Paths {
        #[command(flatten)]
        graph: GraphFile,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Find the minimum-weight path between two vertices
    Shortest {
        #[command(flatten)]
        graph: GraphFile,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Build a minimum spanning tree with Prim's algorithm
    Mst {
        #[command(flatten)]
        graph: GraphFile,
        #[arg(long)]
        root: String,
    },
    /// Traverse from a start vertex and print the traversal tree
    Traverse {
        #[command(flatten)]
        graph: GraphFile,
        #[arg(long)]
        start: String,
        /// bfs or dfs
        #[arg(long, default_value = "bfs")]
        order: TraversalOrder,
    },
    /// Export the graph and its properties
    Export {
        #[command(flatten)]
        graph: GraphFile,

        /// json, csv, markdown, html or dot
        #[arg(short, long)]
        format: ExportFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Open the interactive menu (default)
    Menu(GraphFile),
}

fn main() -> Result<()> {
    let started = Instant::now();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.directed {
        config.directed = true;
    }
    if cli.uppercase {
        config.uppercase = true;
    }

    // The menu owns the terminal; stderr logging would corrupt the screen.
    let configured = match cli.command {
        None | Some(Commands::Menu(_)) => LevelFilter::OFF,
        _ => config.level_filter()?,
    };
    logging::init(logging::effective_level(configured, cli.verbose))
        .context("Failed to initialise logging")?;

    let result = run(cli.command, &config);
    debug!(elapsed_ms = started.elapsed().as_millis() as u64, "finished");
    result
}

fn run(command: Option<Commands>, config: &Config) -> Result<()> {
    let options = config.load_options();
    let load = |file: &GraphFile| load_graph(file, config, &options);

    match command {
        Some(Commands::Show(file)) => {
            print!("{}", render::adjacency_list(&load(&file)?.graph));
        }
        Some(Commands::Matrix(file)) => {
            print!("{}", render::adjacency_matrix(&load(&file)?.graph));
        }
        Some(Commands::Summary { graph, title }) => {
            let loaded = load(&graph)?;
            let title = title.unwrap_or(loaded.name);
            print!("{}", render::summary(&loaded.graph, &title));
        }
        Some(Commands::Check { path }) => check(&path, &options)?,
        Some(Commands::Paths { graph, from, to }) => {
            let graph = load(&graph)?.graph;
            let (from, to) = (options.normalize(&from), options.normalize(&to));
            let paths = graph.all_paths(&from, &to)?;
            print!("{}", render::path_listing(&from, &to, &paths));
        }
        Some(Commands::Shortest { graph, from, to }) => {
            let graph = load(&graph)?.graph;
            let (from, to) = (options.normalize(&from), options.normalize(&to));
            match graph.shortest_path(&from, &to)? {
                Some(path) => {
                    println!("Shortest path: {path}");
                    println!("Total weight: {}", format_weight(path.total_weight()));
                }
                None => bail!("No path from {from} to {to}"),
            }
        }
        Some(Commands::Mst { graph, root }) => {
            let graph = load(&graph)?.graph;
            let root = options.normalize(&root);
            let tree = graph.minimum_spanning_tree(&root)?;
            print_tree(&tree, &root, TraversalOrder::DepthFirst)?;
            println!();
            println!(
                "Edges: {} | Total weight: {}",
                tree.size(),
                format_weight(tree.total_weight())
            );
        }
        Some(Commands::Traverse {
            graph,
            start,
            order,
        }) => {
            let graph = load(&graph)?.graph;
            let start = options.normalize(&start);
            let traversal = graph.traversal_tree(&start, order)?;
            println!("Order ({order}): {}", traversal.vertices().join(", "));
            println!();
            print_tree(&graph, &start, order)?;
        }
        Some(Commands::Export {
            graph,
            format,
            output,
        }) => {
            let loaded = load(&graph)?;
            let data = ExportData::from_graph(loaded.name, &loaded.graph);
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    export::export_with(format, &data, &config.html, &mut writer)?;
                    writer.flush()?;
                    eprintln!("Exported {} to {}", format, path.display());
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    export::export_with(format, &data, &config.html, &mut stdout)?;
                }
            }
        }
        Some(Commands::Menu(file)) => run_menu(load(&file)?, options)?,
        None => run_menu(load(&GraphFile { file: None })?, options)?,
    }
    Ok(())
}

fn load_graph(file: &GraphFile, config: &Config, options: &LoadOptions) -> Result<LoadedGraph> {
    let path = file.file.as_deref().unwrap_or(&config.input);
    parser::parse_file(path, options)
        .with_context(|| format!("Failed to load graph from {}", path.display()))
}

fn print_tree(graph: &grafo::graph::Graph, root: &str, order: TraversalOrder) -> Result<()> {
    let traversal = graph.traversal_tree(root, order)?;
    if let Some(tree) = TreeNode::from_traversal(&traversal) {
        for line in render::tree_lines(&tree) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Loads every graph file under `path`, reporting failures and continuing.
fn check(path: &Path, options: &LoadOptions) -> Result<()> {
    let report = check::check_path(path, options);
    if report.total() == 0 {
        bail!("No graph files found in {}", path.display());
    }

    for summary in &report.loaded {
        println!(
            "ok      {} ({}): {} vertices, {} edges, connected: {}, cyclic: {}, planar: {}",
            summary.path.display(),
            summary.format,
            summary.vertices,
            summary.edges,
            yes_no(summary.connected),
            yes_no(summary.cyclic),
            yes_no(summary.planar),
        );
    }
    for failure in &report.failed {
        println!("FAILED  {}: {}", failure.path.display(), failure.error);
    }

    if !report.is_success() {
        bail!(
            "{} of {} graph files failed to load",
            report.failed.len(),
            report.total()
        );
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn run_menu(loaded: LoadedGraph, options: LoadOptions) -> Result<()> {
    let mut app = App::new(loaded.graph, loaded.name, options);

    enable_raw_mode()?;
    let result = run_terminal(&mut app);

    // Restore the terminal before reporting any error
    let restored = restore_terminal();
    result.context("Terminal UI failed")?;
    restored.context("Failed to restore the terminal")
}

fn run_terminal(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    ui::run_app(&mut terminal, app)?;
    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}
