use anyhow::{Context, Result};
use clap::Parser;
use findcycles::cycles::Strategy;
use findcycles::dot;
use findcycles::graph::Graph;
use findcycles::report::{self, Analysis, OutputFormat};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "findcycles")]
#[command(version)]
#[command(
    about = "Reduce a Graphviz DOT graph to the nodes and edges that lie on cycles",
    long_about = None
)]
struct Cli {
    /// DOT file to read (defaults to stdin)
    input: Option<PathBuf>,

    /// File to write (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cycle search strategy: exhaustive or components
    #[arg(short, long, default_value = "exhaustive", env = "FINDCYCLES_STRATEGY")]
    strategy: Strategy,

    /// Output format: dot or json
    #[arg(short, long, default_value = "dot")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_graph(input: Option<&PathBuf>) -> Result<Graph> {
    match input {
        Some(path) if path.as_os_str() != "-" => dot::parse_file(path)
            .with_context(|| format!("invalid DOT input in {}", path.display())),
        _ => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
            dot::parse(&content).context("invalid DOT input")
        }
    }
}

fn write_output(analysis: &Analysis, format: OutputFormat, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            report::export(format, analysis, &mut writer)
                .and_then(|()| writer.flush())
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut writer = io::stdout().lock();
            report::export(format, analysis, &mut writer)
                .and_then(|()| writer.flush())
                .context("failed to write standard output")
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let graph = load_graph(cli.input.as_ref())?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "read graph"
    );

    let analysis = Analysis::run(&graph, cli.strategy);
    info!(
        participants = analysis.participants.len(),
        dropped_edges = analysis.dropped_edges(),
        "reduced graph to cycles"
    );

    write_output(&analysis, cli.format, cli.output.as_ref())
}
