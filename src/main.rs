//! tabgraph CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "tabgraph")]
#[command(about = "Turn edge-list tables into editable, auto-laid-out graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./tabgraph.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for default vertex placement
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the editing session server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// CSV table to load at startup
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Build a graph from a CSV table and print it as JSON
    Build {
        /// CSV table with source_node_name and destination_node_name columns
        input: PathBuf,
    },
    /// Build a graph and print the hierarchical layout from a root
    Layout {
        input: PathBuf,

        /// Vertex to lay out from
        #[arg(short, long)]
        root: String,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("tabgraph={}", log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = commands::load_config(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.command {
        Commands::Serve { port, host, input } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            commands::serve(config, input).await
        }
        Commands::Build { input } => commands::build(&config, &input),
        Commands::Layout { input, root } => commands::layout(&config, &input, &root),
        Commands::Version => {
            println!("tabgraph v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
