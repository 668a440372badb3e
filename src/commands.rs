//! CLI command implementations

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tabgraph_core::{Graph, GraphSnapshot, GraphStore, Position, Scatter, TabgraphConfig};
use tabgraph_ingest::{BuildOutcome, RowWarning};
use tabgraph_server::{ImportSettings, ServerConfig, TabgraphServer};

pub fn load_config(path: Option<&Path>) -> anyhow::Result<TabgraphConfig> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    Ok(TabgraphConfig::discover(path, &cwd)?)
}

fn import(config: &TabgraphConfig, input: &Path) -> anyhow::Result<BuildOutcome> {
    let mut scatter = Scatter::from_seed_option(config.seed, &config.canvas);
    let outcome = tabgraph_ingest::import_path(input, &mut scatter)
        .with_context(|| format!("import of {} failed", input.display()))?;
    Ok(outcome)
}

pub async fn serve(config: TabgraphConfig, input: Option<PathBuf>) -> anyhow::Result<()> {
    tracing::info!(
        "Starting tabgraph server on {}:{}",
        config.server.host,
        config.server.port
    );

    let graph = match input {
        Some(path) => import(&config, &path)?.graph,
        None => Graph::new(),
    };

    let store = GraphStore::new(
        graph,
        Scatter::from_seed_option(config.seed, &config.canvas),
        config.layout,
    );
    let import_settings = ImportSettings {
        canvas: config.canvas,
        seed: config.seed,
    };
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    TabgraphServer::new(store, import_settings, server_config).start().await
}

#[derive(Serialize)]
struct BuildReport {
    #[serde(flatten)]
    graph: GraphSnapshot,
    warnings: Vec<RowWarning>,
}

pub fn build(config: &TabgraphConfig, input: &Path) -> anyhow::Result<()> {
    let outcome = import(config, input)?;
    let report = BuildReport {
        graph: outcome.graph.snapshot(),
        warnings: outcome.warnings,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn layout(config: &TabgraphConfig, input: &Path, root: &str) -> anyhow::Result<()> {
    let outcome = import(config, input)?;
    let positions = tabgraph_core::layout(&root.into(), &outcome.graph, &config.layout)?;

    tracing::info!(
        "{} of {} vertices reachable from {}",
        positions.len(),
        outcome.graph.vertex_count(),
        root
    );
    let sorted: BTreeMap<_, Position> = positions.into_iter().collect();
    println!("{}", serde_json::to_string_pretty(&sorted)?);
    Ok(())
}
