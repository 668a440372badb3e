//! HTTP + WebSocket session server
//!
//! Holds one [`GraphStore`] behind a lock and exposes its commands to a
//! browser renderer. Every successful mutation is broadcast to WebSocket
//! clients as a sequence-numbered [`GraphDiff`].

pub mod error;
pub mod handlers;
pub mod router;
pub mod websocket;

use std::sync::Arc;

use serde::Serialize;
use tabgraph_core::{
    CanvasConfig, ChangeSummary, DiffEngine, Edge, EdgeChange, EdgeId, GraphChange, GraphDiff,
    GraphSnapshot, GraphStore, LayoutReport, Scatter, Vertex, VertexChange, VertexId,
};
use tabgraph_ingest::RowWarning;
use tokio::sync::{Mutex, RwLock, broadcast};
use tracing::{debug, info};

pub use error::ApiError;

/// Capacity of the update broadcast channel.
const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// Listen address.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// How imports place their vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportSettings {
    pub canvas: CanvasConfig,
    pub seed: Option<u64>,
}

/// Outcome of an import, read under the same lock that installed the graph.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub warnings: Vec<RowWarning>,
}

/// Shared state of one editing session.
pub struct ServerState {
    pub store: RwLock<GraphStore>,
    pub diff_tx: broadcast::Sender<String>,
    diffs: Mutex<DiffEngine>,
    import: ImportSettings,
}

impl ServerState {
    pub fn new(store: GraphStore, import: ImportSettings) -> Self {
        let (diff_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        ServerState {
            store: RwLock::new(store),
            diff_tx,
            diffs: Mutex::new(DiffEngine::new()),
            import,
        }
    }

    /// Current graph plus the sequence number it reflects.
    pub async fn snapshot(&self) -> (GraphSnapshot, u64) {
        let store = self.store.read().await;
        let sequence = self.diffs.lock().await.sequence();
        (store.graph().snapshot(), sequence)
    }

    /// Stamp and broadcast a change. Callers hold the store write lock so
    /// sequence order matches mutation order.
    async fn publish(&self, change: GraphChange) -> GraphDiff {
        let diff = self.diffs.lock().await.record(change);
        match serde_json::to_string(&websocket::WsMessage::Update { diff: diff.clone() }) {
            Ok(json) => {
                // No receivers just means no renderer is connected.
                let _ = self.diff_tx.send(json);
            }
            Err(e) => tracing::error!("Failed to serialize graph update: {}", e),
        }
        diff
    }

    /// Parse and build `csv` off-lock, then swap it in. A failed import leaves
    /// the current graph untouched.
    pub async fn import_csv(&self, csv: &[u8]) -> Result<ImportReport, ApiError> {
        let mut scatter = Scatter::from_seed_option(self.import.seed, &self.import.canvas);
        let outcome = tabgraph_ingest::import(csv, &mut scatter)?;

        let mut store = self.store.write().await;
        store.replace(outcome.graph);
        let graph = store.graph().snapshot();
        let report = ImportReport {
            vertex_count: graph.vertices.len(),
            edge_count: graph.edges.len(),
            warnings: outcome.warnings,
        };
        self.publish(GraphChange::Replaced { graph }).await;
        Ok(report)
    }

    /// Fold a vertex batch and broadcast the records that applied.
    pub async fn apply_vertex_changes(&self, changes: Vec<VertexChange>) -> ChangeSummary {
        let mut store = self.store.write().await;
        let batch = store.apply_vertex_changes(changes);
        let summary = batch.summary;
        debug!("Vertex batch: {:?}", summary);
        if !summary.is_empty() {
            self.publish(GraphChange::from(batch)).await;
        }
        summary
    }

    pub async fn apply_edge_changes(&self, changes: Vec<EdgeChange>) -> ChangeSummary {
        let mut store = self.store.write().await;
        let batch = store.apply_edge_changes(changes);
        let summary = batch.summary;
        debug!("Edge batch: {:?}", summary);
        if !summary.is_empty() {
            self.publish(GraphChange::from(batch)).await;
        }
        summary
    }

    pub async fn connect(&self, source: &VertexId, target: &VertexId) -> Result<Edge, ApiError> {
        let mut store = self.store.write().await;
        let edge = store.connect(source, target)?;
        self.publish(GraphChange::EdgeConnected { edge: edge.clone() })
            .await;
        Ok(edge)
    }

    pub async fn create_vertex(&self, name: &str) -> Result<Vertex, ApiError> {
        let mut store = self.store.write().await;
        let vertex = store.create_vertex(name)?;
        self.publish(GraphChange::VertexCreated {
            vertex: vertex.clone(),
        })
        .await;
        Ok(vertex)
    }

    pub async fn relabel_edge(&self, id: &EdgeId, label: &str) -> Result<(), ApiError> {
        let mut store = self.store.write().await;
        store.relabel_edge(id, label)?;
        self.publish(GraphChange::EdgeRelabeled {
            id: id.clone(),
            label: label.to_string(),
        })
        .await;
        Ok(())
    }

    /// Lay out from `root`; the broadcast `layout_completed` tells renderers to re-fit.
    pub async fn layout(&self, root: &VertexId) -> Result<LayoutReport, ApiError> {
        let mut store = self.store.write().await;
        let report = store.layout_from(root)?;
        self.publish(GraphChange::from(report.clone())).await;
        Ok(report)
    }
}

/// The session server.
pub struct TabgraphServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl TabgraphServer {
    pub fn new(store: GraphStore, import: ImportSettings, config: ServerConfig) -> Self {
        TabgraphServer {
            state: Arc::new(ServerState::new(store, import)),
            config,
        }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Listening on http://{}", listener.local_addr()?);
        axum::serve(listener, router::create_router(self.state)).await?;
        Ok(())
    }
}
