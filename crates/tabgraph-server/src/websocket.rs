//! WebSocket channel to the renderer
//!
//! The renderer receives the full graph on connect and every update after
//! that. It sends back its change batches and gestures (connect, vertex
//! click for layout, edge label edits) as commands.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tabgraph_core::{EdgeChange, EdgeId, GraphDiff, GraphSnapshot, VertexChange, VertexId};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::ServerState;

/// WebSocket message types for client-server communication
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Client requests the full graph
    RequestFullGraph,
    /// Server sends the full graph
    FullGraph { graph: GraphSnapshot, sequence: u64 },
    /// Server broadcasts an update
    Update { diff: GraphDiff },
    /// Client forwards a vertex change batch
    VertexChanges { changes: Vec<VertexChange> },
    /// Client forwards an edge change batch
    EdgeChanges { changes: Vec<EdgeChange> },
    /// Client finished a connect gesture
    Connect { source: VertexId, target: VertexId },
    /// Client clicked a vertex
    Layout { root: VertexId },
    /// Client edited an edge label
    RelabelEdge { id: EdgeId, label: String },
    /// Client asks for a new vertex
    CreateVertex { name: String },
    /// Ping/pong for keepalive
    Ping,
    Pong,
    /// Error message
    Error { message: String },
}

/// Handle WebSocket upgrade requests
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn full_graph(state: &ServerState) -> WsMessage {
    let (graph, sequence) = state.snapshot().await;
    WsMessage::FullGraph { graph, sequence }
}

/// Handle an individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<ServerState>) {
    info!("New WebSocket connection established");

    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.diff_tx.subscribe();

    // Send full graph immediately after connection
    let full = full_graph(&state).await;
    match serde_json::to_string(&full) {
        Ok(json) => {
            if sender.send(Message::Text(json)).await.is_err() {
                warn!("Failed to send initial full graph to WebSocket client");
                return;
            }
        }
        Err(e) => warn!("Failed to serialize full graph message: {}", e),
    }

    // Direct replies (errors, pongs, requested graphs) go through this channel
    // so only the send task touches the socket.
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<WsMessage>();

    let state_clone = Arc::clone(&state);
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    debug!("Received WebSocket message: {}", text);
                    let reply = match serde_json::from_str::<WsMessage>(&text) {
                        Ok(ws_msg) => handle_client_message(ws_msg, &state_clone).await,
                        Err(e) => {
                            warn!("Failed to parse WebSocket message: {}", e);
                            Some(WsMessage::Error {
                                message: format!("invalid message: {}", e),
                            })
                        }
                    };
                    if let Some(reply) = reply {
                        if reply_tx.send(reply).is_err() {
                            break;
                        }
                    }
                }
                Message::Close(_) => {
                    debug!("WebSocket client disconnected");
                    break;
                }
                _ => {}
            }
        }
    });

    let mut send_task = tokio::spawn(async move {
        loop {
            let text = tokio::select! {
                update = rx.recv() => match update {
                    Ok(text) => text,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("WebSocket client lagged behind by {} updates", n);
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                reply = reply_rx.recv() => match reply.map(|r| serde_json::to_string(&r)) {
                    Some(Ok(text)) => text,
                    Some(Err(e)) => {
                        warn!("Failed to serialize reply: {}", e);
                        continue;
                    }
                    None => break,
                },
            };
            if sender.send(Message::Text(text)).await.is_err() {
                debug!("Failed to send message to WebSocket client");
                break;
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    info!("WebSocket connection closed");
}

/// Apply a client message. Successful mutations reach the client through the
/// broadcast; the return value is a direct reply, if any.
pub async fn handle_client_message(msg: WsMessage, state: &ServerState) -> Option<WsMessage> {
    let outcome = match msg {
        WsMessage::RequestFullGraph => return Some(full_graph(state).await),
        WsMessage::Ping => return Some(WsMessage::Pong),
        WsMessage::VertexChanges { changes } => {
            state.apply_vertex_changes(changes).await;
            Ok(())
        }
        WsMessage::EdgeChanges { changes } => {
            state.apply_edge_changes(changes).await;
            Ok(())
        }
        WsMessage::Connect { source, target } => state.connect(&source, &target).await.map(drop),
        WsMessage::Layout { root } => state.layout(&root).await.map(drop),
        WsMessage::RelabelEdge { id, label } => state.relabel_edge(&id, &label).await,
        WsMessage::CreateVertex { name } => state.create_vertex(&name).await.map(drop),
        other => {
            debug!("Ignoring server-side message from client: {:?}", other);
            Ok(())
        }
    };
    outcome.err().map(|e| WsMessage::Error {
        message: e.to_string(),
    })
}
