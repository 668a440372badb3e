//! Axum router setup for the session server

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;

use crate::{
    ServerState,
    handlers::{
        connect, create_vertex, edge_changes, get_graph, health_check, import_table, layout,
        relabel_edge, vertex_changes,
    },
    websocket::ws_handler,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // WebSocket endpoint for the renderer
        .route("/ws", get(ws_handler))
        // REST API endpoints
        .route("/api/health", get(health_check))
        .route("/api/graph", get(get_graph))
        .route("/api/import", post(import_table))
        .route("/api/vertices", post(create_vertex))
        .route("/api/edges", post(connect))
        .route("/api/edges/:id/label", put(relabel_edge))
        .route("/api/changes/vertices", post(vertex_changes))
        .route("/api/changes/edges", post(edge_changes))
        .route("/api/layout", post(layout))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
