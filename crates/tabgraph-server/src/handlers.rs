//! REST API handlers for the session server

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tabgraph_core::{ChangeSummary, EdgeChange, EdgeId, GraphSnapshot, VertexChange, VertexId};

use crate::{ApiError, ImportReport, ServerState};

/// Response structure for the graph API
#[derive(Debug, Serialize)]
pub struct GraphResponse {
    #[serde(flatten)]
    pub graph: GraphSnapshot,
    pub sequence: u64,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateVertexRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    pub source: VertexId,
    pub target: VertexId,
}

#[derive(Debug, Deserialize)]
pub struct RelabelRequest {
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub root: VertexId,
}

/// Get the current graph as JSON
pub async fn get_graph(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let (graph, sequence) = state.snapshot().await;
    Json(GraphResponse { graph, sequence })
}

/// Replace the graph with an uploaded CSV table.
pub async fn import_table(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<ImportReport>, ApiError> {
    Ok(Json(state.import_csv(&body).await?))
}

pub async fn create_vertex(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CreateVertexRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vertex = state.create_vertex(&request.name).await?;
    Ok((StatusCode::CREATED, Json(vertex)))
}

pub async fn connect(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ConnectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let edge = state.connect(&request.source, &request.target).await?;
    Ok((StatusCode::CREATED, Json(edge)))
}

pub async fn relabel_edge(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(request): Json<RelabelRequest>,
) -> Result<StatusCode, ApiError> {
    state.relabel_edge(&EdgeId(id), &request.label).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn vertex_changes(
    State(state): State<Arc<ServerState>>,
    Json(changes): Json<Vec<VertexChange>>,
) -> Json<ChangeSummary> {
    Json(state.apply_vertex_changes(changes).await)
}

pub async fn edge_changes(
    State(state): State<Arc<ServerState>>,
    Json(changes): Json<Vec<EdgeChange>>,
) -> Json<ChangeSummary> {
    Json(state.apply_edge_changes(changes).await)
}

pub async fn layout(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<LayoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.layout(&request.root).await?;
    Ok(Json(report))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(health)
}
