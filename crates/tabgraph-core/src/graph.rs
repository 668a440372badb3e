//! Graph wrapper using petgraph::StableDiGraph keyed by string vertex/edge ids

use crate::error::{GraphError, Result};
use crate::model::*;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The edge-list graph — a directed multigraph with stable indices.
///
/// Vertices and edges are both kept in insertion order. Vertex order drives
/// default stacking in the renderer, edge order is the tie-break order of the
/// hierarchical layout.
#[derive(Clone)]
pub struct Graph {
    inner: StableDiGraph<Vertex, Edge>,
    vertex_index: HashMap<VertexId, NodeIndex>,
    edge_index: HashMap<EdgeId, EdgeIndex>,
    vertex_order: Vec<NodeIndex>,
    edge_order: Vec<EdgeIndex>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("vertex_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

/// Plain (vertices, edges) view of a graph, as sent to renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            inner: StableDiGraph::new(),
            vertex_index: HashMap::new(),
            edge_index: HashMap::new(),
            vertex_order: Vec::new(),
            edge_order: Vec::new(),
        }
    }

    /// Append a vertex. Fails if its id is already taken.
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<()> {
        if self.vertex_index.contains_key(&vertex.id) {
            return Err(GraphError::DuplicateId(vertex.id));
        }
        let id = vertex.id.clone();
        let idx = self.inner.add_node(vertex);
        self.vertex_index.insert(id, idx);
        self.vertex_order.push(idx);
        Ok(())
    }

    /// Append an edge. Both endpoints must already exist and the id must be unused.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        let source = self.endpoint(&edge, &edge.source)?;
        let target = self.endpoint(&edge, &edge.target)?;
        if self.edge_index.contains_key(&edge.id) {
            return Err(GraphError::DuplicateEdge(edge.id));
        }
        let id = edge.id.clone();
        let idx = self.inner.add_edge(source, target, edge);
        self.edge_index.insert(id, idx);
        self.edge_order.push(idx);
        Ok(())
    }

    fn endpoint(&self, edge: &Edge, end: &VertexId) -> Result<NodeIndex> {
        self.vertex_index
            .get(end)
            .copied()
            .ok_or_else(|| GraphError::InvalidEndpoint {
                from: edge.source.clone(),
                to: edge.target.clone(),
                missing: end.clone(),
            })
    }

    /// Get a vertex by id.
    pub fn vertex(&self, id: &VertexId) -> Option<&Vertex> {
        let idx = self.vertex_index.get(id)?;
        self.inner.node_weight(*idx)
    }

    /// Get a mutable vertex by id.
    pub fn vertex_mut(&mut self, id: &VertexId) -> Option<&mut Vertex> {
        let idx = self.vertex_index.get(id)?;
        self.inner.node_weight_mut(*idx)
    }

    /// Get an edge by id.
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        let idx = self.edge_index.get(id)?;
        self.inner.edge_weight(*idx)
    }

    /// Get a mutable edge by id. Endpoints must not be changed through this.
    pub fn edge_mut(&mut self, id: &EdgeId) -> Option<&mut Edge> {
        let idx = self.edge_index.get(id)?;
        self.inner.edge_weight_mut(*idx)
    }

    pub fn contains_vertex(&self, id: &VertexId) -> bool {
        self.vertex_index.contains_key(id)
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edge_index.contains_key(id)
    }

    /// Total number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertex_order
            .iter()
            .filter_map(move |&idx| self.inner.node_weight(idx))
    }

    /// Iterate over edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_order
            .iter()
            .filter_map(move |&idx| self.inner.edge_weight(idx))
    }

    /// Remove a vertex and every edge touching it.
    ///
    /// Returns the vertex together with the ids of the dropped edges, in edge order.
    pub fn remove_vertex(&mut self, id: &VertexId) -> Option<(Vertex, Vec<EdgeId>)> {
        let idx = self.vertex_index.remove(id)?;

        let incident: HashSet<EdgeIndex> = self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.inner.edges_directed(idx, Direction::Incoming))
            .map(|edge_ref| edge_ref.id())
            .collect();
        let dropped: Vec<EdgeId> = self
            .edge_order
            .iter()
            .filter(|e| incident.contains(e))
            .filter_map(|&e| self.inner.edge_weight(e))
            .map(|edge| edge.id.clone())
            .collect();
        for edge_id in &dropped {
            self.edge_index.remove(edge_id);
        }
        self.edge_order.retain(|e| !incident.contains(e));
        self.vertex_order.retain(|&v| v != idx);

        let vertex = self.inner.remove_node(idx)?;
        Some((vertex, dropped))
    }

    /// Remove an edge by id.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Option<Edge> {
        let idx = self.edge_index.remove(id)?;
        self.edge_order.retain(|&e| e != idx);
        self.inner.remove_edge(idx)
    }

    /// Copy out the vertex and edge collections in order.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            vertices: self.vertices().cloned().collect(),
            edges: self.edges().cloned().collect(),
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
