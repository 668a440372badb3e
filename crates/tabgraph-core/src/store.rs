//! Interactive graph store: the session's authoritative vertices and edges

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::changes::{AppliedChanges, EdgeChange, VertexChange};
use crate::config::LayoutConfig;
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::layout;
use crate::model::*;
use crate::scatter::Scatter;

/// Emitted once a layout has been merged into the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub root: VertexId,
    /// New positions of the reached vertices. Everything else kept its position.
    pub positions: HashMap<VertexId, Position>,
}

/// Owns the live graph and applies change batches and user commands to it.
///
/// Every method runs to completion on the caller's thread; a caller sharing
/// the store across tasks must put the whole store behind one lock.
#[derive(Debug, Clone)]
pub struct GraphStore {
    graph: Graph,
    scatter: Scatter,
    spacing: LayoutConfig,
}

impl GraphStore {
    pub fn new(graph: Graph, scatter: Scatter, spacing: LayoutConfig) -> Self {
        GraphStore {
            graph,
            scatter,
            spacing,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.graph.vertices()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edges()
    }

    /// Install a freshly imported graph, returning the previous one.
    pub fn replace(&mut self, graph: Graph) -> Graph {
        info!(
            "Replacing graph: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        std::mem::replace(&mut self.graph, graph)
    }

    /// Fold a batch of vertex changes, in order.
    pub fn apply_vertex_changes(
        &mut self,
        changes: Vec<VertexChange>,
    ) -> AppliedChanges<VertexChange> {
        let mut batch = AppliedChanges::default();
        for change in changes {
            let applied = match &change {
                VertexChange::Position { id, position } => match self.graph.vertex_mut(id) {
                    Some(vertex) => {
                        vertex.position = *position;
                        true
                    }
                    None => false,
                },
                VertexChange::Select { id, selected } => match self.graph.vertex_mut(id) {
                    Some(vertex) => {
                        vertex.selected = *selected;
                        true
                    }
                    None => false,
                },
                VertexChange::Remove { id } => match self.graph.remove_vertex(id) {
                    Some((_, dropped)) => {
                        batch.cascade(dropped);
                        true
                    }
                    None => false,
                },
            };
            if !applied {
                debug!("Ignoring change for unknown vertex {}", change.target());
            }
            batch.record(change, applied);
        }
        batch
    }

    /// Fold a batch of edge changes, in order.
    pub fn apply_edge_changes(&mut self, changes: Vec<EdgeChange>) -> AppliedChanges<EdgeChange> {
        let mut batch = AppliedChanges::default();
        for change in changes {
            let applied = match &change {
                EdgeChange::Select { id, selected } => match self.graph.edge_mut(id) {
                    Some(edge) => {
                        edge.selected = *selected;
                        true
                    }
                    None => false,
                },
                EdgeChange::Remove { id } => self.graph.remove_edge(id).is_some(),
            };
            if !applied {
                debug!("Ignoring change for unknown edge {}", change.target());
            }
            batch.record(change, applied);
        }
        batch
    }

    /// Draw a new edge between two existing vertices.
    pub fn connect(&mut self, source: &VertexId, target: &VertexId) -> Result<Edge> {
        for end in [source, target] {
            if !self.graph.contains_vertex(end) {
                return Err(GraphError::InvalidEndpoint {
                    from: source.clone(),
                    to: target.clone(),
                    missing: end.clone(),
                });
            }
        }

        let base = EdgeId::for_connection(source, target);
        let mut id = base.clone();
        let mut n = 0;
        while self.graph.contains_edge(&id) {
            n += 1;
            id = base.with_suffix(n);
        }

        let edge = Edge {
            id,
            source: source.clone(),
            target: target.clone(),
            label: format!("Connection {}-{}", source, target),
            attributes: HashMap::new(),
            selected: false,
        };
        self.graph.add_edge(edge.clone())?;
        debug!("Connected {} -> {} as {}", source, target, edge.id);
        Ok(edge)
    }

    /// Add a vertex named `name` (trimmed) at a scatter position.
    pub fn create_vertex(&mut self, name: &str) -> Result<Vertex> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GraphError::EmptyName);
        }
        let id = VertexId::new(name);
        if self.graph.contains_vertex(&id) {
            return Err(GraphError::DuplicateId(id));
        }

        let vertex = Vertex::named(name, self.scatter.place());
        self.graph.add_vertex(vertex.clone())?;
        debug!("Created vertex {}", vertex.id);
        Ok(vertex)
    }

    /// Replace an edge's label, leaving everything else on it untouched.
    pub fn relabel_edge(&mut self, id: &EdgeId, label: &str) -> Result<()> {
        let edge = self
            .graph
            .edge_mut(id)
            .ok_or_else(|| GraphError::UnknownEdge(id.clone()))?;
        edge.label = label.to_string();
        Ok(())
    }

    /// Run the hierarchical layout from `root` and merge the result.
    pub fn layout_from(&mut self, root: &VertexId) -> Result<LayoutReport> {
        let positions = layout::layout(root, &self.graph, &self.spacing)?;
        for (id, position) in &positions {
            if let Some(vertex) = self.graph.vertex_mut(id) {
                vertex.position = *position;
            }
        }
        info!(
            "Layout from {} moved {} of {} vertices",
            root,
            positions.len(),
            self.graph.vertex_count()
        );
        Ok(LayoutReport {
            root: root.clone(),
            positions,
        })
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        GraphStore::new(Graph::new(), Scatter::default(), LayoutConfig::default())
    }
}
