//! Incremental change records emitted by the renderer

use serde::{Deserialize, Serialize};

use crate::model::{EdgeId, Position, VertexId};

/// One edit to a vertex, identified by target id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VertexChange {
    /// Vertex dragged to a new position.
    Position { id: VertexId, position: Position },
    /// Selection toggled.
    Select { id: VertexId, selected: bool },
    /// Vertex deleted, together with its edges.
    Remove { id: VertexId },
}

impl VertexChange {
    pub fn target(&self) -> &VertexId {
        match self {
            VertexChange::Position { id, .. }
            | VertexChange::Select { id, .. }
            | VertexChange::Remove { id } => id,
        }
    }
}

/// One edit to an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeChange {
    Select { id: EdgeId, selected: bool },
    Remove { id: EdgeId },
}

impl EdgeChange {
    pub fn target(&self) -> &EdgeId {
        match self {
            EdgeChange::Select { id, .. } | EdgeChange::Remove { id } => id,
        }
    }
}

/// Outcome of folding one change batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    /// Records applied to an existing target.
    pub applied: usize,
    /// Records naming an id that no longer exists.
    pub ignored: usize,
    /// Edges dropped because a vertex they touched was removed.
    pub cascaded_edges: usize,
}

impl ChangeSummary {
    pub fn is_empty(&self) -> bool {
        self.applied == 0
    }
}

/// The records of one batch that hit an existing target, in batch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedChanges<C> {
    pub changes: Vec<C>,
    /// Ids of edges dropped along with a removed vertex.
    pub cascaded_edges: Vec<EdgeId>,
    pub summary: ChangeSummary,
}

impl<C> AppliedChanges<C> {
    fn new() -> Self {
        AppliedChanges {
            changes: Vec::new(),
            cascaded_edges: Vec::new(),
            summary: ChangeSummary::default(),
        }
    }

    pub(crate) fn record(&mut self, change: C, applied: bool) {
        if applied {
            self.summary.applied += 1;
            self.changes.push(change);
        } else {
            self.summary.ignored += 1;
        }
    }

    pub(crate) fn cascade(&mut self, edges: Vec<EdgeId>) {
        self.summary.cascaded_edges += edges.len();
        self.cascaded_edges.extend(edges);
    }
}

impl<C> Default for AppliedChanges<C> {
    fn default() -> Self {
        Self::new()
    }
}
