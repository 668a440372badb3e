//! Sequence-numbered graph updates pushed to connected renderers

use std::collections::HashMap;

use crate::changes::{AppliedChanges, ChangeSummary, EdgeChange, VertexChange};
use crate::graph::GraphSnapshot;
use crate::model::*;
use crate::store::LayoutReport;
use serde::{Deserialize, Serialize};

/// What happened to the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphChange {
    /// A new import replaced the whole graph.
    Replaced { graph: GraphSnapshot },
    /// The applied part of a vertex change batch, plus edges that went with removed vertices.
    VerticesChanged {
        changes: Vec<VertexChange>,
        cascaded_edges: Vec<EdgeId>,
        summary: ChangeSummary,
    },
    /// The applied part of an edge change batch.
    EdgesChanged {
        changes: Vec<EdgeChange>,
        summary: ChangeSummary,
    },
    VertexCreated { vertex: Vertex },
    EdgeConnected { edge: Edge },
    EdgeRelabeled { id: EdgeId, label: String },
    /// Layout merged; the renderer should re-fit its viewport.
    LayoutCompleted {
        root: VertexId,
        positions: HashMap<VertexId, Position>,
    },
}

impl From<LayoutReport> for GraphChange {
    fn from(report: LayoutReport) -> Self {
        GraphChange::LayoutCompleted {
            root: report.root,
            positions: report.positions,
        }
    }
}

impl From<AppliedChanges<VertexChange>> for GraphChange {
    fn from(batch: AppliedChanges<VertexChange>) -> Self {
        GraphChange::VerticesChanged {
            changes: batch.changes,
            cascaded_edges: batch.cascaded_edges,
            summary: batch.summary,
        }
    }
}

impl From<AppliedChanges<EdgeChange>> for GraphChange {
    fn from(batch: AppliedChanges<EdgeChange>) -> Self {
        GraphChange::EdgesChanged {
            changes: batch.changes,
            summary: batch.summary,
        }
    }
}

/// A change stamped with its sequence number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDiff {
    /// Monotonically increasing, starting at 1.
    pub sequence: u64,
    #[serde(flatten)]
    pub change: GraphChange,
}

/// Hands out sequence numbers for updates.
pub struct DiffEngine {
    sequence: u64,
}

impl DiffEngine {
    pub fn new() -> Self {
        DiffEngine { sequence: 0 }
    }

    /// Stamp `change` with the next sequence number.
    pub fn record(&mut self, change: GraphChange) -> GraphDiff {
        self.sequence += 1;
        GraphDiff {
            sequence: self.sequence,
            change,
        }
    }

    /// Sequence number of the last recorded update.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_increments() {
        let mut engine = DiffEngine::new();
        assert_eq!(engine.sequence(), 0);
        let first = engine.record(GraphChange::EdgeRelabeled {
            id: "e1".into(),
            label: "x".to_string(),
        });
        let second = engine.record(GraphChange::from(AppliedChanges::<EdgeChange>::default()));
        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
        assert_eq!(engine.sequence(), 2);
    }

    #[test]
    fn test_diff_serializes_flat() {
        let mut engine = DiffEngine::new();
        let diff = engine.record(GraphChange::EdgeRelabeled {
            id: "eA-B".into(),
            label: "owns".to_string(),
        });
        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(json["sequence"], 1);
        assert_eq!(json["kind"], "edge_relabeled");
        assert_eq!(json["id"], "eA-B");
        assert_eq!(json["label"], "owns");
    }

    #[test]
    fn test_vertex_batch_carries_records() {
        let mut batch = AppliedChanges::default();
        batch.record(
            VertexChange::Position {
                id: "A".into(),
                position: Position::new(5.0, 6.0),
            },
            true,
        );
        batch.record(VertexChange::Remove { id: "ghost".into() }, false);
        batch.record(VertexChange::Remove { id: "B".into() }, true);
        batch.cascade(vec!["eA-B-0".into()]);

        let diff = DiffEngine::new().record(GraphChange::from(batch));
        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(json["kind"], "vertices_changed");
        assert_eq!(json["changes"][0]["type"], "position");
        assert_eq!(json["changes"][0]["id"], "A");
        assert_eq!(json["changes"][0]["position"]["x"], 5.0);
        assert_eq!(json["changes"][1]["id"], "B");
        assert_eq!(json["changes"].as_array().unwrap().len(), 2);
        assert_eq!(json["cascaded_edges"][0], "eA-B-0");
        assert_eq!(json["summary"]["ignored"], 1);
        assert_eq!(json["summary"]["cascaded_edges"], 1);
    }
}
