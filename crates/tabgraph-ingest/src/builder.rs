//! Graph builder: folds edge-list rows into vertices and edges

use std::collections::HashMap;

use serde::Serialize;
use tabgraph_core::{Edge, EdgeId, Graph, GraphError, Scatter, Vertex, VertexId};
use thiserror::Error;
use tracing::{debug, warn};

/// Column naming the edge's source vertex.
pub const SOURCE_COLUMN: &str = "source_node_name";
/// Column naming the edge's destination vertex.
pub const TARGET_COLUMN: &str = "destination_node_name";
/// Optional column holding the initial edge label.
pub const LABEL_COLUMN: &str = "label";

/// One table row: column name to cell text.
pub type Row = HashMap<String, String>;

/// Why a row produced no edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MalformedRow {
    #[error("missing source or destination node name")]
    MissingEndpoint,
}

/// A skipped row. Never aborts the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowWarning {
    /// Zero-based ordinal of the row in the input.
    pub row: usize,
    pub reason: MalformedRow,
}

/// Result of a build: the graph plus every skipped row.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub graph: Graph,
    pub warnings: Vec<RowWarning>,
}

fn take_name(row: &mut Row, column: &str) -> Option<String> {
    row.remove(column).filter(|name| !name.is_empty())
}

/// Build a graph from rows.
///
/// Vertices appear in first-seen order and take the name as id and label.
/// Names are used verbatim, so `" A "` and `"A"` are different vertices.
/// Each valid row becomes one edge whose id carries the row ordinal and
/// whose attributes are the row's other columns.
pub fn build<I>(rows: I, scatter: &mut Scatter) -> Result<BuildOutcome, GraphError>
where
    I: IntoIterator<Item = Row>,
{
    let mut graph = Graph::new();
    let mut warnings = Vec::new();

    for (index, mut row) in rows.into_iter().enumerate() {
        let (source, target) = match (
            take_name(&mut row, SOURCE_COLUMN),
            take_name(&mut row, TARGET_COLUMN),
        ) {
            (Some(source), Some(target)) => (source, target),
            _ => {
                warn!(
                    "Skipping row {}: Missing source or destination node name",
                    index + 1
                );
                warnings.push(RowWarning {
                    row: index,
                    reason: MalformedRow::MissingEndpoint,
                });
                continue;
            }
        };

        for name in [&source, &target] {
            if !graph.contains_vertex(&VertexId::new(name.as_str())) {
                graph.add_vertex(Vertex::named(name, scatter.place()))?;
            }
        }

        let source = VertexId::new(source);
        let target = VertexId::new(target);
        let label = row.get(LABEL_COLUMN).cloned().unwrap_or_default();
        let edge = Edge {
            id: EdgeId::for_row(&source, &target, index),
            source,
            target,
            label,
            attributes: row,
            selected: false,
        };
        graph.add_edge(edge)?;
    }

    debug!(
        "Built {} vertices, {} edges, skipped {} rows",
        graph.vertex_count(),
        graph.edge_count(),
        warnings.len()
    );
    Ok(BuildOutcome { graph, warnings })
}
