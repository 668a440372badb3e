//! Test utilities for tabgraph-core

use std::collections::HashMap;

use crate::config::{CanvasConfig, LayoutConfig};
use crate::graph::Graph;
use crate::model::{Edge, EdgeId, Position, Vertex, VertexId};
use crate::scatter::Scatter;
use crate::store::GraphStore;

/// Vertex named `name` at the origin.
pub fn vertex(name: &str) -> Vertex {
    Vertex::named(name, Position::default())
}

/// Edge `source -> target` with the row-derived id for `row`.
pub fn edge(source: &str, target: &str, row: usize) -> Edge {
    let source = VertexId::from(source);
    let target = VertexId::from(target);
    Edge {
        id: EdgeId::for_row(&source, &target, row),
        source,
        target,
        label: String::new(),
        attributes: HashMap::new(),
        selected: false,
    }
}

/// Graph from `(source, target)` pairs; vertices in first-seen order.
pub fn graph_from_pairs(pairs: &[(&str, &str)]) -> Graph {
    let mut graph = Graph::new();
    for (row, (source, target)) in pairs.iter().enumerate() {
        for name in [source, target] {
            if !graph.contains_vertex(&VertexId::from(*name)) {
                graph.add_vertex(vertex(name)).unwrap();
            }
        }
        graph.add_edge(edge(source, target, row)).unwrap();
    }
    graph
}

/// The A -> B, A -> C, B -> C triangle.
pub fn triangle() -> Graph {
    graph_from_pairs(&[("A", "B"), ("A", "C"), ("B", "C")])
}

/// Store over `graph` with a fixed placement seed and default spacing.
pub fn seeded_store(graph: Graph) -> GraphStore {
    GraphStore::new(
        graph,
        Scatter::seeded(11, &CanvasConfig::default()),
        LayoutConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_from_pairs() {
        let graph = graph_from_pairs(&[("A", "B"), ("B", "A"), ("A", "B")]);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 3);
    }
}
