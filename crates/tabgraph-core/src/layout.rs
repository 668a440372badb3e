//! Breadth-first hierarchical layout
//!
//! Vertices reachable from the root along outgoing edges are placed in
//! columns by BFS distance. The row is not per level: it is the global
//! visitation index, so every placed vertex gets its own row.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::config::LayoutConfig;
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::model::{Edge, Position, VertexId};

/// Where one vertex landed in a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSlot {
    /// Hops from the root.
    pub level: usize,
    /// Zero-based position in visitation order.
    pub order: usize,
}

/// Result of a single traversal. Only reached vertices are present.
#[derive(Debug, Clone, Default)]
pub struct LevelMap {
    slots: HashMap<VertexId, LevelSlot>,
    visit_order: Vec<VertexId>,
}

impl LevelMap {
    pub fn get(&self, id: &VertexId) -> Option<LevelSlot> {
        self.slots.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.visit_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visit_order.is_empty()
    }

    /// Reached vertices, root first.
    pub fn visit_order(&self) -> &[VertexId] {
        &self.visit_order
    }

    /// Convert slots into canvas positions.
    pub fn positions(&self, spacing: &LayoutConfig) -> HashMap<VertexId, Position> {
        self.slots
            .iter()
            .map(|(id, slot)| {
                let x = slot.level as f64 * spacing.horizontal_spacing;
                let y = slot.order as f64 * spacing.vertical_spacing;
                (id.clone(), Position::new(x, y))
            })
            .collect()
    }
}

/// BFS from `root` over outgoing edges.
///
/// Successors are enqueued in the order their edges appear in `edges`; a
/// vertex queued twice keeps the level of its first dequeue.
pub fn assign_levels<'a, I>(root: &VertexId, edges: I) -> LevelMap
where
    I: IntoIterator<Item = &'a Edge>,
{
    let mut successors: HashMap<&VertexId, Vec<&VertexId>> = HashMap::new();
    for edge in edges {
        successors.entry(&edge.source).or_default().push(&edge.target);
    }

    let mut map = LevelMap::default();
    let mut visited: HashSet<&VertexId> = HashSet::new();
    let mut queue: VecDeque<(&VertexId, usize)> = VecDeque::new();
    queue.push_back((root, 0));

    while let Some((current, level)) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        let order = map.visit_order.len();
        map.slots.insert(current.clone(), LevelSlot { level, order });
        map.visit_order.push(current.clone());

        if let Some(next) = successors.get(current) {
            for &target in next {
                if !visited.contains(target) {
                    queue.push_back((target, level + 1));
                }
            }
        }
    }

    map
}

/// Lay out the part of `graph` reachable from `root`.
///
/// Fails with [`GraphError::UnknownRoot`] when the root is neither a vertex
/// nor an edge endpoint. Unreached vertices are absent from the result.
pub fn layout(
    root: &VertexId,
    graph: &Graph,
    spacing: &LayoutConfig,
) -> Result<HashMap<VertexId, Position>> {
    let known = graph.contains_vertex(root)
        || graph.edges().any(|e| &e.source == root || &e.target == root);
    if !known {
        return Err(GraphError::UnknownRoot(root.clone()));
    }

    let levels = assign_levels(root, graph.edges());
    tracing::debug!(
        "Hierarchical layout from {} reached {} of {} vertices",
        root,
        levels.len(),
        graph.vertex_count()
    );
    Ok(levels.positions(spacing))
}
