//! Core data structures for the edge-list graph

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a vertex. Derived from the display name the vertex was created with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct VertexId(pub String);

impl VertexId {
    pub fn new(name: impl Into<String>) -> Self {
        VertexId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VertexId {
    fn from(name: &str) -> Self {
        VertexId(name.to_string())
    }
}

/// Identifier of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Id of an edge built from a table row: `e{source}-{target}-{row}`.
    pub fn for_row(source: &VertexId, target: &VertexId, row: usize) -> Self {
        EdgeId(format!("e{}-{}-{}", source, target, row))
    }

    /// Base id of a user-drawn edge: `e{source}-{target}`.
    pub fn for_connection(source: &VertexId, target: &VertexId) -> Self {
        EdgeId(format!("e{}-{}", source, target))
    }

    /// The `n`-th disambiguated variant of this id.
    pub fn with_suffix(&self, n: u64) -> Self {
        EdgeId(format!("{}-{}", self.0, n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        EdgeId(id.to_string())
    }
}

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// A single vertex of the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub label: String,
    pub position: Position,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Selection state reported by the renderer.
    #[serde(default)]
    pub selected: bool,
}

impl Vertex {
    /// A vertex whose id and label are both `name`.
    pub fn named(name: &str, position: Position) -> Self {
        Vertex {
            id: VertexId::new(name),
            label: name.to_string(),
            position,
            attributes: HashMap::new(),
            selected: false,
        }
    }
}

/// A directed edge between two vertices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: VertexId,
    pub target: VertexId,
    /// Editable label shown on the edge.
    pub label: String,
    /// Free-form metadata, e.g. the extra columns of the row the edge came from.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub selected: bool,
}
