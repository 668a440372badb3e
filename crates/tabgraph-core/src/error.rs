//! Error types for graph commands and layout

use thiserror::Error;

use crate::model::{EdgeId, VertexId};

/// Precondition failures of a single graph command.
///
/// A command that returns one of these has left the graph unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("cannot connect {from} -> {to}: unknown vertex {missing}")]
    InvalidEndpoint {
        from: VertexId,
        to: VertexId,
        missing: VertexId,
    },

    #[error("vertex name is empty")]
    EmptyName,

    #[error("a vertex with id {0} already exists")]
    DuplicateId(VertexId),

    #[error("no edge with id {0}")]
    UnknownEdge(EdgeId),

    /// Only raised when assembling a graph from pre-made edges; commands
    /// pick a fresh id instead.
    #[error("an edge with id {0} already exists")]
    DuplicateEdge(EdgeId),

    #[error("layout root {0} is not in the graph")]
    UnknownRoot(VertexId),
}

pub type Result<T> = std::result::Result<T, GraphError>;
