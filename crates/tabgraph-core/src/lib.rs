//! tabgraph core — graph model, interactive store and hierarchical layout

pub mod changes;
pub mod config;
pub mod diff;
pub mod error;
pub mod graph;
pub mod layout;
pub mod model;
pub mod scatter;
pub mod store;


#[cfg(test)]
pub mod test_utils;

pub use changes::{AppliedChanges, ChangeSummary, EdgeChange, VertexChange};
pub use config::{CanvasConfig, ConfigError, LayoutConfig, ServerSettings, TabgraphConfig};
pub use diff::{DiffEngine, GraphChange, GraphDiff};
pub use error::GraphError;
pub use graph::{Graph, GraphSnapshot};
pub use layout::{LevelMap, LevelSlot, assign_levels, layout};
pub use model::{Edge, EdgeId, Position, Vertex, VertexId};
pub use scatter::Scatter;
pub use store::{GraphStore, LayoutReport};
