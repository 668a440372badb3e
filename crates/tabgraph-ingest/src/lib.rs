//! Tabular edge-list ingestion: CSV rows and the graph builder

pub mod builder;
pub mod rows;


use std::io::Read;
use std::path::{Path, PathBuf};

use tabgraph_core::{GraphError, Scatter};
use thiserror::Error;

pub use builder::{
    BuildOutcome, LABEL_COLUMN, MalformedRow, Row, RowWarning, SOURCE_COLUMN, TARGET_COLUMN, build,
};
pub use rows::read_rows;

/// Failure of a whole import. No graph is produced.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unreadable table: {0}")]
    ParseFailure(#[from] csv::Error),

    #[error("graph rejected imported row: {0}")]
    Graph(#[from] GraphError),

    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Lex `reader` as CSV and build a graph from it.
pub fn import<R: Read>(reader: R, scatter: &mut Scatter) -> Result<BuildOutcome, IngestError> {
    let rows = read_rows(reader)?;
    let outcome = build(rows, scatter)?;
    tracing::info!(
        "Imported {} vertices, {} edges ({} rows skipped)",
        outcome.graph.vertex_count(),
        outcome.graph.edge_count(),
        outcome.warnings.len()
    );
    Ok(outcome)
}

/// [`import`] from a file on disk.
pub fn import_path(path: &Path, scatter: &mut Scatter) -> Result<BuildOutcome, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    import(std::io::BufReader::new(file), scatter)
}
