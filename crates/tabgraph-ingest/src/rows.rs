//! CSV lexing into header-keyed rows

use std::io::Read;

use crate::builder::Row;
use crate::IngestError;

/// Read a CSV document with a header row.
///
/// Header names are trimmed, cells are kept verbatim. Rows may be shorter or
/// longer than the header: missing cells are absent from the row, surplus
/// cells are dropped.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .filter(|(column, _)| !column.is_empty())
            .map(|(column, cell)| (column.to_string(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    tracing::debug!("Read {} rows with {} columns", rows.len(), headers.len());
    Ok(rows)
}
