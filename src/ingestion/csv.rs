//! CSV reading into an untyped table.
//!
//! Reading produces string cells only; typing is a separate, tolerant pass in
//! [`super::normalize`].

use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::{DataType, Field, Schema, Table, Value};

/// The two-character placeholder the source datasets use for missing cells.
pub const NULL_SENTINEL: &str = r"\N";

/// Read a CSV file into an untyped in-memory [`Table`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all of `columns` (order can differ; extra CSV
///   columns are ignored).
/// - Every cell lands as [`Value::Utf8`]; blank cells and the `\N` sentinel
///   land as [`Value::Null`].
pub fn read_csv_from_path(path: impl AsRef<Path>, columns: &[&str]) -> LoadResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    read_csv_from_reader(&mut rdr, columns)
}

/// Read CSV data from an existing CSV reader.
pub fn read_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    columns: &[&str],
) -> LoadResult<Table> {
    let headers = rdr.headers()?.clone();

    // Map declared columns -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(columns.len());
    for column in columns {
        match headers.iter().position(|h| h == *column) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(LoadError::SchemaMismatch {
                    message: format!(
                        "missing required column '{column}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(columns.len());
        for &csv_idx in &col_idxs {
            let raw = record.get(csv_idx).unwrap_or("").trim();
            if raw.is_empty() || raw == NULL_SENTINEL {
                row.push(Value::Null);
            } else {
                row.push(Value::Utf8(raw.to_owned()));
            }
        }
        rows.push(row);
    }

    let schema = Schema::new(
        columns
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8))
            .collect(),
    );
    Ok(Table::new(schema, rows))
}
