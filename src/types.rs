//! Core data model types.
//!
//! Datasets are loaded into an in-memory [`Table`]: named, typed columns of
//! equal length stored row-major, with an optional primary-key row index.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::error::{LoadError, LoadResult};

/// Logical data type for a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Naive timestamp (date, time, or both).
    Timestamp,
}

/// A single named, typed column in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Column data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// An ordered list of fields describing a table's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed cell value in a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Naive timestamp.
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Whether this cell is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer view of the cell. `None` for null and non-integer cells.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the cell, widening integers. `None` for null and
    /// non-numeric cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean view of the cell.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// String view of the cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Row addressing for a [`Table`].
///
/// A table either carries a dense synthetic index, or has had one of its
/// integer id columns promoted to the row key (the column is then no longer
/// part of the body).
#[derive(Debug, Clone, PartialEq)]
pub enum RowIndex {
    /// Dense 0-based positional index.
    Positional,
    /// A designated id column promoted to the row key.
    Keyed {
        /// Name of the promoted column.
        column: String,
        /// Key of each row, aligned with the row order.
        keys: Vec<i64>,
        /// Key -> row position lookup.
        by_key: HashMap<i64, usize>,
    },
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`]
/// fields. All rows have the same length as the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
    index: RowIndex,
}

impl Table {
    /// Create a table from schema and rows, with a positional index.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self {
            schema,
            rows,
            index: RowIndex::Positional,
        }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The row index.
    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    /// Name of the promoted key column, if the table is keyed.
    pub fn key_column(&self) -> Option<&str> {
        match &self.index {
            RowIndex::Positional => None,
            RowIndex::Keyed { column, .. } => Some(column),
        }
    }

    /// Key of the row at `row`.
    ///
    /// For positional tables this is the row position itself.
    pub fn key_at(&self, row: usize) -> i64 {
        match &self.index {
            RowIndex::Positional => row as i64,
            RowIndex::Keyed { keys, .. } => keys[row],
        }
    }

    /// Iterate row keys in row order.
    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.row_count()).map(|row| self.key_at(row))
    }

    /// Look up a row by its key.
    pub fn row_by_key(&self, key: i64) -> Option<&[Value]> {
        let pos = match &self.index {
            RowIndex::Positional => {
                let pos = usize::try_from(key).ok()?;
                (pos < self.rows.len()).then_some(pos)?
            }
            RowIndex::Keyed { by_key, .. } => *by_key.get(&key)?,
        };
        self.rows.get(pos).map(|r| r.as_slice())
    }

    /// Returns the position of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    /// Project one column as an iterator over its cells, in row order.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Promote `key_column` to the table's row key and remove it from the body.
    ///
    /// Ids must be unique non-null integers; a violation is a data-integrity
    /// [`LoadError`] surfaced to the caller.
    pub fn index_by(mut self, key_column: &str) -> LoadResult<Self> {
        let idx = self
            .schema
            .index_of(key_column)
            .ok_or_else(|| LoadError::SchemaMismatch {
                message: format!("key column '{key_column}' not present in schema"),
            })?;

        let mut keys = Vec::with_capacity(self.rows.len());
        let mut by_key = HashMap::with_capacity(self.rows.len());
        for (row_no, row) in self.rows.iter().enumerate() {
            let key = match row.get(idx) {
                Some(Value::Int64(v)) => *v,
                _ => {
                    return Err(LoadError::InvalidKey {
                        column: key_column.to_owned(),
                        row: row_no,
                    });
                }
            };
            if by_key.insert(key, row_no).is_some() {
                return Err(LoadError::DuplicateKey {
                    column: key_column.to_owned(),
                    key,
                });
            }
            keys.push(key);
        }

        self.schema.fields.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        self.index = RowIndex::Keyed {
            column: key_column.to_owned(),
            keys,
            by_key,
        };
        Ok(self)
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table preserves the schema. Keyed tables keep the surviving
    /// rows' keys; positional tables re-densify.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let mut rows = Vec::new();
        let mut kept = Vec::new();
        for (row_no, row) in self.rows.iter().enumerate() {
            if predicate(row.as_slice()) {
                kept.push(row_no);
                rows.push(row.clone());
            }
        }

        let index = match &self.index {
            RowIndex::Positional => RowIndex::Positional,
            RowIndex::Keyed { column, keys, .. } => {
                let keys: Vec<i64> = kept.iter().map(|&row_no| keys[row_no]).collect();
                let by_key = keys.iter().enumerate().map(|(pos, &k)| (k, pos)).collect();
                RowIndex::Keyed {
                    column: column.clone(),
                    keys,
                    by_key,
                }
            }
        };

        Self {
            schema: self.schema.clone(),
            rows,
            index,
        }
    }

    /// Create a new table by applying `mapper` to every row.
    ///
    /// The returned table preserves the schema and the row index.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the schema
    /// field count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let expected_len = self.schema.fields.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match schema length {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            schema: self.schema.clone(),
            rows,
            index: self.index.clone(),
        }
    }

    /// Reduce (fold) all rows into an accumulator value.
    ///
    /// This is similar to `Iterator::fold`, but provides each row as `&[Value]`.
    pub fn reduce_rows<A, F>(&self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, &[Value]) -> A,
    {
        self.rows
            .iter()
            .fold(init, |acc, row| reducer(acc, row.as_slice()))
    }
}
