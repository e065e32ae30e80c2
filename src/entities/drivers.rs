//! The drivers entity table.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::LoadResult;
use crate::ingestion::{load_dataset, DatasetSpec, LoadOptions};
use crate::types::{DataType, Table};

use super::require_column;

/// Column names of the drivers dataset.
pub mod columns {
    pub const DRIVER_ID: &str = "driverId";
    pub const DRIVER_REF: &str = "driverRef";
    pub const NUMBER: &str = "number";
    pub const CODE: &str = "code";
    pub const FORENAME: &str = "forename";
    pub const SURNAME: &str = "surname";
    pub const DOB: &str = "dob";
    pub const NATIONALITY: &str = "nationality";
    pub const URL: &str = "url";
}

/// Static descriptor of the drivers dataset.
pub const SPEC: DatasetSpec = DatasetSpec {
    name: "drivers",
    filename: "drivers.csv",
    key: Some(columns::DRIVER_ID),
    columns: &[
        (columns::DRIVER_ID, DataType::Int64),
        (columns::DRIVER_REF, DataType::Utf8),
        (columns::NUMBER, DataType::Int64),
        (columns::CODE, DataType::Utf8),
        (columns::FORENAME, DataType::Utf8),
        (columns::SURNAME, DataType::Utf8),
        (columns::DOB, DataType::Timestamp),
        (columns::NATIONALITY, DataType::Utf8),
        (columns::URL, DataType::Utf8),
    ],
};

/// The drivers table, keyed by `driverId`.
#[derive(Debug, Clone, PartialEq)]
pub struct Drivers {
    table: Table,
    forename: usize,
    surname: usize,
}

impl Drivers {
    /// Load the drivers dataset from `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Self> {
        Self::from_table(load_dataset(data_dir, &SPEC, options)?)
    }

    /// Wrap an already-loaded table (useful for in-memory data in tests).
    pub fn from_table(table: Table) -> LoadResult<Self> {
        let forename = require_column(&table, columns::FORENAME)?;
        let surname = require_column(&table, columns::SURNAME)?;
        Ok(Self {
            table,
            forename,
            surname,
        })
    }

    /// The underlying table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Derived `driverId -> "forename surname"` series.
    ///
    /// Full names are derived, never stored. A driver with a null name part
    /// cannot be labeled and is omitted.
    pub fn full_names(&self) -> BTreeMap<i64, String> {
        let mut out = BTreeMap::new();
        for (row_no, row) in self.table.rows.iter().enumerate() {
            let (Some(forename), Some(surname)) =
                (row[self.forename].as_str(), row[self.surname].as_str())
            else {
                continue;
            };
            out.insert(self.table.key_at(row_no), format!("{forename} {surname}"));
        }
        out
    }
}
