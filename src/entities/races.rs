//! The races entity table.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::LoadResult;
use crate::ingestion::{load_dataset, DatasetSpec, LoadOptions};
use crate::types::{DataType, Table};

use super::require_column;

/// Column names of the races dataset.
pub mod columns {
    pub const RACE_ID: &str = "raceId";
    pub const YEAR: &str = "year";
    pub const ROUND: &str = "round";
    pub const CIRCUIT_ID: &str = "circuitId";
    pub const NAME: &str = "name";
    pub const DATE: &str = "date";
    pub const TIME: &str = "time";
    pub const URL: &str = "url";
    pub const FP1_DATE: &str = "fp1_date";
    pub const FP1_TIME: &str = "fp1_time";
    pub const FP2_DATE: &str = "fp2_date";
    pub const FP2_TIME: &str = "fp2_time";
    pub const FP3_DATE: &str = "fp3_date";
    pub const FP3_TIME: &str = "fp3_time";
    pub const QUALI_DATE: &str = "quali_date";
    pub const QUALI_TIME: &str = "quali_time";
    pub const SPRINT_DATE: &str = "sprint_date";
    pub const SPRINT_TIME: &str = "sprint_time";
}

/// Static descriptor of the races dataset.
pub const SPEC: DatasetSpec = DatasetSpec {
    name: "races",
    filename: "races.csv",
    key: Some(columns::RACE_ID),
    columns: &[
        (columns::RACE_ID, DataType::Int64),
        (columns::YEAR, DataType::Int64),
        (columns::ROUND, DataType::Int64),
        (columns::CIRCUIT_ID, DataType::Int64),
        (columns::NAME, DataType::Utf8),
        (columns::DATE, DataType::Timestamp),
        (columns::TIME, DataType::Timestamp),
        (columns::URL, DataType::Utf8),
        (columns::FP1_DATE, DataType::Timestamp),
        (columns::FP1_TIME, DataType::Timestamp),
        (columns::FP2_DATE, DataType::Timestamp),
        (columns::FP2_TIME, DataType::Timestamp),
        (columns::FP3_DATE, DataType::Timestamp),
        (columns::FP3_TIME, DataType::Timestamp),
        (columns::QUALI_DATE, DataType::Timestamp),
        (columns::QUALI_TIME, DataType::Timestamp),
        (columns::SPRINT_DATE, DataType::Timestamp),
        (columns::SPRINT_TIME, DataType::Timestamp),
    ],
};

/// The races table, keyed by `raceId`.
#[derive(Debug, Clone, PartialEq)]
pub struct Races {
    table: Table,
    year: usize,
    round: usize,
}

impl Races {
    /// Load the races dataset from `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Self> {
        Self::from_table(load_dataset(data_dir, &SPEC, options)?)
    }

    /// Wrap an already-loaded table (useful for in-memory data in tests).
    pub fn from_table(table: Table) -> LoadResult<Self> {
        let year = require_column(&table, columns::YEAR)?;
        let round = require_column(&table, columns::ROUND)?;
        Ok(Self { table, year, round })
    }

    /// The underlying table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Derived `raceId -> round` series for one season.
    ///
    /// Empty when the year has no races.
    pub fn rounds_for_year(&self, year: i64) -> BTreeMap<i64, i64> {
        let mut out = BTreeMap::new();
        for (row_no, row) in self.table.rows.iter().enumerate() {
            if row[self.year].as_i64() != Some(year) {
                continue;
            }
            let Some(round) = row[self.round].as_i64() else {
                continue;
            };
            out.insert(self.table.key_at(row_no), round);
        }
        out
    }
}
