//! The race results entity table.

use std::path::Path;

use crate::error::LoadResult;
use crate::ingestion::{load_dataset, DatasetSpec, LoadOptions};
use crate::types::{DataType, Table};

use super::require_column;

/// Column names of the results dataset.
pub mod columns {
    pub const RESULT_ID: &str = "resultId";
    pub const RACE_ID: &str = "raceId";
    pub const DRIVER_ID: &str = "driverId";
    pub const CONSTRUCTOR_ID: &str = "constructorId";
    pub const NUMBER: &str = "number";
    pub const GRID: &str = "grid";
    pub const POSITION: &str = "position";
    pub const POSITION_TEXT: &str = "positionText";
    pub const POSITION_ORDER: &str = "positionOrder";
    pub const POINTS: &str = "points";
    pub const LAPS: &str = "laps";
    pub const TIME: &str = "time";
    pub const MILLISECONDS: &str = "milliseconds";
    pub const FASTEST_LAP: &str = "fastestLap";
    pub const RANK: &str = "rank";
    pub const FASTEST_LAP_TIME: &str = "fastestLapTime";
    pub const FASTEST_LAP_SPEED: &str = "fastestLapSpeed";
    pub const STATUS_ID: &str = "statusId";
}

/// Static descriptor of the results dataset.
pub const SPEC: DatasetSpec = DatasetSpec {
    name: "results",
    filename: "results.csv",
    key: Some(columns::RESULT_ID),
    columns: &[
        (columns::RESULT_ID, DataType::Int64),
        (columns::RACE_ID, DataType::Int64),
        (columns::DRIVER_ID, DataType::Int64),
        (columns::CONSTRUCTOR_ID, DataType::Int64),
        (columns::NUMBER, DataType::Int64),
        (columns::GRID, DataType::Int64),
        (columns::POSITION, DataType::Int64),
        (columns::POSITION_TEXT, DataType::Utf8),
        (columns::POSITION_ORDER, DataType::Int64),
        (columns::POINTS, DataType::Float64),
        (columns::LAPS, DataType::Int64),
        (columns::TIME, DataType::Utf8),
        (columns::MILLISECONDS, DataType::Int64),
        (columns::FASTEST_LAP, DataType::Int64),
        (columns::RANK, DataType::Int64),
        (columns::FASTEST_LAP_TIME, DataType::Utf8),
        (columns::FASTEST_LAP_SPEED, DataType::Float64),
        (columns::STATUS_ID, DataType::Int64),
    ],
};

/// One result row projected to the fields the analytics engines consume.
///
/// `position` is null for retirements and disqualifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRow {
    pub result_id: i64,
    pub race_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub position: Option<i64>,
    pub points: Option<f64>,
}

/// The results table, keyed by `resultId`.
#[derive(Debug, Clone, PartialEq)]
pub struct Results {
    table: Table,
    race_id: usize,
    driver_id: usize,
    position: usize,
    points: usize,
}

impl Results {
    /// Load the results dataset from `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Self> {
        Self::from_table(load_dataset(data_dir, &SPEC, options)?)
    }

    /// Wrap an already-loaded table (useful for in-memory data in tests).
    pub fn from_table(table: Table) -> LoadResult<Self> {
        let race_id = require_column(&table, columns::RACE_ID)?;
        let driver_id = require_column(&table, columns::DRIVER_ID)?;
        let position = require_column(&table, columns::POSITION)?;
        let points = require_column(&table, columns::POINTS)?;
        Ok(Self {
            table,
            race_id,
            driver_id,
            position,
            points,
        })
    }

    /// The underlying table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Iterate result rows projected to the analytics fields.
    pub fn rows(&self) -> impl Iterator<Item = ResultRow> + '_ {
        self.table.rows.iter().enumerate().map(|(row_no, row)| ResultRow {
            result_id: self.table.key_at(row_no),
            race_id: row[self.race_id].as_i64(),
            driver_id: row[self.driver_id].as_i64(),
            position: row[self.position].as_i64(),
            points: row[self.points].as_f64(),
        })
    }
}
