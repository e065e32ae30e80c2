//! The session weather entity table.
//!
//! The weather dataset has no natural key; rows keep the dense positional
//! index. Round/year columns link each reading back to a race.

use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{AnalyticsError, LoadResult};
use crate::ingestion::{load_dataset, DatasetSpec, LoadOptions};
use crate::types::{DataType, Table, Value};

use super::require_column;

/// Column names of the weather dataset.
pub mod columns {
    pub const TIME: &str = "Time";
    pub const AIR_TEMP: &str = "AirTemp";
    pub const HUMIDITY: &str = "Humidity";
    pub const PRESSURE: &str = "Pressure";
    pub const RAINFALL: &str = "Rainfall";
    pub const TRACK_TEMP: &str = "TrackTemp";
    pub const WIND_DIRECTION: &str = "WindDirection";
    pub const WIND_SPEED: &str = "WindSpeed";
    pub const ROUND: &str = "Round Number";
    pub const YEAR: &str = "Year";
}

/// Static descriptor of the weather dataset.
///
/// `Time` is a session-relative offset string and intentionally stays `Utf8`.
pub const SPEC: DatasetSpec = DatasetSpec {
    name: "weather",
    filename: "weather.csv",
    key: None,
    columns: &[
        (columns::TIME, DataType::Utf8),
        (columns::AIR_TEMP, DataType::Float64),
        (columns::HUMIDITY, DataType::Float64),
        (columns::PRESSURE, DataType::Float64),
        (columns::RAINFALL, DataType::Bool),
        (columns::TRACK_TEMP, DataType::Float64),
        (columns::WIND_DIRECTION, DataType::Int64),
        (columns::WIND_SPEED, DataType::Float64),
        (columns::ROUND, DataType::Int64),
        (columns::YEAR, DataType::Int64),
    ],
};

/// The weather readings a driver's performance can be grouped by.
///
/// The set is closed; parsing an unknown name fails at the boundary with
/// [`AnalyticsError::UnknownMetric`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherMetric {
    Rainfall,
    TrackTemp,
    AirTemp,
    Humidity,
    Pressure,
    WindSpeed,
}

impl WeatherMetric {
    /// All metrics, in declaration order.
    pub const ALL: [WeatherMetric; 6] = [
        WeatherMetric::Rainfall,
        WeatherMetric::TrackTemp,
        WeatherMetric::AirTemp,
        WeatherMetric::Humidity,
        WeatherMetric::Pressure,
        WeatherMetric::WindSpeed,
    ];

    /// Snake-case metric name, matching what [`FromStr`] accepts.
    pub fn as_str(self) -> &'static str {
        match self {
            WeatherMetric::Rainfall => "rainfall",
            WeatherMetric::TrackTemp => "track_temp",
            WeatherMetric::AirTemp => "air_temp",
            WeatherMetric::Humidity => "humidity",
            WeatherMetric::Pressure => "pressure",
            WeatherMetric::WindSpeed => "wind_speed",
        }
    }

    /// The weather dataset column holding this metric's readings.
    pub fn column_name(self) -> &'static str {
        match self {
            WeatherMetric::Rainfall => columns::RAINFALL,
            WeatherMetric::TrackTemp => columns::TRACK_TEMP,
            WeatherMetric::AirTemp => columns::AIR_TEMP,
            WeatherMetric::Humidity => columns::HUMIDITY,
            WeatherMetric::Pressure => columns::PRESSURE,
            WeatherMetric::WindSpeed => columns::WIND_SPEED,
        }
    }
}

impl FromStr for WeatherMetric {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rainfall" => Ok(WeatherMetric::Rainfall),
            "track_temp" => Ok(WeatherMetric::TrackTemp),
            "air_temp" => Ok(WeatherMetric::AirTemp),
            "humidity" => Ok(WeatherMetric::Humidity),
            "pressure" => Ok(WeatherMetric::Pressure),
            "wind_speed" => Ok(WeatherMetric::WindSpeed),
            other => Err(AnalyticsError::UnknownMetric(other.to_owned())),
        }
    }
}

/// The weather table, positionally indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    table: Table,
    round: usize,
    year: usize,
    readings: [usize; 6],
}

impl Weather {
    /// Load the weather dataset from `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Self> {
        Self::from_table(load_dataset(data_dir, &SPEC, options)?)
    }

    /// Wrap an already-loaded table (useful for in-memory data in tests).
    pub fn from_table(table: Table) -> LoadResult<Self> {
        let round = require_column(&table, columns::ROUND)?;
        let year = require_column(&table, columns::YEAR)?;
        let mut readings = [0usize; 6];
        for (slot, metric) in readings.iter_mut().zip(WeatherMetric::ALL) {
            *slot = require_column(&table, metric.column_name())?;
        }
        Ok(Self {
            table,
            round,
            year,
            readings,
        })
    }

    /// The underlying table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Iterate `(round, reading)` pairs of one season's rows for a metric, in
    /// file order.
    pub fn readings_for_year(
        &self,
        year: i64,
        metric: WeatherMetric,
    ) -> impl Iterator<Item = (i64, &Value)> + '_ {
        let reading = self.reading_index(metric);
        self.table.rows.iter().filter_map(move |row| {
            if row[self.year].as_i64() != Some(year) {
                return None;
            }
            let round = row[self.round].as_i64()?;
            Some((round, &row[reading]))
        })
    }

    fn reading_index(&self, metric: WeatherMetric) -> usize {
        // `ALL` is in declaration order, so the discriminant is the slot.
        self.readings[metric as usize]
    }
}
