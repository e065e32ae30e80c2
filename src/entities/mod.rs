//! Entity tables for the four source datasets.
//!
//! Each entity module owns its dataset's static
//! [`DatasetSpec`](crate::ingestion::DatasetSpec) (column names and target
//! types), a thin wrapper over the loaded [`Table`], and the
//! entity-specific derived series. Columns the analytics engines consume are
//! resolved to positions once at construction; a dataset missing one of them
//! fails at load time.
//!
//! [`F1Data`] bundles all four tables, loaded once and shared read-only by
//! every analytic call.

pub mod drivers;
pub mod races;
pub mod results;
pub mod weather;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::ingestion::LoadOptions;
use crate::types::Table;

pub use drivers::Drivers;
pub use races::Races;
pub use results::Results;
pub use weather::{Weather, WeatherMetric};

pub(crate) fn require_column(table: &Table, name: &str) -> LoadResult<usize> {
    table
        .column_index(name)
        .ok_or_else(|| LoadError::SchemaMismatch {
            message: format!("column '{name}' not present in loaded table"),
        })
}

/// All four entity tables, loaded once.
///
/// Analytic calls borrow this handle instead of reloading source files; build
/// it once and reuse it (it is immutable after construction, so sharing a
/// reference across callers is safe).
#[derive(Debug, Clone, PartialEq)]
pub struct F1Data {
    drivers: Drivers,
    races: Races,
    results: Results,
    weather: Weather,
}

impl F1Data {
    /// Load all four datasets from `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Self> {
        let data_dir = data_dir.as_ref();
        Ok(Self {
            drivers: Drivers::load(data_dir, options)?,
            races: Races::load(data_dir, options)?,
            results: Results::load(data_dir, options)?,
            weather: Weather::load(data_dir, options)?,
        })
    }

    /// Assemble from already-constructed entity tables.
    pub fn from_parts(drivers: Drivers, races: Races, results: Results, weather: Weather) -> Self {
        Self {
            drivers,
            races,
            results,
            weather,
        }
    }

    /// The drivers table.
    pub fn drivers(&self) -> &Drivers {
        &self.drivers
    }

    /// The races table.
    pub fn races(&self) -> &Races {
        &self.races
    }

    /// The results table.
    pub fn results(&self) -> &Results {
        &self.results
    }

    /// The weather table.
    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    /// Derived `driverId -> full name` series.
    pub fn driver_full_names(&self) -> BTreeMap<i64, String> {
        self.drivers.full_names()
    }
}
