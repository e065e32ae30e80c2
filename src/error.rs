use thiserror::Error;

/// Convenience result type for dataset loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned by the loading pipeline (read, normalize, index).
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not conform to the dataset's declared columns.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A designated key column holds the same id on two rows.
    ///
    /// Key uniqueness is a data-integrity requirement and is never resolved
    /// silently.
    #[error("duplicate key {key} in column '{column}'")]
    DuplicateKey { column: String, key: i64 },

    /// A designated key column holds a null or non-integer id.
    #[error("invalid key at row {row} in column '{column}': ids must be non-null integers")]
    InvalidKey { column: String, row: usize },
}

/// Convenience result type for analytics queries.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Error type returned by the analytics engines.
///
/// All variants are structural: a bad request detected at the boundary, raised
/// to the immediate caller. Degraded-data conditions (a season with races but
/// no weather coverage, a column that failed coercion) are never errors.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Season year outside the supported historical range.
    #[error("season {year} is invalid, must be between {min} and {max}")]
    InvalidSeason { year: i64, min: i64, max: i64 },

    /// Season year is well-formed but no race rows match it.
    #[error("season {0} not found")]
    SeasonNotFound(i64),

    /// A requested driver name has no matching row.
    #[error("driver '{0}' not found")]
    DriverNotFound(String),

    /// A weather metric name outside the known set.
    #[error("unknown weather metric '{0}' (expected one of: rainfall, track_temp, air_temp, humidity, pressure, wind_speed)")]
    UnknownMetric(String),
}
