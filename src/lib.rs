//! `f1-analytics` computes Formula 1 driver/season performance analytics from
//! the community-maintained CSV datasets (drivers, races, results, weather).
//!
//! The datasets are loaded once into typed in-memory [`types::Table`]s via
//! static per-dataset schemas ([`ingestion::DatasetSpec`]), indexed by their
//! natural keys, and joined/aggregated by the analytics engines. The whole
//! computation is one-shot, synchronous, and in-memory.
//!
//! ## Loading the datasets
//!
//! [`entities::F1Data`] bundles the four entity tables. Build it once and
//! reuse it across queries:
//!
//! ```no_run
//! use f1_analytics::entities::F1Data;
//! use f1_analytics::ingestion::LoadOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = F1Data::load("data", &LoadOptions::default())?;
//! println!("drivers={}", data.drivers().table().row_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Query surface
//!
//! ```no_run
//! use f1_analytics::analytics::{season_performance, top_winners, weather_performance};
//! use f1_analytics::analytics::WeatherMetric;
//! use f1_analytics::entities::F1Data;
//! use f1_analytics::ingestion::LoadOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = F1Data::load("data", &LoadOptions::default())?;
//!
//! // Cumulative points per round for two drivers.
//! let pivot = season_performance(&data, 2021, Some(&["Lewis Hamilton", "Max Verstappen"]))?;
//! println!("final totals: {:?}", pivot.final_totals());
//!
//! // Performance grouped by pressure category; a season without weather
//! // coverage yields an empty vector, not an error.
//! let rows = weather_performance(&data, 2021, None, WeatherMetric::Pressure)?;
//! for row in &rows {
//!     println!("{} / {}: win rate {}%", row.driver, row.category, row.win_rate);
//! }
//!
//! // All-time winner ranking.
//! for winner in top_winners(&data, 3) {
//!     println!("{} wins: {}", winner.driver, winner.wins);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Weather categories
//!
//! Categorization is a pure function, total for every real reading:
//!
//! ```rust
//! use f1_analytics::analytics::{categorize, WeatherMetric};
//! use f1_analytics::types::Value;
//!
//! assert_eq!(
//!     categorize(WeatherMetric::Pressure, &Value::Float64(1013.2)),
//!     Some("Medium Pressure (990-1020 hPa)")
//! );
//! assert_eq!(categorize(WeatherMetric::Rainfall, &Value::Bool(true)), Some("Rainy"));
//! ```
//!
//! ## Error model
//!
//! Structural mistakes (season out of range, unknown driver, unknown metric)
//! surface as [`error::AnalyticsError`] to the immediate caller. Degraded
//! source data never fails a query: a column that cannot be coerced is left
//! untyped and reported through the load observer, and a season without
//! weather coverage aggregates to an empty result.
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV reading, type normalization, key indexing, load
//!   observability
//! - [`types`]: schema + in-memory table types
//! - [`entities`]: the four dataset tables and the [`entities::F1Data`] bundle
//! - [`analytics`]: season/weather/ranking engines
//! - [`error`]: error types used across loading and analytics

pub mod analytics;
pub mod entities;
pub mod error;
pub mod ingestion;
pub mod types;

pub use error::{AnalyticsError, AnalyticsResult, LoadError, LoadResult};
