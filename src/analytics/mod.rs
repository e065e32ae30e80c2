//! Analytics engines over the loaded entity tables.
//!
//! Every engine is a pure transformation of an
//! [`F1Data`](crate::entities::F1Data) handle: identical inputs over unchanged
//! source data produce identical tables.
//!
//! - [`season`]: cumulative points pivot per driver per round
//! - [`weather_perf`]: performance aggregates grouped by weather category
//! - [`wins`]: all-time winner ranking
//! - [`conditions`]: the weather-category classifier the aggregates build on

pub mod conditions;
pub mod season;
pub mod weather_perf;
pub mod wins;

use std::ops::RangeInclusive;

use crate::error::{AnalyticsError, AnalyticsResult};

pub use crate::entities::weather::WeatherMetric;
pub use conditions::categorize;
pub use season::{season_performance, SeasonPivot};
pub use weather_perf::{
    best_conditions_for_driver, compare_drivers_in_conditions, weather_performance,
    BestConditionsReport, CategoryStat, ConditionComparison, ConditionScan, ConditionStats,
    WeatherPerfRow,
};
pub use wins::{top_winners, WinnerRow};

/// Seasons covered by the source datasets.
pub const SEASON_RANGE: RangeInclusive<i64> = 1996..=2023;

pub(crate) fn validate_season(year: i64) -> AnalyticsResult<()> {
    if SEASON_RANGE.contains(&year) {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidSeason {
            year,
            min: *SEASON_RANGE.start(),
            max: *SEASON_RANGE.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::validate_season;
    use crate::error::AnalyticsError;

    #[test]
    fn season_range_bounds_are_inclusive() {
        assert!(validate_season(1996).is_ok());
        assert!(validate_season(2023).is_ok());
        assert!(matches!(
            validate_season(1995),
            Err(AnalyticsError::InvalidSeason { year: 1995, .. })
        ));
        assert!(matches!(
            validate_season(1800),
            Err(AnalyticsError::InvalidSeason { .. })
        ));
    }
}
