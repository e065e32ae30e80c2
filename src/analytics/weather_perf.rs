//! Driver performance grouped by weather conditions.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::entities::weather::WeatherMetric;
use crate::entities::F1Data;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::Value;

use super::conditions::categorize;
use super::validate_season;

/// Aggregated performance of one driver under one weather category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherPerfRow {
    /// Driver full name.
    pub driver: String,
    /// Weather category label.
    pub category: &'static str,
    /// Mean finishing position over classified results; `None` when the
    /// driver never finished under this category.
    pub avg_position: Option<f64>,
    /// Mean points per race.
    pub avg_points: Option<f64>,
    /// Total points.
    pub total_points: f64,
    /// Number of races under this category.
    pub races: usize,
    /// First-place finishes.
    pub wins: usize,
    /// Top-three finishes.
    pub podiums: usize,
    /// `100 * wins / races`, rounded to 2 decimals.
    pub win_rate: f64,
    /// `100 * podiums / races`, rounded to 2 decimals.
    pub podium_rate: f64,
}

#[derive(Default)]
struct Acc {
    races: usize,
    wins: usize,
    podiums: usize,
    points_sum: f64,
    points_n: usize,
    position_sum: f64,
    position_n: usize,
}

/// Compute per-driver performance aggregates grouped by weather category.
///
/// A season with races but no weather coverage returns an empty vector: the
/// weather archive is known to be incomplete for older seasons, and absent
/// coverage is degraded data, not a caller mistake. Rows are sorted by
/// (driver, category).
pub fn weather_performance(
    data: &F1Data,
    year: i64,
    drivers: Option<&[&str]>,
    metric: WeatherMetric,
) -> AnalyticsResult<Vec<WeatherPerfRow>> {
    validate_season(year)?;

    let rounds_by_race = data.races().rounds_for_year(year);
    if rounds_by_race.is_empty() {
        return Err(AnalyticsError::SeasonNotFound(year));
    }

    let names = data.driver_full_names();
    let filter = match drivers {
        Some(requested) => Some(known_driver_set(&names, requested)?),
        None => None,
    };

    // One reading per race: the first non-null reading in file order.
    let mut readings: BTreeMap<i64, Value> = BTreeMap::new();
    for (round, reading) in data.weather().readings_for_year(year, metric) {
        if !reading.is_null() {
            readings.entry(round).or_insert_with(|| reading.clone());
        }
    }
    if readings.is_empty() {
        // Soft-empty: the season exists, its weather does not.
        return Ok(Vec::new());
    }

    let mut groups: BTreeMap<(String, &'static str), Acc> = BTreeMap::new();
    for row in data.results().rows() {
        let (Some(race_id), Some(driver_id)) = (row.race_id, row.driver_id) else {
            continue;
        };
        let Some(round) = rounds_by_race.get(&race_id) else {
            continue;
        };
        let Some(name) = names.get(&driver_id) else {
            continue;
        };
        if let Some(filter) = &filter {
            if !filter.contains(name.as_str()) {
                continue;
            }
        }
        let Some(category) = readings.get(round).and_then(|r| categorize(metric, r)) else {
            continue;
        };

        let acc = groups.entry((name.clone(), category)).or_default();
        acc.races += 1;
        if let Some(points) = row.points {
            acc.points_sum += points;
            acc.points_n += 1;
        }
        if let Some(position) = row.position {
            acc.position_sum += position as f64;
            acc.position_n += 1;
            if position == 1 {
                acc.wins += 1;
            }
            if position <= 3 {
                acc.podiums += 1;
            }
        }
    }

    Ok(groups
        .into_iter()
        .map(|((driver, category), acc)| WeatherPerfRow {
            driver,
            category,
            avg_position: mean(acc.position_sum, acc.position_n),
            avg_points: mean(acc.points_sum, acc.points_n),
            total_points: acc.points_sum,
            races: acc.races,
            wins: acc.wins,
            podiums: acc.podiums,
            win_rate: rate(acc.wins, acc.races),
            podium_rate: rate(acc.podiums, acc.races),
        })
        .collect())
}

/// Side-by-side driver comparison pivot: rows = weather category, columns =
/// driver, cells = the four headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionComparison {
    /// Category row labels, sorted.
    pub categories: Vec<&'static str>,
    /// Driver column labels, sorted.
    pub drivers: Vec<String>,
    /// `cells[category][driver]`; `None` where a driver never raced under a
    /// category.
    pub cells: Vec<Vec<Option<ConditionStats>>>,
}

/// The headline metrics of one (driver, category) aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionStats {
    pub avg_position: Option<f64>,
    pub avg_points: Option<f64>,
    pub win_rate: f64,
    pub podium_rate: f64,
}

/// Pivot the weather aggregate so drivers can be compared per category.
pub fn compare_drivers_in_conditions(
    data: &F1Data,
    year: i64,
    drivers: Option<&[&str]>,
    metric: WeatherMetric,
) -> AnalyticsResult<ConditionComparison> {
    let rows = weather_performance(data, year, drivers, metric)?;

    let categories: Vec<&'static str> = rows
        .iter()
        .map(|r| r.category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let drivers: Vec<String> = rows
        .iter()
        .map(|r| r.driver.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut cells = vec![vec![None; drivers.len()]; categories.len()];
    for row in &rows {
        let cat = categories.iter().position(|c| *c == row.category);
        let drv = drivers.iter().position(|d| *d == row.driver);
        if let (Some(cat), Some(drv)) = (cat, drv) {
            cells[cat][drv] = Some(ConditionStats {
                avg_position: row.avg_position,
                avg_points: row.avg_points,
                win_rate: row.win_rate,
                podium_rate: row.podium_rate,
            });
        }
    }

    Ok(ConditionComparison {
        categories,
        drivers,
        cells,
    })
}

/// One category and the aggregate value that made it the best.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category: &'static str,
    pub value: f64,
}

/// Outcome of scanning one metric for a driver's best conditions.
///
/// Only the no-data condition is absorbed into [`ConditionScan::NoData`];
/// structural errors propagate from [`best_conditions_for_driver`] itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConditionScan {
    /// The categories achieving the best average position / average points.
    Found {
        best_position: CategoryStat,
        best_points: CategoryStat,
    },
    /// No usable rows for this metric (e.g. no weather coverage).
    NoData,
}

/// Per-metric scan results for one driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestConditionsReport {
    pub driver: String,
    pub year: i64,
    /// One entry per metric, in [`WeatherMetric::ALL`] order.
    pub metrics: Vec<(WeatherMetric, ConditionScan)>,
}

/// For every metric independently, find the categories where `driver`
/// performs best.
///
/// Partial results are preferred over total failure: a metric without data
/// reports [`ConditionScan::NoData`] while the others still resolve.
pub fn best_conditions_for_driver(
    data: &F1Data,
    year: i64,
    driver: &str,
) -> AnalyticsResult<BestConditionsReport> {
    let mut metrics = Vec::with_capacity(WeatherMetric::ALL.len());
    for metric in WeatherMetric::ALL {
        let rows = weather_performance(data, year, Some(&[driver]), metric)?;
        metrics.push((metric, scan_rows(&rows)));
    }
    Ok(BestConditionsReport {
        driver: driver.to_owned(),
        year,
        metrics,
    })
}

fn scan_rows(rows: &[WeatherPerfRow]) -> ConditionScan {
    let best_position = rows
        .iter()
        .filter_map(|r| r.avg_position.map(|v| (r.category, v)))
        .fold(None::<(&'static str, f64)>, |best, cand| match best {
            Some(best) if best.1 <= cand.1 => Some(best),
            _ => Some(cand),
        });
    let best_points = rows
        .iter()
        .filter_map(|r| r.avg_points.map(|v| (r.category, v)))
        .fold(None::<(&'static str, f64)>, |best, cand| match best {
            Some(best) if best.1 >= cand.1 => Some(best),
            _ => Some(cand),
        });

    match (best_position, best_points) {
        (Some((pos_cat, pos)), Some((pts_cat, pts))) => ConditionScan::Found {
            best_position: CategoryStat {
                category: pos_cat,
                value: pos,
            },
            best_points: CategoryStat {
                category: pts_cat,
                value: pts,
            },
        },
        _ => ConditionScan::NoData,
    }
}

fn known_driver_set<'a>(
    names: &BTreeMap<i64, String>,
    requested: &[&'a str],
) -> AnalyticsResult<HashSet<&'a str>> {
    let known: HashSet<&str> = names.values().map(|n| n.as_str()).collect();
    for name in requested {
        if !known.contains(name) {
            return Err(AnalyticsError::DriverNotFound((*name).to_owned()));
        }
    }
    Ok(requested.iter().copied().collect())
}

fn mean(sum: f64, n: usize) -> Option<f64> {
    (n > 0).then(|| sum / n as f64)
}

fn rate(count: usize, races: usize) -> f64 {
    if races == 0 {
        return 0.0;
    }
    round2(100.0 * count as f64 / races as f64)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{mean, rate, round2};

    #[test]
    fn rates_round_to_two_decimals() {
        assert_eq!(rate(1, 3), 33.33);
        assert_eq!(rate(2, 3), 66.67);
        assert_eq!(rate(0, 3), 0.0);
        assert_eq!(rate(3, 3), 100.0);
        assert_eq!(rate(0, 0), 0.0);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(0.0, 0), None);
        assert_eq!(mean(9.0, 2), Some(4.5));
    }

    #[test]
    fn round2_rounds_to_nearest() {
        assert_eq!(round2(33.336), 33.34);
        assert_eq!(round2(33.333), 33.33);
        assert_eq!(round2(12.0), 12.0);
    }
}
