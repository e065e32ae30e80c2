//! Season performance: cumulative points per driver per round.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::entities::F1Data;
use crate::error::{AnalyticsError, AnalyticsResult};

use super::validate_season;

/// Cumulative points pivot for one season.
///
/// Rows are rounds (starting with a synthetic round 0 of zeros), columns are
/// driver full names in sorted order, cells are the driver's running point
/// total after that round. Each column is monotonically non-decreasing: a
/// driver who skipped a round keeps the prior total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonPivot {
    rounds: Vec<i64>,
    drivers: Vec<String>,
    points: Vec<Vec<f64>>,
}

impl SeasonPivot {
    /// Round labels, in ascending order, starting at 0.
    pub fn rounds(&self) -> &[i64] {
        &self.rounds
    }

    /// Driver column labels, in sorted order.
    pub fn drivers(&self) -> &[String] {
        &self.drivers
    }

    /// Row-major cumulative totals, aligned with [`Self::rounds`] and
    /// [`Self::drivers`].
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    /// One driver's cumulative totals down the rounds.
    pub fn column(&self, driver: &str) -> Option<Vec<f64>> {
        let col = self.drivers.iter().position(|d| d == driver)?;
        Some(self.points.iter().map(|row| row[col]).collect())
    }

    /// The final running totals, one per driver column.
    pub fn final_totals(&self) -> &[f64] {
        self.points.last().map(|row| row.as_slice()).unwrap_or(&[])
    }
}

/// Compute the cumulative points-per-round pivot for one season.
///
/// With a `drivers` filter, every requested name must already be a pivot
/// column (a driver who raced that season); the projection keeps the pivot's
/// sorted column order.
pub fn season_performance(
    data: &F1Data,
    year: i64,
    drivers: Option<&[&str]>,
) -> AnalyticsResult<SeasonPivot> {
    validate_season(year)?;

    let rounds_by_race = data.races().rounds_for_year(year);
    if rounds_by_race.is_empty() {
        return Err(AnalyticsError::SeasonNotFound(year));
    }

    let names = data.driver_full_names();

    // Long form -> cells: at most one points value per (round, driver).
    let mut columns: BTreeSet<String> = BTreeSet::new();
    let mut cells: BTreeMap<i64, HashMap<String, f64>> = BTreeMap::new();
    for row in data.results().rows() {
        let (Some(race_id), Some(driver_id)) = (row.race_id, row.driver_id) else {
            continue;
        };
        let Some(&round) = rounds_by_race.get(&race_id) else {
            continue;
        };
        let Some(name) = names.get(&driver_id) else {
            continue;
        };
        let points = row.points.unwrap_or(0.0);
        columns.insert(name.clone());
        cells.entry(round).or_default().insert(name.clone(), points);
    }

    let all_drivers: Vec<String> = columns.into_iter().collect();

    // Synthetic round 0, then the running totals; a missing cell keeps the
    // prior total (cumulative sum then forward fill, never interpolation).
    let mut rounds = Vec::with_capacity(cells.len() + 1);
    let mut points = Vec::with_capacity(cells.len() + 1);
    rounds.push(0);
    points.push(vec![0.0; all_drivers.len()]);
    let mut totals = vec![0.0; all_drivers.len()];
    for (&round, row_cells) in &cells {
        for (col, name) in all_drivers.iter().enumerate() {
            if let Some(p) = row_cells.get(name) {
                totals[col] += p;
            }
        }
        rounds.push(round);
        points.push(totals.clone());
    }

    let pivot = SeasonPivot {
        rounds,
        drivers: all_drivers,
        points,
    };

    match drivers {
        Some(filter) => project_columns(pivot, filter),
        None => Ok(pivot),
    }
}

fn project_columns(pivot: SeasonPivot, filter: &[&str]) -> AnalyticsResult<SeasonPivot> {
    for name in filter {
        if !pivot.drivers.iter().any(|d| d == name) {
            return Err(AnalyticsError::DriverNotFound((*name).to_owned()));
        }
    }

    let keep: Vec<usize> = pivot
        .drivers
        .iter()
        .enumerate()
        .filter(|(_, d)| filter.contains(&d.as_str()))
        .map(|(col, _)| col)
        .collect();

    Ok(SeasonPivot {
        rounds: pivot.rounds,
        drivers: keep.iter().map(|&col| pivot.drivers[col].clone()).collect(),
        points: pivot
            .points
            .iter()
            .map(|row| keep.iter().map(|&col| row[col]).collect())
            .collect(),
    })
}
