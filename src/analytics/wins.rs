//! All-time winner ranking.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entities::F1Data;

/// One ranked driver and their win count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinnerRow {
    pub driver_id: i64,
    pub driver: String,
    pub wins: usize,
}

/// Rank drivers by number of first-place finishes, descending.
///
/// Ties break by `driver_id` ascending (a stable, documented order). `count`
/// of zero, or larger than the number of drivers with at least one win,
/// returns every ranked row; this is never an error. Drivers absent from the
/// driver table cannot be named and are skipped.
pub fn top_winners(data: &F1Data, count: usize) -> Vec<WinnerRow> {
    let mut wins_by_driver: BTreeMap<i64, usize> = BTreeMap::new();
    for row in data.results().rows() {
        if row.position == Some(1) {
            if let Some(driver_id) = row.driver_id {
                *wins_by_driver.entry(driver_id).or_default() += 1;
            }
        }
    }

    let names = data.driver_full_names();
    let mut ranked: Vec<WinnerRow> = wins_by_driver
        .into_iter()
        .filter_map(|(driver_id, wins)| {
            names.get(&driver_id).map(|name| WinnerRow {
                driver_id,
                driver: name.clone(),
                wins,
            })
        })
        .collect();

    // BTreeMap iteration already yields driver_id ascending; the stable sort
    // keeps that order within equal win counts.
    ranked.sort_by(|a, b| b.wins.cmp(&a.wins));

    if count > 0 {
        ranked.truncate(count);
    }
    ranked
}
