use std::str::FromStr;

use f1_analytics::analytics::{
    best_conditions_for_driver, compare_drivers_in_conditions, weather_performance,
    ConditionScan, WeatherMetric,
};
use f1_analytics::entities::F1Data;
use f1_analytics::ingestion::LoadOptions;
use f1_analytics::AnalyticsError;

fn fixture_data() -> F1Data {
    F1Data::load("tests/fixtures", &LoadOptions::default()).unwrap()
}

const PRESSURE_CATEGORIES: [&str; 3] = [
    "Low Pressure (<990 hPa)",
    "Medium Pressure (990-1020 hPa)",
    "High Pressure (>1020 hPa)",
];

#[test]
fn aggregates_satisfy_count_and_rate_invariants() {
    let data = fixture_data();
    for metric in WeatherMetric::ALL {
        for row in weather_performance(&data, 2021, None, metric).unwrap() {
            assert!(row.wins <= row.podiums, "{row:?}");
            assert!(row.podiums <= row.races, "{row:?}");
            assert!((0.0..=100.0).contains(&row.win_rate), "{row:?}");
            assert!((0.0..=100.0).contains(&row.podium_rate), "{row:?}");
        }
    }
}

#[test]
fn pressure_rows_group_by_driver_and_known_categories() {
    let data = fixture_data();
    let rows = weather_performance(&data, 2021, None, WeatherMetric::Pressure).unwrap();

    assert!(!rows.is_empty());
    assert!(rows
        .iter()
        .all(|r| PRESSURE_CATEGORIES.contains(&r.category)));

    // Sorted by (driver, category).
    let keys: Vec<_> = rows.iter().map(|r| (r.driver.clone(), r.category)).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn one_reading_per_race_feeds_the_aggregate() {
    let data = fixture_data();
    let rows = weather_performance(
        &data,
        2021,
        Some(&["Lewis Hamilton"]),
        WeatherMetric::Pressure,
    )
    .unwrap();

    // Three races, three distinct pressure categories, despite two readings
    // per race in the fixture.
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.races == 1));

    let low = rows
        .iter()
        .find(|r| r.category == "Low Pressure (<990 hPa)")
        .unwrap();
    assert_eq!(low.wins, 1);
    assert_eq!(low.podiums, 1);
    assert_eq!(low.avg_position, Some(1.0));
    assert_eq!(low.avg_points, Some(25.0));
    assert_eq!(low.total_points, 25.0);
    assert_eq!(low.win_rate, 100.0);
    assert_eq!(low.podium_rate, 100.0);
}

#[test]
fn rainfall_aggregates_split_dry_and_rainy() {
    let data = fixture_data();
    let rows = weather_performance(
        &data,
        2021,
        Some(&["Lewis Hamilton"]),
        WeatherMetric::Rainfall,
    )
    .unwrap();

    assert_eq!(rows.len(), 2);
    let dry = rows.iter().find(|r| r.category == "Dry").unwrap();
    assert_eq!(dry.races, 2);
    assert_eq!(dry.wins, 1);
    assert_eq!(dry.podiums, 2);
    assert_eq!(dry.avg_position, Some(1.5));
    assert_eq!(dry.total_points, 43.0);
    assert_eq!(dry.win_rate, 50.0);
    assert_eq!(dry.podium_rate, 100.0);

    let rainy = rows.iter().find(|r| r.category == "Rainy").unwrap();
    assert_eq!(rainy.races, 1);
    assert_eq!(rainy.wins, 1);
}

#[test]
fn dnf_counts_as_a_race_without_a_position() {
    let data = fixture_data();
    let rows = weather_performance(
        &data,
        2021,
        Some(&["Valtteri Bottas"]),
        WeatherMetric::Pressure,
    )
    .unwrap();

    // Bottas retired in the high-pressure round 3.
    let high = rows
        .iter()
        .find(|r| r.category == "High Pressure (>1020 hPa)")
        .unwrap();
    assert_eq!(high.races, 1);
    assert_eq!(high.wins, 0);
    assert_eq!(high.podiums, 0);
    assert_eq!(high.avg_position, None);
    assert_eq!(high.avg_points, Some(0.0));
}

#[test]
fn season_without_weather_coverage_is_soft_empty() {
    let data = fixture_data();
    // 2020 has races but no weather rows.
    let rows = weather_performance(&data, 2020, None, WeatherMetric::Pressure).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn known_driver_without_season_results_yields_no_rows() {
    let data = fixture_data();
    let rows = weather_performance(
        &data,
        2021,
        Some(&["Ayrton Senna"]),
        WeatherMetric::Pressure,
    )
    .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn structural_errors_are_raised_to_the_caller() {
    let data = fixture_data();
    assert!(matches!(
        weather_performance(&data, 1800, None, WeatherMetric::Rainfall),
        Err(AnalyticsError::InvalidSeason { .. })
    ));
    assert!(matches!(
        weather_performance(&data, 1997, None, WeatherMetric::Rainfall),
        Err(AnalyticsError::SeasonNotFound(1997))
    ));
    assert!(matches!(
        weather_performance(&data, 2021, Some(&["Nobody"]), WeatherMetric::Rainfall),
        Err(AnalyticsError::DriverNotFound(_))
    ));
}

#[test]
fn metric_names_parse_at_the_boundary() {
    assert_eq!(
        WeatherMetric::from_str("pressure").unwrap(),
        WeatherMetric::Pressure
    );
    assert_eq!(
        WeatherMetric::from_str("track_temp").unwrap(),
        WeatherMetric::TrackTemp
    );
    let err = WeatherMetric::from_str("humidity_pct").unwrap_err();
    assert!(matches!(err, AnalyticsError::UnknownMetric(name) if name == "humidity_pct"));
}

#[test]
fn comparison_pivots_categories_against_drivers() {
    let data = fixture_data();
    let cmp = compare_drivers_in_conditions(
        &data,
        2021,
        Some(&["Lewis Hamilton", "Max Verstappen"]),
        WeatherMetric::Rainfall,
    )
    .unwrap();

    assert_eq!(cmp.categories, vec!["Dry", "Rainy"]);
    assert_eq!(
        cmp.drivers,
        vec!["Lewis Hamilton".to_string(), "Max Verstappen".to_string()]
    );

    // Hamilton won the only rainy race; Verstappen came second.
    let rainy = cmp.categories.iter().position(|c| *c == "Rainy").unwrap();
    let ham = cmp.cells[rainy][0].unwrap();
    let ver = cmp.cells[rainy][1].unwrap();
    assert_eq!(ham.avg_position, Some(1.0));
    assert_eq!(ham.win_rate, 100.0);
    assert_eq!(ver.avg_position, Some(2.0));
    assert_eq!(ver.win_rate, 0.0);
}

#[test]
fn best_conditions_scans_every_metric_independently() {
    let data = fixture_data();
    let report = best_conditions_for_driver(&data, 2021, "Lewis Hamilton").unwrap();

    assert_eq!(report.metrics.len(), WeatherMetric::ALL.len());
    for (metric, scan) in &report.metrics {
        match scan {
            ConditionScan::Found {
                best_position,
                best_points,
            } => {
                assert!(best_position.value >= 1.0, "{metric:?}");
                assert!(best_points.value > 0.0, "{metric:?}");
            }
            ConditionScan::NoData => panic!("{metric:?} unexpectedly empty"),
        }
    }

    let (_, pressure_scan) = report
        .metrics
        .iter()
        .find(|(m, _)| *m == WeatherMetric::Pressure)
        .unwrap();
    match pressure_scan {
        ConditionScan::Found {
            best_position,
            best_points,
        } => {
            // Hamilton won both the low- and medium-pressure races; the scan
            // settles ties on the first category in sorted order.
            assert_eq!(best_position.category, "Low Pressure (<990 hPa)");
            assert_eq!(best_position.value, 1.0);
            assert_eq!(best_points.category, "Low Pressure (<990 hPa)");
            assert_eq!(best_points.value, 25.0);
        }
        ConditionScan::NoData => panic!("pressure scan unexpectedly empty"),
    }
}

#[test]
fn best_conditions_reports_no_data_instead_of_failing() {
    let data = fixture_data();

    // 2020 has no weather coverage at all.
    let report = best_conditions_for_driver(&data, 2020, "Lewis Hamilton").unwrap();
    assert!(report
        .metrics
        .iter()
        .all(|(_, scan)| *scan == ConditionScan::NoData));

    // Structural errors still propagate.
    assert!(matches!(
        best_conditions_for_driver(&data, 2021, "Nobody"),
        Err(AnalyticsError::DriverNotFound(_))
    ));
}

#[test]
fn aggregate_rows_serialize_for_renderers() {
    let data = fixture_data();
    let rows = weather_performance(
        &data,
        2021,
        Some(&["Lewis Hamilton"]),
        WeatherMetric::Rainfall,
    )
    .unwrap();

    let json = serde_json::to_value(&rows[0]).unwrap();
    for field in [
        "driver",
        "category",
        "avg_position",
        "avg_points",
        "total_points",
        "races",
        "wins",
        "podiums",
        "win_rate",
        "podium_rate",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(json["driver"], "Lewis Hamilton");
}

#[test]
fn repeated_calls_return_identical_rows() {
    let data = fixture_data();
    let a = weather_performance(&data, 2021, None, WeatherMetric::WindSpeed).unwrap();
    let b = weather_performance(&data, 2021, None, WeatherMetric::WindSpeed).unwrap();
    assert_eq!(a, b);
}
