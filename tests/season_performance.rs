use f1_analytics::analytics::season_performance;
use f1_analytics::entities::F1Data;
use f1_analytics::ingestion::LoadOptions;
use f1_analytics::AnalyticsError;

fn fixture_data() -> F1Data {
    F1Data::load("tests/fixtures", &LoadOptions::default()).unwrap()
}

#[test]
fn pivot_has_zero_row_and_sorted_driver_columns() {
    let data = fixture_data();
    let pivot = season_performance(&data, 2021, None).unwrap();

    assert_eq!(pivot.rounds(), &[0, 1, 2, 3]);
    assert_eq!(
        pivot.drivers(),
        &[
            "Lando Norris".to_string(),
            "Lewis Hamilton".to_string(),
            "Max Verstappen".to_string(),
            "Valtteri Bottas".to_string(),
        ]
    );
    assert!(pivot.points()[0].iter().all(|&p| p == 0.0));
}

#[test]
fn totals_are_cumulative_and_non_decreasing() {
    let data = fixture_data();
    for year in [2020, 2021] {
        let pivot = season_performance(&data, year, None).unwrap();
        for col in 0..pivot.drivers().len() {
            let mut prev = f64::MIN;
            for row in pivot.points() {
                assert!(row[col] >= prev, "{year}: column {col} decreased");
                prev = row[col];
            }
        }
    }
}

#[test]
fn driver_who_skipped_a_round_keeps_the_prior_total() {
    let data = fixture_data();
    let pivot = season_performance(&data, 2021, None).unwrap();

    // Norris has no round-2 result in the fixture.
    assert_eq!(
        pivot.column("Lando Norris").unwrap(),
        vec![0.0, 12.0, 12.0, 27.0]
    );
}

#[test]
fn driver_filter_projects_to_exactly_the_requested_columns() {
    let data = fixture_data();
    let pivot =
        season_performance(&data, 2021, Some(&["Lewis Hamilton", "Max Verstappen"])).unwrap();

    assert_eq!(
        pivot.drivers(),
        &["Lewis Hamilton".to_string(), "Max Verstappen".to_string()]
    );
    assert!(pivot.points()[0].iter().all(|&p| p == 0.0));
    // Final row equals each driver's season point total.
    assert_eq!(pivot.final_totals(), &[68.0, 61.0]);
}

#[test]
fn dnf_contributes_zero_points_but_does_not_forward_fill() {
    let data = fixture_data();
    let pivot = season_performance(&data, 2021, None).unwrap();

    // Bottas retired in round 3 with 0 points: the total stays flat because a
    // zero was recorded, not because of forward fill.
    assert_eq!(
        pivot.column("Valtteri Bottas").unwrap(),
        vec![0.0, 15.0, 30.0, 30.0]
    );
}

#[test]
fn out_of_range_year_is_invalid_season() {
    let data = fixture_data();
    assert!(matches!(
        season_performance(&data, 1800, None),
        Err(AnalyticsError::InvalidSeason { year: 1800, .. })
    ));
    assert!(matches!(
        season_performance(&data, 2024, None),
        Err(AnalyticsError::InvalidSeason { .. })
    ));
}

#[test]
fn in_range_year_without_races_is_season_not_found() {
    let data = fixture_data();
    assert!(matches!(
        season_performance(&data, 1997, None),
        Err(AnalyticsError::SeasonNotFound(1997))
    ));
}

#[test]
fn unknown_driver_in_filter_is_driver_not_found() {
    let data = fixture_data();
    let err = season_performance(&data, 2021, Some(&["Sebastian Vettel"])).unwrap_err();
    assert!(matches!(err, AnalyticsError::DriverNotFound(name) if name == "Sebastian Vettel"));
}

#[test]
fn driver_without_results_that_season_is_not_a_pivot_column() {
    let data = fixture_data();
    // Senna exists in the driver table but has no 2021 results, so he is not
    // a column and cannot be selected.
    let err = season_performance(&data, 2021, Some(&["Ayrton Senna"])).unwrap_err();
    assert!(matches!(err, AnalyticsError::DriverNotFound(_)));
}

#[test]
fn repeated_calls_return_identical_pivots() {
    let data = fixture_data();
    let a = season_performance(&data, 2021, None).unwrap();
    let b = season_performance(&data, 2021, None).unwrap();
    assert_eq!(a, b);
}
