
use super::*;
use crate::model::results::Missing;
use crate::table::Column;

fn weighted_table(values: &[f64], weights: &[f64]) -> Table {
    Table::new()
        .with_column(
            "v",
            Column::Numeric(values.iter().map(|v| Some(*v)).collect()),
        )
        .unwrap()
        .with_column(
            "weight",
            Column::Numeric(weights.iter().map(|w| Some(*w)).collect()),
        )
        .unwrap()
}

fn one_to_ten() -> Vec<f64> {
    (1..=10).map(f64::from).collect()
}

fn value(row: &StatRow, title: &str) -> f64 {
    row.get(title).and_then(|v| v.as_f64()).unwrap()
}

#[test]
fn test_weighted_profile_keys_in_order() {
    let table = weighted_table(&one_to_ten(), &[1.0; 10]);
    let row = weighted_profile(&table, "v", "weight").unwrap();
    let titles: Vec<_> = row.titles().collect();
    assert_eq!(
        titles,
        vec![
            "Percentile 0",
            "Percentile 25",
            "Percentile 50",
            "Percentile 75",
            "Percentile 90",
            "Percentile 95",
            "Percentile 98",
            "Percentile 99",
            "Percentile 100",
        ]
    );
    assert_eq!(value(&row, "Percentile 0"), 1.0);
    assert!((value(&row, "Percentile 50") - 5.5).abs() < 1e-12);
    assert_eq!(value(&row, "Percentile 100"), 10.0);
}

#[test]
fn test_weighted_matches_unweighted_for_unit_weights() {
    let table = weighted_table(&one_to_ten(), &[1.0; 10]);
    let weighted = weighted_profile(&table, "v", "weight").unwrap();
    let plain = unweighted_profile(&table, "v").unwrap();
    for key in PERCENTILE_KEYS {
        let a = value(&weighted, key.title());
        let b = value(&plain, key.title());
        assert!((a - b).abs() < 1e-9, "{}: {a} vs {b}", key.title());
    }
}

#[test]
fn test_extremes_use_unfiltered_column() {
    let mut weights = vec![1.0; 10];
    weights[0] = 0.0;
    let table = weighted_table(&one_to_ten(), &weights);
    let row = weighted_profile(&table, "v", "weight").unwrap();
    // Zero weight row still sets percentile 0.
    assert_eq!(value(&row, "Percentile 0"), 1.0);
    assert!((value(&row, "Percentile 25") - 4.0).abs() < 1e-12);
    assert_eq!(value(&row, "Percentile 100"), 10.0);
}

#[test]
fn test_empty_and_zero_weight_profiles_are_nan() {
    let zero = weighted_table(&[1.0, 2.0], &[0.0, 0.0]);
    let empty = weighted_table(&[], &[]);
    for table in [zero, empty] {
        let row = weighted_profile(&table, "v", "weight").unwrap();
        assert_eq!(row.len(), 9);
        assert!(
            row.iter()
                .all(|(_, v)| v == StatValue::Missing(Missing::NotANumber))
        );
    }
}

#[test]
fn test_profile_missing_column() {
    let table = weighted_table(&[1.0], &[1.0]);
    match weighted_profile(&table, "delta_yaw", "weight") {
        Err(StatsError::MissingColumn { column }) => assert_eq!(column, "delta_yaw"),
        other => panic!("unexpected: {other:?}"),
    }
    assert!(unweighted_profile(&table, "delta_yaw").is_err());
}

#[test]
fn test_unweighted_profile_values() {
    let table = weighted_table(&one_to_ten(), &[1.0; 10]);
    let row = unweighted_profile(&table, "v").unwrap();
    assert!((value(&row, "Percentile 25") - 3.25).abs() < 1e-12);
    assert!((value(&row, "Percentile 90") - 9.1).abs() < 1e-12);
}

#[test]
fn test_min_med_ave_max() {
    let table = weighted_table(&[4.0, 1.0, 7.0], &[1.0; 3]);
    let row = min_med_ave_max(&table, "v").unwrap();
    assert_eq!(row.titles().collect::<Vec<_>>(), vec![
        "minimum", "median", "average", "maximum"
    ]);
    assert_eq!(value(&row, "minimum"), 1.0);
    assert_eq!(value(&row, "median"), 4.0);
    assert_eq!(value(&row, "average"), 4.0);
    assert_eq!(value(&row, "maximum"), 7.0);
}

#[test]
fn test_min_med_ave_max_empty_is_no_data() {
    let table = weighted_table(&[], &[]);
    let row = min_med_ave_max(&table, "v").unwrap();
    assert_eq!(row.len(), 4);
    assert!(row.iter().all(|(_, v)| v == StatValue::no_data()));
}

#[test]
fn test_two_sigma() {
    let table = weighted_table(&one_to_ten(), &[1.0; 10]);
    let row = two_sigma(&table, "v", "weight").unwrap();
    assert!((value(&row, "2 sigma") - 9.55).abs() < 1e-9);

    let empty = weighted_table(&[], &[]);
    assert!(two_sigma(&empty, "v", "weight").unwrap().get("2 sigma").unwrap().is_missing());
}

fn state_table(rows: &[[f64; 4]]) -> Table {
    let mut table = Table::new();
    for (idx, (_, column)) in STATE_RATIO_COLUMNS.iter().enumerate() {
        table = table
            .with_column(
                column,
                Column::Numeric(rows.iter().map(|r| Some(r[idx])).collect()),
            )
            .unwrap();
    }
    table
}

#[test]
fn test_state_ratio_percentages() {
    let table = state_table(&[[1.0, 0.0, 2.0, 1.0], [3.0, 0.0, 2.0, 1.0]]);
    let row = state_ratio(&table).unwrap();
    assert_eq!(value(&row, "Suspected"), 40.0);
    assert_eq!(value(&row, "Un-validated"), 0.0);
    assert_eq!(value(&row, "Calibrated"), 40.0);
    assert_eq!(value(&row, "Out of Range"), 20.0);
}

#[test]
fn test_state_ratio_zero_when_empty() {
    for table in [state_table(&[]), state_table(&[[0.0; 4]])] {
        let row = state_ratio(&table).unwrap();
        assert_eq!(row.len(), 4);
        assert!(row.iter().all(|(_, v)| v == StatValue::Value(0.0)));
    }
}

fn degrade_table(rows: &[[f64; 5]]) -> Table {
    let mut table = Table::new();
    for (idx, (_, column)) in DEGRADE_CAUSE_COLUMNS.iter().enumerate() {
        table = table
            .with_column(
                column,
                Column::Numeric(rows.iter().map(|r| Some(r[idx])).collect()),
            )
            .unwrap();
    }
    table
}

#[test]
fn test_degrade_cause_ratio_percentages() {
    let table = degrade_table(&[[5.0, 1.0, 0.0, 2.0, 0.0], [1.0, 0.0, 0.0, 1.0, 0.0]]);
    let row = degrade_cause_ratio(&table).unwrap();
    let titles: Vec<_> = row.titles().collect();
    assert_eq!(titles, vec!["NO DEGRADE", "HEIGHT", "YAW", "PITCH", "ROLL"]);
    assert_eq!(value(&row, "NO DEGRADE"), 60.0);
    assert_eq!(value(&row, "HEIGHT"), 10.0);
    assert_eq!(value(&row, "YAW"), 0.0);
    assert_eq!(value(&row, "PITCH"), 30.0);
    assert_eq!(value(&row, "ROLL"), 0.0);
}

#[test]
fn test_degrade_cause_ratio_zero_when_empty() {
    for table in [degrade_table(&[]), degrade_table(&[[0.0; 5]])] {
        let row = degrade_cause_ratio(&table).unwrap();
        assert_eq!(row.len(), 5);
        assert!(row.iter().all(|(_, v)| v == StatValue::Value(0.0)));
    }
    assert!(matches!(
        degrade_cause_ratio(&state_table(&[[1.0; 4]])),
        Err(StatsError::MissingColumn { column }) if column == "degrade_none"
    ));
}

#[test]
fn test_statistic_dispatch() {
    use crate::config::StatisticKind;
    use crate::stats::{StatFunction, Statistic};

    let table = weighted_table(&one_to_ten(), &[1.0; 10]);
    let stat = Statistic::new(StatisticKind::WeightedPercentiles, "weight");
    assert!(stat.is_weighted());
    assert_eq!(stat.compute(&table, "v").unwrap().len(), 9);

    let stat = Statistic::new(StatisticKind::MinMedAveMax, "weight");
    assert!(!stat.is_weighted());
    assert_eq!(stat.compute(&table, "v").unwrap().len(), 4);

    let stat = Statistic::new(StatisticKind::DegradeCauseRatio, "weight");
    assert!(!stat.is_weighted());
    let degrade = degrade_table(&[[1.0, 1.0, 0.0, 0.0, 0.0]]);
    assert_eq!(
        stat.compute(&degrade, "degrade_none").unwrap().get("HEIGHT"),
        Some(StatValue::Value(50.0))
    );

    let closure = |t: &Table, c: &str| -> Result<StatRow, StatsError> {
        Ok(StatRow::new().with("rows", StatValue::Value(t.numeric(c)?.len() as f64)))
    };
    assert_eq!(
        closure.compute(&table, "v").unwrap().get("rows"),
        Some(StatValue::Value(10.0))
    );
}
