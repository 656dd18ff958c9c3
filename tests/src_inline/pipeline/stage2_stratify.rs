
use super::*;
use crate::model::results::{StatRow, StatValue};
use crate::table::Column;

fn text(values: &[&str]) -> Column {
    Column::Text(values.iter().map(|s| Some(s.to_string())).collect())
}

fn env_table() -> Table {
    Table::new()
        .with_column("road", text(&["city", "city", "highway", "rural", "city"]))
        .unwrap()
        .with_column("weather", text(&["clear", "rain", "clear", "snow", "clear"]))
        .unwrap()
        .with_column("daytime", text(&["day", "night", "night", "day", "night"]))
        .unwrap()
        .with_column(
            "a",
            Column::Numeric(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]),
        )
        .unwrap()
        .with_column("b", Column::Numeric(vec![None; 5]))
        .unwrap()
}

fn row_count(table: &Table, column: &str) -> Result<StatRow, StatsError> {
    let n = table.numeric(column)?.len();
    Ok(StatRow::new().with("rows", StatValue::Value(n as f64)))
}

fn count(result: &StatResult, condition: &str) -> f64 {
    result
        .get(condition)
        .and_then(|r| r.get("rows"))
        .and_then(|v| v.as_f64())
        .unwrap()
}

#[test]
fn test_full_ordering_matches_catalog() {
    let columns = ColumnNames::default();
    for mode in [ProjectMode::Adcam, ProjectMode::Cariad] {
        let stratifier = ConditionStratifier::new(&columns, mode);
        let expected: Vec<_> = full_conditions(mode).iter().map(|c| c.name).collect();
        let results = stratifier
            .stratify_full(&row_count, &env_table(), &["a", "b"])
            .unwrap();
        assert_eq!(results.len(), 2);
        for result in &results {
            assert_eq!(result.conditions().collect::<Vec<_>>(), expected);
        }
    }
}

#[test]
fn test_ordering_holds_for_empty_table() {
    let columns = ColumnNames::default();
    let stratifier = ConditionStratifier::new(&columns, ProjectMode::Adcam);
    let empty = env_table().empty_like();
    let results = stratifier.stratify_full(&row_count, &empty, &["a"]).unwrap();
    assert_eq!(results[0].len(), 25);
    assert_eq!(count(&results[0], "CityDayFog"), 0.0);
}

#[test]
fn test_road_catalog() {
    let columns = ColumnNames::default();
    let stratifier = ConditionStratifier::new(&columns, ProjectMode::Adcam);
    let results = stratifier
        .stratify_road(&row_count, &env_table(), &["a"])
        .unwrap();
    assert_eq!(
        results[0].conditions().collect::<Vec<_>>(),
        vec!["Full data", "City", "Highway", "Rural"]
    );
    assert_eq!(count(&results[0], "Full data"), 5.0);
    assert_eq!(count(&results[0], "City"), 3.0);
    assert_eq!(count(&results[0], "Highway"), 1.0);
    assert_eq!(count(&results[0], "Rural"), 1.0);
}

#[test]
fn test_conditions_filter_from_scenario_table() {
    let columns = ColumnNames::default();
    let stratifier = ConditionStratifier::new(&columns, ProjectMode::Adcam);
    let results = stratifier
        .stratify_full(&row_count, &env_table(), &["a"])
        .unwrap();
    let r = &results[0];
    assert_eq!(count(r, "Day"), 2.0);
    assert_eq!(count(r, "Night"), 3.0);
    assert_eq!(count(r, "City"), 3.0);
    assert_eq!(count(r, "Clear"), 3.0);
    assert_eq!(count(r, "CityNightClear"), 1.0);
    assert_eq!(count(r, "CityDayRain"), 0.0);
}

#[test]
fn test_rain_family_quirk_in_cariad() {
    let columns = ColumnNames::default();
    let stratifier = ConditionStratifier::new(&columns, ProjectMode::Cariad);
    let results = stratifier
        .stratify_full(&row_count, &env_table(), &["a"])
        .unwrap();
    assert_eq!(count(&results[0], "CityDayRain"), 1.0);
}

#[test]
fn test_missing_weather_aborts() {
    let columns = ColumnNames::default();
    let stratifier = ConditionStratifier::new(&columns, ProjectMode::Adcam);
    let table = env_table().without_column("weather");
    match stratifier.stratify_full(&row_count, &table, &["a"]) {
        Err(StatsError::MissingColumn { column }) => assert_eq!(column, "weather"),
        other => panic!("expected missing weather, got {other:?}"),
    }
    // The road split never touches weather.
    assert!(stratifier.stratify_road(&row_count, &table, &["a"]).is_ok());
}

#[test]
fn test_missing_stat_column_propagates() {
    let columns = ColumnNames::default();
    let stratifier = ConditionStratifier::new(&columns, ProjectMode::Adcam);
    let stat = crate::stats::Statistic::new(crate::config::StatisticKind::Percentiles, "weight");
    assert!(matches!(
        stratifier.stratify_road(&stat, &env_table(), &["delta_yaw"]),
        Err(StatsError::MissingColumn { column }) if column == "delta_yaw"
    ));
}
