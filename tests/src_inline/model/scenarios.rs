
use super::*;
use crate::table::Column;

fn text(values: &[&str]) -> Column {
    Column::Text(values.iter().map(|s| Some(s.to_string())).collect())
}

fn num(values: &[f64]) -> Column {
    Column::Numeric(values.iter().map(|v| Some(*v)).collect())
}

#[test]
fn test_catalog_sizes() {
    assert_eq!(scenario_catalog(ProjectMode::Adcam).len(), 24);
    assert_eq!(scenario_catalog(ProjectMode::Cariad).len(), 9);
}

#[test]
fn test_single_baseline_first() {
    for mode in [ProjectMode::Adcam, ProjectMode::Cariad] {
        let catalog = scenario_catalog(mode);
        assert!(catalog[0].is_baseline());
        assert_eq!(catalog.iter().filter(|s| s.is_baseline()).count(), 1);
    }
}

#[test]
fn test_labels() {
    let adcam = scenario_catalog(ProjectMode::Adcam);
    assert_eq!(adcam[0].label("Yaw "), "Yaw (0, 0, 0, default)");
    assert_eq!(adcam[4].label("Pitch "), "Pitch (3.5, 0, 0, default)");
    assert_eq!(adcam[6].tag(), "(-2.5, 0, 0, default)");

    let cariad = scenario_catalog(ProjectMode::Cariad);
    assert_eq!(cariad[0].tag(), "(any, any, any, any)");
    assert_eq!(cariad[1].tag(), "(any, clear, day, low)");
}

#[test]
fn test_bracket_select_exact_match() {
    let table = Table::new()
        .with_column("pitch", num(&[0.0, 3.5, 0.0, 0.0]))
        .unwrap()
        .with_column("yaw", num(&[0.0, 0.0, 0.0, 0.0]))
        .unwrap()
        .with_column("roll", num(&[0.0, 0.0, 0.0, 0.0]))
        .unwrap()
        .with_column("suspension", text(&["default", "default", "low", "default"]))
        .unwrap()
        .with_column("v", num(&[1.0, 2.0, 3.0, 4.0]))
        .unwrap();
    let columns = ColumnNames::default();
    let catalog = scenario_catalog(ProjectMode::Adcam);

    let baseline = catalog[0].select(&table, &columns).unwrap();
    assert_eq!(baseline.numeric("v").unwrap(), &[Some(1.0), Some(4.0)]);

    let low = catalog[2].select(&table, &columns).unwrap();
    assert_eq!(low.numeric("v").unwrap(), &[Some(3.0)]);
}

#[test]
fn test_drive_select_wildcard() {
    // No road column: every drive scenario leaves road unfiltered.
    let table = Table::new()
        .with_column("weather", text(&["clear", "rain", "clear"]))
        .unwrap()
        .with_column("daytime", text(&["day", "day", "night"]))
        .unwrap()
        .with_column("suspension", text(&["low", "low", "high"]))
        .unwrap();
    let columns = ColumnNames::default();
    let catalog = scenario_catalog(ProjectMode::Cariad);

    assert_eq!(catalog[0].select(&table, &columns).unwrap().n_rows(), 3);
    assert_eq!(catalog[1].select(&table, &columns).unwrap().n_rows(), 1);
    assert_eq!(catalog[4].select(&table, &columns).unwrap().n_rows(), 1);
    assert_eq!(catalog[8].select(&table, &columns).unwrap().n_rows(), 0);
}

#[test]
fn test_bracket_select_missing_column() {
    let table = Table::new().with_column("pitch", num(&[0.0])).unwrap();
    let catalog = scenario_catalog(ProjectMode::Adcam);
    assert!(matches!(
        catalog[0].select(&table, &ColumnNames::default()),
        Err(StatsError::MissingColumn { column }) if column == "yaw"
    ));
}
