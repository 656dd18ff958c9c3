use crate::error::StatsError;
use crate::model::results::{StatRow, StatValue};
use crate::stats::quantile::{
    Interpolation, max, mean, median, min, quantile, weighted_quantile, weighted_series,
};
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentileKey {
    P0,
    P25,
    P50,
    P75,
    P90,
    P95,
    P98,
    P99,
    P100,
}

pub const PERCENTILE_KEYS: [PercentileKey; 9] = [
    PercentileKey::P0,
    PercentileKey::P25,
    PercentileKey::P50,
    PercentileKey::P75,
    PercentileKey::P90,
    PercentileKey::P95,
    PercentileKey::P98,
    PercentileKey::P99,
    PercentileKey::P100,
];

impl PercentileKey {
    pub fn fraction(self) -> f64 {
        match self {
            PercentileKey::P0 => 0.0,
            PercentileKey::P25 => 0.25,
            PercentileKey::P50 => 0.5,
            PercentileKey::P75 => 0.75,
            PercentileKey::P90 => 0.90,
            PercentileKey::P95 => 0.95,
            PercentileKey::P98 => 0.98,
            PercentileKey::P99 => 0.99,
            PercentileKey::P100 => 1.0,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PercentileKey::P0 => "Percentile 0",
            PercentileKey::P25 => "Percentile 25",
            PercentileKey::P50 => "Percentile 50",
            PercentileKey::P75 => "Percentile 75",
            PercentileKey::P90 => "Percentile 90",
            PercentileKey::P95 => "Percentile 95",
            PercentileKey::P98 => "Percentile 98",
            PercentileKey::P99 => "Percentile 99",
            PercentileKey::P100 => "Percentile 100",
        }
    }
}

fn nan_profile() -> StatRow {
    let mut row = StatRow::new();
    for key in PERCENTILE_KEYS {
        row.push(key.title(), StatValue::nan());
    }
    row
}

/// Nine-point profile of `column` weighted by `weight_column`.
///
/// Percentiles 0 and 100 are the min and max of the unfiltered column, zero
/// weight rows included. 25 to 99 come from the weighted series only.
pub fn weighted_profile(
    table: &Table,
    column: &str,
    weight_column: &str,
) -> Result<StatRow, StatsError> {
    let values = table.numeric(column)?;
    let weights = table.numeric(weight_column)?;
    let series = weighted_series(values, weights);
    if series.is_empty() {
        return Ok(nan_profile());
    }

    let mut row = StatRow::new();
    for key in PERCENTILE_KEYS {
        let v = match key {
            PercentileKey::P0 => min(values),
            PercentileKey::P100 => max(values),
            _ => weighted_quantile(&series, key.fraction(), Interpolation::Linear),
        };
        row.push(key.title(), StatValue::from_f64(v));
    }
    Ok(row)
}

pub fn unweighted_profile(table: &Table, column: &str) -> Result<StatRow, StatsError> {
    let values = table.numeric(column)?;
    let mut row = StatRow::new();
    for key in PERCENTILE_KEYS {
        let v = match key {
            PercentileKey::P0 => min(values),
            PercentileKey::P100 => max(values),
            _ => quantile(values, key.fraction()),
        };
        row.push(key.title(), StatValue::from_f64(v));
    }
    Ok(row)
}

/// Minimum, median, average and maximum. An empty partition reports the
/// textual "No Data" sentinel instead of NaN.
pub fn min_med_ave_max(table: &Table, column: &str) -> Result<StatRow, StatsError> {
    let values = table.numeric(column)?;
    if table.is_empty() {
        return Ok(["minimum", "median", "average", "maximum"]
            .into_iter()
            .fold(StatRow::new(), |row, t| row.with(t, StatValue::no_data())));
    }
    Ok(StatRow::new()
        .with("minimum", StatValue::from_f64(min(values)))
        .with("median", StatValue::from_f64(median(values)))
        .with("average", StatValue::from_f64(mean(values)))
        .with("maximum", StatValue::from_f64(max(values))))
}

/// Weighted 95th percentile, the two-sigma bound of the accuracy KPI.
pub fn two_sigma(table: &Table, column: &str, weight_column: &str) -> Result<StatRow, StatsError> {
    let series = weighted_series(table.numeric(column)?, table.numeric(weight_column)?);
    let v = weighted_quantile(&series, 0.95, Interpolation::Linear);
    Ok(StatRow::new().with("2 sigma", StatValue::from_f64(v)))
}

pub const STATE_RATIO_COLUMNS: [(&str, &str); 4] = [
    ("Suspected", "suspected"),
    ("Un-validated", "unvalidated"),
    ("Calibrated", "calibrated"),
    ("Out of Range", "out_of_range"),
];

pub const DEGRADE_CAUSE_COLUMNS: [(&str, &str); 5] = [
    ("NO DEGRADE", "degrade_none"),
    ("HEIGHT", "degrade_height"),
    ("YAW", "degrade_yaw"),
    ("PITCH", "degrade_pitch"),
    ("ROLL", "degrade_roll"),
];

/// Percentage share of each calibration state count column. All zero when the
/// partition is empty or holds no counts.
pub fn state_ratio(table: &Table) -> Result<StatRow, StatsError> {
    count_ratio(table, &STATE_RATIO_COLUMNS)
}

/// Percentage share of each degrade cause count column, zero like [`state_ratio`].
pub fn degrade_cause_ratio(table: &Table) -> Result<StatRow, StatsError> {
    count_ratio(table, &DEGRADE_CAUSE_COLUMNS)
}

fn count_ratio(table: &Table, columns: &[(&str, &str)]) -> Result<StatRow, StatsError> {
    let zero = || {
        columns.iter().fold(StatRow::new(), |row, (title, _)| {
            row.with(*title, StatValue::Value(0.0))
        })
    };
    if table.is_empty() {
        return Ok(zero());
    }

    let mut sums = Vec::with_capacity(columns.len());
    for (_, column) in columns {
        let total: f64 = table.numeric(column)?.iter().flatten().sum();
        sums.push(total);
    }
    let total: f64 = sums.iter().sum();
    if total <= 0.0 {
        return Ok(zero());
    }

    let mut row = StatRow::new();
    for ((title, _), sum) in columns.iter().zip(sums) {
        row.push(*title, StatValue::Value(sum / total * 100.0));
    }
    Ok(row)
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/profile.rs"]
mod tests;
