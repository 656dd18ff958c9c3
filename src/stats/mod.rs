pub mod profile;
pub mod quantile;

use crate::config::StatisticKind;
use crate::error::StatsError;
use crate::model::results::StatRow;
use crate::table::Table;

/// Statistic evaluated once per (partition, column) by the stratifier.
pub trait StatFunction {
    fn compute(&self, table: &Table, column: &str) -> Result<StatRow, StatsError>;
}

impl<F> StatFunction for F
where
    F: Fn(&Table, &str) -> Result<StatRow, StatsError>,
{
    fn compute(&self, table: &Table, column: &str) -> Result<StatRow, StatsError> {
        self(table, column)
    }
}

#[derive(Debug, Clone)]
pub struct Statistic {
    pub kind: StatisticKind,
    pub weight_column: String,
}

impl Statistic {
    pub fn new(kind: StatisticKind, weight_column: &str) -> Self {
        Self {
            kind,
            weight_column: weight_column.to_string(),
        }
    }

    pub fn is_weighted(&self) -> bool {
        matches!(
            self.kind,
            StatisticKind::WeightedPercentiles | StatisticKind::TwoSigma
        )
    }
}

impl StatFunction for Statistic {
    fn compute(&self, table: &Table, column: &str) -> Result<StatRow, StatsError> {
        match self.kind {
            StatisticKind::WeightedPercentiles => {
                profile::weighted_profile(table, column, &self.weight_column)
            }
            StatisticKind::Percentiles => profile::unweighted_profile(table, column),
            StatisticKind::MinMedAveMax => profile::min_med_ave_max(table, column),
            StatisticKind::StateRatio => profile::state_ratio(table),
            StatisticKind::DegradeCauseRatio => profile::degrade_cause_ratio(table),
            StatisticKind::TwoSigma => profile::two_sigma(table, column, &self.weight_column),
        }
    }
}
