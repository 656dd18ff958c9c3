use std::borrow::Cow;

use tracing::debug;

use crate::config::{ColumnNames, ProjectMode};
use crate::error::StatsError;
use crate::model::conditions::{Condition, full_conditions, road_conditions};
use crate::model::results::StatResult;
use crate::stats::StatFunction;
use crate::table::Table;

/// Evaluates a statistic over a fixed condition catalog.
///
/// Every condition filters the table it is given, never the previous
/// condition's subset. Each returned result holds the catalog's conditions in
/// catalog order.
#[derive(Debug, Clone)]
pub struct ConditionStratifier<'a> {
    columns: &'a ColumnNames,
    full: Vec<Condition>,
    road: Vec<Condition>,
}

impl<'a> ConditionStratifier<'a> {
    pub fn new(columns: &'a ColumnNames, mode: ProjectMode) -> Self {
        Self {
            columns,
            full: full_conditions(mode),
            road: road_conditions(),
        }
    }

    pub fn stratify_full(
        &self,
        stat: &dyn StatFunction,
        table: &Table,
        columns: &[&str],
    ) -> Result<Vec<StatResult>, StatsError> {
        self.stratify(&self.full, stat, table, columns)
    }

    pub fn stratify_road(
        &self,
        stat: &dyn StatFunction,
        table: &Table,
        columns: &[&str],
    ) -> Result<Vec<StatResult>, StatsError> {
        self.stratify(&self.road, stat, table, columns)
    }

    fn stratify(
        &self,
        catalog: &[Condition],
        stat: &dyn StatFunction,
        table: &Table,
        columns: &[&str],
    ) -> Result<Vec<StatResult>, StatsError> {
        let mut results = vec![StatResult::new(); columns.len()];

        for condition in catalog {
            let subset: Cow<'_, Table> = if condition.is_unfiltered() {
                Cow::Borrowed(table)
            } else {
                Cow::Owned(table.filter(&condition.mask(table, self.columns)?))
            };
            if subset.is_empty() {
                debug!(condition = condition.name, "empty partition");
            }

            for (result, column) in results.iter_mut().zip(columns) {
                let row = stat.compute(&subset, column)?;
                debug!(
                    condition = condition.name,
                    column = *column,
                    rows = subset.n_rows(),
                    "evaluated statistic"
                );
                result.insert(condition.name, row);
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_stratify.rs"]
mod tests;
