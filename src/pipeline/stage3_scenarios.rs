use serde::Serialize;
use tracing::{error, info};

use crate::config::{ReportConfig, SheetConfig};
use crate::error::{ReportError, SinkError, StatsError};
use crate::model::results::StatResult;
use crate::model::scenarios::{Scenario, scenario_catalog};
use crate::pipeline::stage1_prepare::TableSource;
use crate::pipeline::stage2_stratify::ConditionStratifier;
use crate::report::{ReportSink, layout_block};
use crate::stats::StatFunction;
use crate::table::Table;

#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub sink: usize,
    pub label: String,
    pub column: String,
    pub start_row: usize,
    pub result: StatResult,
}

/// Progress of one sheet. The cursor is the next free row; `cursor_trace`
/// records it after every step.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SheetOutcome {
    pub cursor: usize,
    pub written: usize,
    pub skipped: usize,
    pub cursor_trace: Vec<usize>,
    pub blocks: Vec<Block>,
}

impl SheetOutcome {
    pub fn starting_at(row: usize) -> Self {
        Self {
            cursor: row,
            ..Self::default()
        }
    }

    fn advance_to(&mut self, row: usize) {
        self.cursor = self.cursor.max(row);
        self.cursor_trace.push(self.cursor);
    }
}

/// Walks the scenario catalog of the configured project mode and writes one
/// block per (scenario, param, result) into the sheet's sinks.
pub struct ConfigIterator<'a> {
    config: &'a ReportConfig,
    stratifier: ConditionStratifier<'a>,
    catalog: Vec<Scenario>,
}

impl<'a> ConfigIterator<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            stratifier: ConditionStratifier::new(&config.columns, config.mode),
            catalog: scenario_catalog(config.mode),
        }
    }

    /// Runs every scenario of the catalog for `sheet`. A missing column stops the
    /// sheet with a [`ReportError::Scenario`]; blocks already written stay in
    /// `outcome` and in the sinks.
    pub fn run_sheet<S: ReportSink>(
        &self,
        sheet: &SheetConfig,
        stat: &dyn StatFunction,
        source: &TableSource,
        sinks: &mut [S],
        outcome: &mut SheetOutcome,
    ) -> Result<(), ReportError> {
        for scenario in &self.catalog {
            info!(
                sheet = %sheet.name,
                scenario = %scenario.tag(),
                baseline = scenario.is_baseline(),
                "selected scenario"
            );
            for param in &sheet.params {
                let label = scenario.label(&param.label);
                let columns = sheet.stat_columns(param);
                let results = match self.evaluate(scenario, stat, source, &columns) {
                    Ok(results) => results,
                    Err(err) => {
                        error!(
                            sheet = %sheet.name,
                            scenario = %label,
                            error = %err,
                            "statistic failed, aborting sheet"
                        );
                        return Err(ReportError::Scenario {
                            scenario: label,
                            source: err,
                        });
                    }
                };
                self.write_results(&label, &columns, results, sinks, outcome)?;
            }
            let next = outcome.cursor + self.config.scenario_spacer;
            outcome.advance_to(next);
        }
        Ok(())
    }

    fn evaluate(
        &self,
        scenario: &Scenario,
        stat: &dyn StatFunction,
        source: &TableSource,
        columns: &[&str],
    ) -> Result<Vec<StatResult>, StatsError> {
        let columns_cfg = &self.config.columns;
        match source {
            TableSource::Shared(table) => {
                let selected = scenario.select(table, columns_cfg)?;
                self.stratify(scenario, stat, &selected, columns)
            }
            TableSource::PerColumn(_) => {
                let mut results = Vec::with_capacity(columns.len());
                for &column in columns {
                    let selected = scenario.select(source.table_for(column)?, columns_cfg)?;
                    results.extend(self.stratify(scenario, stat, &selected, &[column])?);
                }
                Ok(results)
            }
        }
    }

    /// Baseline scenarios get the full condition catalog, all others the road split.
    fn stratify(
        &self,
        scenario: &Scenario,
        stat: &dyn StatFunction,
        table: &Table,
        columns: &[&str],
    ) -> Result<Vec<StatResult>, StatsError> {
        if scenario.is_baseline() {
            self.stratifier.stratify_full(stat, table, columns)
        } else {
            self.stratifier.stratify_road(stat, table, columns)
        }
    }

    /// Writes result `i` into sink `i` at the cursor. Every block is laid out
    /// first, so a malformed result writes nothing and leaves the cursor where it
    /// was. A sink rejecting after earlier sinks accepted their blocks still
    /// moves the cursor past those blocks.
    fn write_results<S: ReportSink>(
        &self,
        label: &str,
        columns: &[&str],
        results: Vec<StatResult>,
        sinks: &mut [S],
        outcome: &mut SheetOutcome,
    ) -> Result<(), ReportError> {
        let start_row = outcome.cursor;
        if results.len() > sinks.len() {
            error!(
                scenario = %label,
                results = results.len(),
                sinks = sinks.len(),
                "more results than sinks, skipping write"
            );
            outcome.skipped += 1;
            return Ok(());
        }
        for (result, column) in results.iter().zip(columns) {
            if let Err(SinkError::ShapeMismatch { reason }) =
                layout_block(result, None, Some(label))
            {
                error!(
                    scenario = %label,
                    column = *column,
                    row = start_row,
                    %reason,
                    "result shape does not fit a block, skipping write"
                );
                outcome.skipped += 1;
                return Ok(());
            }
        }

        let mut next_row = None;
        for (idx, (result, column)) in results.into_iter().zip(columns).enumerate() {
            let sink = &mut sinks[idx];
            match sink.write(&result, start_row, None, Some(label)) {
                Ok(row) => {
                    next_row = next_row.max(Some(row));
                    outcome.blocks.push(Block {
                        sink: idx,
                        label: label.to_string(),
                        column: column.to_string(),
                        start_row,
                        result,
                    });
                }
                Err(SinkError::ShapeMismatch { reason }) => {
                    error!(
                        sink = sink.name(),
                        scenario = %label,
                        row = start_row,
                        %reason,
                        "sink rejected result shape, skipping write"
                    );
                    outcome.skipped += 1;
                    if let Some(row) = next_row {
                        outcome.advance_to(row + self.config.write_spacer);
                    }
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            }
        }

        outcome.written += 1;
        if let Some(row) = next_row {
            outcome.advance_to(row + self.config.write_spacer);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_scenarios.rs"]
mod tests;
