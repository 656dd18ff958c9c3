use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::config::{ColumnNames, PassThreshold, ReportConfig, SheetConfig};
use crate::error::{ReportError, StatsError};
use crate::pipeline::stage1_prepare::{TableSource, prepare};
use crate::pipeline::stage3_scenarios::{ConfigIterator, SheetOutcome};
use crate::report::ReportSink;
use crate::report::json::{PassFail, RunSummary, SheetSummary, render_summary_json};
use crate::report::sheet::SheetSink;
use crate::stats::Statistic;
use crate::table::Table;

/// Sink names of a sheet: one per percentile column when several are set.
pub fn sink_names(sheet: &SheetConfig) -> Vec<String> {
    match &sheet.percentile_columns {
        Some(cols) if cols.len() > 1 => cols
            .iter()
            .map(|c| format!("{} {}", sheet.name, c))
            .collect(),
        _ => vec![sheet.name.clone()],
    }
}

/// Weight of rows above each threshold against the total weight of the column.
pub fn pass_fail_counts(
    source: &TableSource,
    thresholds: &[PassThreshold],
    columns: &ColumnNames,
) -> Result<Vec<PassFail>, StatsError> {
    let mut out = Vec::with_capacity(thresholds.len());
    for threshold in thresholds {
        let table = source.table_for(&threshold.column)?;
        let values = table.numeric(&threshold.column)?;
        let weights = table.numeric(&columns.weight)?;

        let mut total = 0.0;
        let mut fail = 0.0;
        for (v, w) in values.iter().zip(weights) {
            let Some(w) = w.filter(|w| w.is_finite()) else {
                continue;
            };
            total += w;
            if v.is_some_and(|v| v > threshold.max) {
                fail += w;
            }
        }
        out.push(PassFail {
            column: threshold.column.clone(),
            threshold: threshold.max,
            total,
            pass: total - fail,
            fail,
        });
    }
    Ok(out)
}

fn run_sheet(
    iterator: &ConfigIterator<'_>,
    table: &Table,
    config: &ReportConfig,
    sheet: &SheetConfig,
    out_dir: &Path,
) -> Result<SheetSummary, ReportError> {
    let names = sink_names(sheet);
    let mut sinks = names
        .iter()
        .map(|name| SheetSink::create(out_dir, name))
        .collect::<Result<Vec<_>, _>>()?;
    let mut outcome = SheetOutcome::starting_at(0);
    let mut summary = SheetSummary {
        name: sheet.name.clone(),
        statistic: sheet.statistic.as_str().to_string(),
        sinks: sinks.iter().map(|s| s.name().to_string()).collect(),
        aborted: None,
        pass_fail: Vec::new(),
        outcome: SheetOutcome::default(),
    };

    let source = match prepare(table, sheet, &config.columns) {
        Ok(source) => source,
        Err(err) => {
            error!(sheet = %sheet.name, error = %err, "weighting preparation failed");
            summary.aborted = Some(err.to_string());
            return Ok(summary);
        }
    };

    let statistic = Statistic::new(sheet.statistic, &config.columns.weight);
    info!(
        sheet = %sheet.name,
        statistic = sheet.statistic.as_str(),
        weighted = statistic.is_weighted(),
        sinks = sinks.len(),
        "running sheet"
    );
    match iterator.run_sheet(sheet, &statistic, &source, &mut sinks, &mut outcome) {
        Ok(()) => {}
        Err(err @ ReportError::Scenario { .. }) => summary.aborted = Some(err.to_string()),
        Err(err) => return Err(err),
    }

    if !sheet.pass_thresholds.is_empty() {
        match pass_fail_counts(&source, &sheet.pass_thresholds, &config.columns) {
            Ok(counts) => summary.pass_fail = counts,
            Err(err) => error!(sheet = %sheet.name, error = %err, "pass/fail counts skipped"),
        }
    }

    info!(
        sheet = %sheet.name,
        written = outcome.written,
        skipped = outcome.skipped,
        cursor = outcome.cursor,
        aborted = summary.aborted.is_some(),
        files = ?sinks.iter().filter_map(SheetSink::path).collect::<Vec<_>>(),
        "sheet finished"
    );
    summary.outcome = outcome;
    Ok(summary)
}

/// Writes every configured sheet plus `summary.json` into `out_dir`.
pub fn write_reports(
    table: &Table,
    config: &ReportConfig,
    input_name: &str,
    out_dir: &Path,
) -> Result<RunSummary, ReportError> {
    fs::create_dir_all(out_dir)?;
    let iterator = ConfigIterator::new(config);

    let mut sheets = Vec::with_capacity(config.sheets.len());
    for sheet in &config.sheets {
        sheets.push(run_sheet(&iterator, table, config, sheet, out_dir)?);
    }

    let summary = RunSummary {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mode: config.mode.as_str().to_string(),
        input: input_name.to_string(),
        n_rows: table.n_rows(),
        sheets,
    };
    let json = render_summary_json(&summary)?;
    fs::write(out_dir.join("summary.json"), json)?;
    Ok(summary)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
