use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::{ColumnNames, SheetConfig, Weighting};
use crate::error::StatsError;
use crate::table::weights::{collapse_repeats, concat, placeholder_row};
use crate::table::{Column, Table};

/// Tables a sheet reads from. Collapsed weighting yields one table per metric
/// column because every column collapses to its own set of unique values.
#[derive(Debug, Clone)]
pub enum TableSource {
    Shared(Table),
    PerColumn(Vec<(String, Table)>),
}

impl TableSource {
    pub fn table_for(&self, column: &str) -> Result<&Table, StatsError> {
        match self {
            TableSource::Shared(table) => Ok(table),
            TableSource::PerColumn(tables) => tables
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, table)| table)
                .ok_or_else(|| StatsError::missing(column)),
        }
    }
}

/// Distinct statistic columns of a sheet in first-use order.
pub fn sheet_columns(sheet: &SheetConfig) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for param in &sheet.params {
        for column in sheet.stat_columns(param) {
            if !out.iter().any(|c| c == column) {
                out.push(column.to_string());
            }
        }
    }
    out
}

/// Drops frames whose camera height is exactly zero. Tables without that
/// column pass through unchanged.
pub fn drop_bad_frames(table: &Table, columns: &ColumnNames) -> Result<Table, StatsError> {
    if !table.has_column(&columns.cam_height) {
        return Ok(table.clone());
    }
    let heights = table.numeric(&columns.cam_height)?;
    let keep = heights.iter().map(|h| *h != Some(0.0)).collect::<Vec<_>>();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        debug!(dropped, column = %columns.cam_height, "dropped zero camera height frames");
    }
    Ok(table.filter(&keep))
}

pub fn prepare(
    table: &Table,
    sheet: &SheetConfig,
    columns: &ColumnNames,
) -> Result<TableSource, StatsError> {
    let table = drop_bad_frames(table, columns)?;
    match sheet.weighting {
        Weighting::Precomputed => Ok(TableSource::Shared(table)),
        Weighting::Collapse => {
            let mut tables = Vec::new();
            for column in sheet_columns(sheet) {
                let collapsed = collapse_column(&table, &column, sheet.state_filter, columns)?;
                debug!(
                    sheet = %sheet.name,
                    column = %column,
                    frames = table.n_rows(),
                    rows = collapsed.n_rows(),
                    "collapsed frames into weighted rows"
                );
                tables.push((column, collapsed));
            }
            Ok(TableSource::PerColumn(tables))
        }
    }
}

/// Collapses `column` separately within each measurement group.
pub fn collapse_column(
    table: &Table,
    column: &str,
    state_filter: Option<f64>,
    columns: &ColumnNames,
) -> Result<Table, StatsError> {
    let groups = group_rows(table, &columns.log)?;
    let mut parts = Vec::with_capacity(groups.len());

    for (group, rows) in groups {
        let frames = table.take(&rows);
        let frames = match state_filter {
            Some(state) => frames.filter(&frames.numeric_eq_mask(&columns.state, state)?),
            None => frames,
        };

        let collapsed = collapse_repeats(&frames, column, &columns.weight)?;
        if collapsed.is_empty() {
            if state_filter.is_some() {
                warn!(
                    log = %group,
                    column,
                    state = ?state_filter,
                    "no frames in requested calibration state"
                );
            }
            parts.push(placeholder_row(table, rows[0], column, &columns.weight)?);
        } else {
            parts.push(collapsed);
        }
    }

    if parts.is_empty() {
        let empty = table.without_column(&columns.weight).empty_like();
        return empty
            .with_column(&columns.weight, Column::Numeric(Vec::new()))
            .map_err(|message| StatsError::Schema { message });
    }
    concat(&parts)
}

/// Row indices per distinct value of the group column, in first-seen order.
/// Without the column the whole table is one group.
fn group_rows(table: &Table, log_column: &str) -> Result<Vec<(String, Vec<usize>)>, StatsError> {
    if table.is_empty() {
        return Ok(Vec::new());
    }
    if !table.has_column(log_column) {
        return Ok(vec![(String::new(), (0..table.n_rows()).collect())]);
    }

    let keys: Vec<String> = match table.column(log_column)? {
        Column::Text(v) => v.iter().map(|s| s.clone().unwrap_or_default()).collect(),
        Column::Numeric(v) => v
            .iter()
            .map(|n| n.map(|n| n.to_string()).unwrap_or_default())
            .collect(),
    };

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (row, key) in keys.into_iter().enumerate() {
        match slots.get(&key) {
            Some(&slot) => groups[slot].1.push(row),
            None => {
                slots.insert(key.clone(), groups.len());
                groups.push((key, vec![row]));
            }
        }
    }
    Ok(groups)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_prepare.rs"]
mod tests;
