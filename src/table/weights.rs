use std::collections::HashMap;

use crate::error::StatsError;
use crate::table::{Column, Table};

fn schema_error(err: String) -> StatsError {
    StatsError::Schema { message: err }
}

/// Collapses repeated values of `column` into one row per distinct value.
///
/// Each output row is the first input row holding that value, plus a
/// `weight_column` with the number of occurrences. Rows with a null value are
/// dropped. Output order is first-occurrence order.
pub fn collapse_repeats(
    table: &Table,
    column: &str,
    weight_column: &str,
) -> Result<Table, StatsError> {
    let values = table.numeric(column)?;

    let mut first_rows: Vec<usize> = Vec::new();
    let mut counts: Vec<u64> = Vec::new();
    let mut slot_by_value: HashMap<u64, usize> = HashMap::new();

    for (row, v) in values.iter().enumerate() {
        let Some(v) = v.filter(|v| !v.is_nan()) else {
            continue;
        };
        // -0.0 and 0.0 share a slot.
        let key = if v == 0.0 { 0f64.to_bits() } else { v.to_bits() };
        let slot = *slot_by_value.entry(key).or_insert_with(|| {
            first_rows.push(row);
            counts.push(0);
            first_rows.len() - 1
        });
        counts[slot] += 1;
    }

    let weights = Column::Numeric(counts.into_iter().map(|c| Some(c as f64)).collect());
    table
        .without_column(weight_column)
        .take(&first_rows)
        .with_column(weight_column, weights)
        .map_err(schema_error)
}

/// One placeholder row for a measurement with no usable frames: context from
/// `template_row`, null in `column`, zero weight.
pub fn placeholder_row(
    table: &Table,
    template_row: usize,
    column: &str,
    weight_column: &str,
) -> Result<Table, StatsError> {
    let base = table.without_column(weight_column).take(&[template_row]);
    let mut out = Table::new();
    for name in base.column_names() {
        let col = match base.column(name)? {
            Column::Numeric(_) if name == column => Column::Numeric(vec![None]),
            other => other.clone(),
        };
        out = out.with_column(name, col).map_err(schema_error)?;
    }
    out.with_column(weight_column, Column::Numeric(vec![Some(0.0)]))
        .map_err(schema_error)
}

/// Row-wise concatenation of tables sharing one schema. Columns are matched by
/// name against the first table.
pub fn concat(tables: &[Table]) -> Result<Table, StatsError> {
    let Some(first) = tables.first() else {
        return Ok(Table::new());
    };
    let mut out = Table::new();
    for name in first.column_names() {
        let col = match first.column(name)? {
            Column::Numeric(_) => {
                let mut v = Vec::new();
                for t in tables {
                    v.extend_from_slice(t.numeric(name)?);
                }
                Column::Numeric(v)
            }
            Column::Text(_) => {
                let mut v = Vec::new();
                for t in tables {
                    v.extend_from_slice(t.text(name)?);
                }
                Column::Text(v)
            }
        };
        out = out.with_column(name, col).map_err(schema_error)?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/table/weights.rs"]
mod tests;
