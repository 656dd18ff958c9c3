pub mod json;
pub mod sheet;

use crate::error::SinkError;
use crate::model::results::StatResult;

/// Positional report writer. A write lays one result block out starting at
/// `start_row` and returns the first row after it.
pub trait ReportSink {
    fn name(&self) -> &str;

    fn write(
        &mut self,
        result: &StatResult,
        start_row: usize,
        column_titles: Option<&[String]>,
        row_label: Option<&str>,
    ) -> Result<usize, SinkError>;
}

/// Header titles for a block: the given titles, else the first row's keys.
pub fn block_titles(
    result: &StatResult,
    column_titles: Option<&[String]>,
) -> Result<Vec<String>, SinkError> {
    if let Some(titles) = column_titles {
        return Ok(titles.to_vec());
    }
    let (_, first) = result.iter().next().ok_or_else(|| SinkError::ShapeMismatch {
        reason: "result has no conditions".to_string(),
    })?;
    Ok(first.titles().map(str::to_string).collect())
}

/// Rendered rows of a block, header first. Fails without producing anything
/// when a condition row lacks one of the header titles.
pub fn layout_block(
    result: &StatResult,
    column_titles: Option<&[String]>,
    row_label: Option<&str>,
) -> Result<Vec<Vec<String>>, SinkError> {
    if result.is_empty() {
        return Err(SinkError::ShapeMismatch {
            reason: "result has no conditions".to_string(),
        });
    }
    let titles = block_titles(result, column_titles)?;

    let mut rows = Vec::with_capacity(result.len() + 1);
    let mut header = Vec::with_capacity(titles.len() + 1);
    header.push(row_label.unwrap_or_default().to_string());
    header.extend(titles.iter().cloned());
    rows.push(header);

    for (condition, stat_row) in result.iter() {
        let mut line = Vec::with_capacity(titles.len() + 1);
        line.push(condition.to_string());
        for title in &titles {
            let value = stat_row.get(title).ok_or_else(|| SinkError::ShapeMismatch {
                reason: format!("condition {condition} has no value for {title}"),
            })?;
            line.push(value.render());
        }
        rows.push(line);
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
