use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SinkError;
use crate::model::results::StatResult;
use crate::report::{ReportSink, layout_block};

/// Spreadsheet-like sink. Cells are kept in memory by row; when backed by a
/// file the whole sheet is rewritten as TSV after every block.
#[derive(Debug, Clone)]
pub struct SheetSink {
    name: String,
    path: Option<PathBuf>,
    rows: BTreeMap<usize, Vec<String>>,
}

impl SheetSink {
    pub fn in_memory(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: None,
            rows: BTreeMap::new(),
        }
    }

    pub fn create(out_dir: &Path, name: &str) -> Result<Self, SinkError> {
        fs::create_dir_all(out_dir)?;
        let sink = Self {
            name: name.to_string(),
            path: Some(out_dir.join(format!("{}.tsv", file_stem(name)))),
            rows: BTreeMap::new(),
        };
        sink.flush()?;
        Ok(sink)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn row(&self, idx: usize) -> Option<&[String]> {
        self.rows.get(&idx).map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(&row)?.get(col).map(String::as_str)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.keys().next_back().map(|r| r + 1).unwrap_or(0)
    }

    /// Whole sheet as TSV. Unwritten rows are empty lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for idx in 0..self.n_rows() {
            if let Some(cells) = self.rows.get(&idx) {
                out.push_str(&cells.join("\t"));
            }
            out.push('\n');
        }
        out
    }

    fn flush(&self) -> Result<(), SinkError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(self.render().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl ReportSink for SheetSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(
        &mut self,
        result: &StatResult,
        start_row: usize,
        column_titles: Option<&[String]>,
        row_label: Option<&str>,
    ) -> Result<usize, SinkError> {
        let block = layout_block(result, column_titles, row_label)?;
        let next_row = start_row + block.len();
        for (offset, cells) in block.into_iter().enumerate() {
            self.rows.insert(start_row + offset, cells);
        }
        self.flush()?;
        debug!(sheet = %self.name, start_row, next_row, "wrote block");
        Ok(next_row)
    }
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/sheet.rs"]
mod tests;
