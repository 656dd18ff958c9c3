pub mod weights;

use crate::error::StatsError;

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn select(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(v) => Column::Numeric(rows.iter().map(|&r| v[r]).collect()),
            Column::Text(v) => Column::Text(rows.iter().map(|&r| v[r].clone()).collect()),
        }
    }

    fn empty_like(&self) -> Column {
        match self {
            Column::Numeric(_) => Column::Numeric(Vec::new()),
            Column::Text(_) => Column::Text(Vec::new()),
        }
    }
}

/// Immutable column-oriented table. Every filter returns a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. The first column fixes the row count; later columns
    /// must match it.
    pub fn with_column(mut self, name: &str, column: Column) -> Result<Self, String> {
        if self.names.iter().any(|n| n == name) {
            return Err(format!("duplicate column: {name}"));
        }
        if !self.columns.is_empty() && column.len() != self.n_rows {
            return Err(format!(
                "column {name} has {} rows, expected {}",
                column.len(),
                self.n_rows
            ));
        }
        self.n_rows = column.len();
        self.names.push(name.to_string());
        self.columns.push(column);
        Ok(self)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column, StatsError> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| StatsError::missing(name))
    }

    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>], StatsError> {
        match self.column(name)? {
            Column::Numeric(v) => Ok(v),
            Column::Text(_) => Err(StatsError::ColumnType {
                column: name.to_string(),
                expected: "numeric",
            }),
        }
    }

    pub fn text(&self, name: &str) -> Result<&[Option<String>], StatsError> {
        match self.column(name)? {
            Column::Text(v) => Ok(v),
            Column::Numeric(_) => Err(StatsError::ColumnType {
                column: name.to_string(),
                expected: "text",
            }),
        }
    }

    pub fn filter(&self, mask: &[bool]) -> Table {
        let rows = mask
            .iter()
            .enumerate()
            .filter_map(|(idx, &keep)| keep.then_some(idx))
            .collect::<Vec<_>>();
        self.take(&rows)
    }

    /// New table holding `rows` in the given order.
    pub fn take(&self, rows: &[usize]) -> Table {
        Table {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.select(rows)).collect(),
            n_rows: rows.len(),
        }
    }

    /// Same schema, zero rows.
    pub fn empty_like(&self) -> Table {
        Table {
            names: self.names.clone(),
            columns: self.columns.iter().map(Column::empty_like).collect(),
            n_rows: 0,
        }
    }

    pub fn without_column(&self, name: &str) -> Table {
        let (names, columns) = self
            .names
            .iter()
            .zip(&self.columns)
            .filter(|(n, _)| n.as_str() != name)
            .map(|(n, c)| (n.clone(), c.clone()))
            .unzip();
        Table {
            names,
            columns,
            n_rows: self.n_rows,
        }
    }

    pub fn text_eq_mask(&self, name: &str, value: &str) -> Result<Vec<bool>, StatsError> {
        Ok(self
            .text(name)?
            .iter()
            .map(|v| v.as_deref() == Some(value))
            .collect())
    }

    pub fn numeric_eq_mask(&self, name: &str, value: f64) -> Result<Vec<bool>, StatsError> {
        Ok(self
            .numeric(name)?
            .iter()
            .map(|v| *v == Some(value))
            .collect())
    }
}

pub fn and_masks(acc: &mut [bool], other: &[bool]) {
    for (a, b) in acc.iter_mut().zip(other) {
        *a = *a && *b;
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/table/mod.rs"]
mod tests;
