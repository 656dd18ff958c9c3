use std::path::Path;

use tracing::{info, warn};

use crate::input::{InputError, is_gz, open_maybe_gz};
use crate::table::{Column, Table};

const NULL_TOKENS: [&str; 5] = ["", "nan", "none", "null", "na"];

pub fn is_null_token(cell: &str) -> bool {
    let cell = cell.trim();
    NULL_TOKENS.iter().any(|t| cell.eq_ignore_ascii_case(t))
}

/// Field separator from the file name: comma for `.csv`, otherwise tab.
pub fn delimiter_for(path: &Path) -> char {
    let name = if is_gz(path) {
        path.file_stem().map(Path::new)
    } else {
        Some(path)
    };
    match name.and_then(|n| n.extension()).and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => ',',
        _ => '\t',
    }
}

/// Loads a delimited telemetry file. A column is numeric when every non-null
/// cell parses as a real number, text otherwise.
pub fn load_table(path: &Path) -> Result<Table, InputError> {
    let delimiter = delimiter_for(path);
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();

    if reader.read_line(&mut buf)? == 0 {
        return Err(InputError::Parse {
            line: 1,
            message: "file is empty".to_string(),
        });
    }
    let header: Vec<String> = buf
        .trim_end_matches(['\r', '\n'])
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .collect();
    if header.iter().all(String::is_empty) {
        return Err(InputError::Parse {
            line: 1,
            message: "header is empty".to_string(),
        });
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); header.len()];
    let mut line_no = 1usize;
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != header.len() {
            return Err(InputError::Parse {
                line: line_no,
                message: format!("expected {} fields, found {}", header.len(), fields.len()),
            });
        }
        for (col, field) in cells.iter_mut().zip(fields) {
            col.push(field.trim().to_string());
        }
    }

    let mut table = Table::new();
    for (name, raw) in header.iter().zip(cells) {
        let column = infer_column(raw);
        table = table.with_column(name, column).map_err(|message| {
            warn!(column = %name, "rejected column");
            InputError::Parse { line: 1, message }
        })?;
    }
    info!(
        path = %path.display(),
        rows = table.n_rows(),
        columns = table.column_names().len(),
        "loaded telemetry table"
    );
    Ok(table)
}

fn infer_column(raw: Vec<String>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = raw
        .iter()
        .map(|cell| {
            if is_null_token(cell) {
                Some(None)
            } else {
                cell.parse::<f64>().ok().map(Some)
            }
        })
        .collect();
    match parsed {
        Some(values) => Column::Numeric(values),
        None => Column::Text(
            raw.into_iter()
                .map(|cell| (!is_null_token(&cell)).then_some(cell))
                .collect(),
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/delimited.rs"]
mod tests;
