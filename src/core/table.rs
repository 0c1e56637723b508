//! Shared CSV input handling. CMS publishes some files with a title line
//! above the real header row, so parsing can optionally drop the first line.

use crate::utils::error::{Result, ScoutError};
use csv::StringRecord;

pub fn parse_rows(data: &[u8], skip_title_row: bool) -> Result<(StringRecord, Vec<StringRecord>)> {
    let data = if skip_title_row {
        match data.iter().position(|&b| b == b'\n') {
            Some(i) => &data[i + 1..],
            None => &[][..],
        }
    } else {
        data
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    Ok((headers, rows))
}

/// Position of a named column, matched with trimmed header cells.
pub fn column_index(headers: &StringRecord, column: &str, path: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| ScoutError::MissingColumn {
            column: column.to_string(),
            path: path.to_string(),
        })
}
