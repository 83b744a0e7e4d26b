use std::io::Cursor;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx};

use crate::domain::entities::sheet::{normalize_header, Cell, RawRow, SheetData};

/// Parses the first worksheet of an uploaded workbook into ordered rows with
/// normalized column keys. Header-only and fully empty sheets yield an empty
/// row sequence; the validator turns that into its own summary error.
pub fn read_sheet(bytes: &[u8]) -> Result<SheetData> {
    let mut workbook =
        Xlsx::new(Cursor::new(bytes)).context("failed to open spreadsheet: not a valid xlsx file")?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("spreadsheet has no worksheets")?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(cells) => cells
            .iter()
            .map(|cell| normalize_header(&cell_to_string(cell)))
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for cells in rows_iter {
        // Every row exposes every header key; short rows pad with Empty.
        let mut row = RawRow::new();
        for (col_idx, header) in headers.iter().enumerate() {
            let cell = cells.get(col_idx).map(cell_from_data).unwrap_or(Cell::Empty);
            row.insert(header.clone(), cell);
        }
        rows.push(row);
    }

    Ok(SheetData { headers, rows })
}

fn cell_from_data(cell: &Data) -> Cell {
    match cell {
        Data::String(value) => Cell::Text(value.to_string()),
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(value) => Cell::Text(value.to_string()),
        Data::DateTimeIso(value) => Cell::Text(value.to_string()),
        Data::DurationIso(value) => Cell::Text(value.to_string()),
        Data::Error(value) => Cell::Text(format!("{value:?}")),
        Data::Empty => Cell::Empty,
    }
}

fn cell_to_string(cell: &Data) -> String {
    cell_from_data(cell).text()
}
