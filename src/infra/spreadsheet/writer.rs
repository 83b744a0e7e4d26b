use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::domain::entities::sheet::{Cell, RawRow, SheetData};
use crate::domain::rules::course::CourseRules;
use crate::domain::rules::lecturer::LecturerRules;
use crate::domain::rules::{HeaderSpec, ImportRules};

/// Serializes parsed rows back into a single-worksheet workbook, preserving
/// the column order the file was read with.
pub fn write_sheet(sheet: &SheetData) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, header) in sheet.headers.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, header)
            .context("failed to write header cell")?;
    }

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let target_row = (row_idx + 1) as u32;
        for (col_idx, header) in sheet.headers.iter().enumerate() {
            let target_col = col_idx as u16;
            match row.get(header) {
                Some(Cell::Text(value)) => {
                    worksheet
                        .write_string(target_row, target_col, value)
                        .context("failed to write text cell")?;
                }
                Some(Cell::Number(value)) => {
                    worksheet
                        .write_number(target_row, target_col, *value)
                        .context("failed to write number cell")?;
                }
                Some(Cell::Bool(value)) => {
                    worksheet
                        .write_boolean(target_row, target_col, *value)
                        .context("failed to write boolean cell")?;
                }
                Some(Cell::Empty) | None => {}
            }
        }
    }

    workbook
        .save_to_buffer()
        .context("failed to serialize workbook")
}

/// Download template for lecturer bulk import: labeled header row plus one
/// valid example row.
pub fn lecturer_template() -> Result<Vec<u8>> {
    let rules = LecturerRules::new();
    let values = [
        "199201011",
        "0012129201",
        "Contoh Dosen",
        "contohdosen",
        "contoh.dosen@univ.ac.id",
        "081234567890",
        "rahasia123",
        "Kardiologi, Respirasi",
        "Koordinator Blok",
        "Anatomi",
    ];
    write_sheet(&template_sheet(rules.headers(), &values))
}

/// Download template for course bulk import.
pub fn course_template() -> Result<Vec<u8>> {
    let rules = CourseRules::new();
    let values = [
        "MKB101",
        "Biomedik Dasar",
        "1",
        "Reguler",
        "Blok",
        "2024",
        "2024-09-02",
        "2024-10-25",
        "1",
        "8",
    ];
    write_sheet(&template_sheet(rules.headers(), &values))
}

fn template_sheet(specs: &'static [HeaderSpec], values: &[&str]) -> SheetData {
    let headers: Vec<String> = specs.iter().map(|spec| spec.label.to_string()).collect();
    let mut row = RawRow::new();
    for (header, value) in headers.iter().zip(values) {
        row.insert(header.clone(), Cell::Text(value.to_string()));
    }
    SheetData {
        headers,
        rows: vec![row],
    }
}
