use crate::domain::entities::sheet::{Cell, RawRow, SheetData};
use crate::domain::entities::validation::{FieldError, ValidationResult};
use crate::domain::rules::ImportRules;

pub const PAGE_SIZE_OPTIONS: &[usize] = &[5, 10, 20, 50];
const DEFAULT_PAGE_SIZE: usize = 10;

/// Parsed rows awaiting confirmation plus their latest validation verdict.
/// Pagination is a view concern only: validation always covers the full set,
/// and every cell edit re-validates the whole set because duplicate checks
/// are cross-row.
pub struct ImportPreview<R: ImportRules> {
    rules: R,
    sheet: SheetData,
    result: ValidationResult,
    page: usize,
    page_size: usize,
}

impl<R: ImportRules> ImportPreview<R> {
    pub fn new(rules: R) -> Self {
        ImportPreview {
            rules,
            sheet: SheetData::default(),
            result: ValidationResult::default(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn load(&mut self, sheet: SheetData, existing: &[R::Entity]) -> &ValidationResult {
        self.sheet = sheet;
        self.page = 0;
        self.result = self.rules.validate(&self.sheet, existing);
        &self.result
    }

    pub fn edit_cell(
        &mut self,
        row: usize,
        field: &str,
        value: &str,
        existing: &[R::Entity],
    ) -> &ValidationResult {
        if let Some(cells) = self.sheet.rows.get_mut(row) {
            let cell = if value.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(value.to_string())
            };
            cells.insert(field.to_string(), cell);
            self.result = self.rules.validate(&self.sheet, existing);
        }
        &self.result
    }

    /// Redisplay a server-side rejection: rows come back from the 422 body,
    /// errors replace the local validation verdict.
    pub fn replace_with_failed(
        &mut self,
        rows: Vec<RawRow>,
        errors: Vec<String>,
        cell_errors: Vec<FieldError>,
    ) {
        self.sheet.rows = rows;
        self.page = 0;
        self.result = ValidationResult {
            summary_errors: errors,
            cell_errors,
        };
    }

    pub fn clear(&mut self) {
        self.sheet = SheetData::default();
        self.result = ValidationResult::default();
        self.page = 0;
    }

    pub fn sheet(&self) -> &SheetData {
        &self.sheet
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.sheet.rows
    }

    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    pub fn is_empty(&self) -> bool {
        self.sheet.rows.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.sheet.rows.len().div_ceil(self.page_size)
    }

    pub fn set_page(&mut self, page: usize) {
        let last = self.page_count().saturating_sub(1);
        self.page = page.min(last);
    }

    /// Sizes outside the fixed option set are ignored.
    pub fn set_page_size(&mut self, size: usize) {
        if PAGE_SIZE_OPTIONS.contains(&size) {
            self.page_size = size;
            self.page = 0;
        }
    }

    pub fn page_rows(&self) -> &[RawRow] {
        let start = self.page * self.page_size;
        if start >= self.sheet.rows.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.sheet.rows.len());
        &self.sheet.rows[start..end]
    }
}
