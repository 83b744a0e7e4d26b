pub mod course;
pub mod lecturer;

use crate::domain::entities::sheet::{RawRow, SheetData};
use crate::domain::entities::validation::ValidationResult;

pub(crate) const EMPTY_FILE_MESSAGE: &str = "File tidak berisi data";

/// One expected spreadsheet column. `required_header` gates the whole file;
/// `required_value` gates each row's cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpec {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub label: &'static str,
    pub required_header: bool,
    pub required_value: bool,
}

impl HeaderSpec {
    pub fn matches(&self, header: &str) -> bool {
        header == self.canonical || self.aliases.contains(&header)
    }
}

/// Entity-specific validation over a parsed sheet. Pure and synchronous:
/// re-runnable on every cell edit against the current dataset snapshot.
pub trait ImportRules {
    type Entity;

    fn headers(&self) -> &'static [HeaderSpec];

    fn validate(&self, sheet: &SheetData, existing: &[Self::Entity]) -> ValidationResult;
}

pub(crate) fn missing_required_headers(
    headers: &[String],
    specs: &'static [HeaderSpec],
) -> Vec<&'static str> {
    specs
        .iter()
        .filter(|spec| spec.required_header)
        .filter(|spec| !headers.iter().any(|header| spec.matches(header)))
        .map(|spec| spec.canonical)
        .collect()
}

pub(crate) fn missing_headers_message(missing: &[&'static str]) -> String {
    format!("Kolom wajib tidak ditemukan: {}", missing.join(", "))
}

/// Trimmed text of a field, resolving canonical name before aliases.
pub(crate) fn field_text(row: &RawRow, spec: &HeaderSpec) -> String {
    if let Some(cell) = row.get(spec.canonical) {
        return cell.trimmed();
    }
    for alias in spec.aliases {
        if let Some(cell) = row.get(*alias) {
            return cell.trimmed();
        }
    }
    String::new()
}
