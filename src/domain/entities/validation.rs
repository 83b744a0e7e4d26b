use serde::{Deserialize, Serialize};

/// A single cell-level validation failure, addressed by parsed row index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(alias = "rowIndex", alias = "row_index")]
    pub row: usize,
    pub field: String,
    pub message: String,
    #[serde(
        default,
        alias = "naturalKey",
        skip_serializing_if = "Option::is_none"
    )]
    pub natural_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub summary_errors: Vec<String>,
    pub cell_errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.summary_errors.is_empty() && self.cell_errors.is_empty()
    }

    pub fn summary_only(message: impl Into<String>) -> Self {
        ValidationResult {
            summary_errors: vec![message.into()],
            cell_errors: Vec::new(),
        }
    }

    /// Errors a row currently carries, in emission order.
    pub fn errors_for_row(&self, row: usize) -> Vec<&FieldError> {
        self.cell_errors.iter().filter(|err| err.row == row).collect()
    }
}
