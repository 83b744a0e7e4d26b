use crate::domain::entities::sheet::RawRow;
use crate::domain::entities::validation::{FieldError, ValidationResult};

/// Result of one bulk-import attempt as seen by the rendering layer.
/// A commit rejected before upload and a server-side 422 both land here;
/// transport faults surface as `ApiError` instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    pub imported_count: u64,
    pub failed_rows: Option<Vec<RawRow>>,
    pub errors: Vec<String>,
    pub cell_errors: Vec<FieldError>,
}

impl ImportOutcome {
    /// Outcome for a commit stopped by the local validation guard.
    pub fn rejected_locally(result: ValidationResult) -> Self {
        ImportOutcome {
            imported_count: 0,
            failed_rows: None,
            errors: result.summary_errors,
            cell_errors: result.cell_errors,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.cell_errors.is_empty()
    }
}
