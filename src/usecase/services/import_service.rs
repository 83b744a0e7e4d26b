use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::course::Course;
use crate::domain::entities::import::ImportOutcome;
use crate::domain::entities::lecturer::Lecturer;
use crate::domain::rules::course::CourseRules;
use crate::domain::rules::lecturer::LecturerRules;
use crate::domain::rules::ImportRules;
use crate::infra::spreadsheet::writer::write_sheet;
use crate::usecase::ports::api::{ApiError, BulkImportReply, CurriculumApi, SpreadsheetUpload};
use crate::usecase::services::dataset_service::DatasetStore;
use crate::usecase::services::preview_service::ImportPreview;

const LECTURER_IMPORT_FILE: &str = "import_dosen.xlsx";
const COURSE_IMPORT_FILE: &str = "import_mata_kuliah.xlsx";

/// Bulk-import committer. Re-validates as a final guard, serializes the
/// preview back to a workbook, uploads it, and reconciles preview and store
/// with the server's verdict. The caller must disable its trigger while a
/// commit is awaiting settlement.
pub struct ImportService<A: CurriculumApi> {
    api: Arc<A>,
    lecturer_rules: LecturerRules,
    course_rules: CourseRules,
}

impl<A: CurriculumApi> ImportService<A> {
    pub fn new(api: Arc<A>) -> Self {
        ImportService {
            api,
            lecturer_rules: LecturerRules::new(),
            course_rules: CourseRules::new(),
        }
    }

    pub async fn commit_lecturers(
        &self,
        preview: &mut ImportPreview<LecturerRules>,
        store: &mut DatasetStore<Lecturer>,
    ) -> Result<ImportOutcome, ApiError> {
        let verdict = self.lecturer_rules.validate(preview.sheet(), store.items());
        if !verdict.is_valid() {
            // Never submit known-invalid data.
            return Ok(ImportOutcome::rejected_locally(verdict));
        }

        let bytes =
            write_sheet(preview.sheet()).map_err(|err| ApiError::Upload(err.to_string()))?;
        let submitted = preview.rows().len() as u64;
        let reply = self
            .api
            .import_lecturers(SpreadsheetUpload {
                file_name: LECTURER_IMPORT_FILE.to_string(),
                bytes,
            })
            .await?;

        let mut outcome = self.reconcile(reply, submitted, preview);
        if let Err(err) = self.refresh_lecturers(store).await {
            warn!(error = %err, "dataset refresh after lecturer import failed");
            outcome
                .errors
                .push(format!("Pemuatan ulang data dosen gagal: {err}"));
        }
        Ok(outcome)
    }

    pub async fn commit_courses(
        &self,
        preview: &mut ImportPreview<CourseRules>,
        store: &mut DatasetStore<Course>,
    ) -> Result<ImportOutcome, ApiError> {
        let verdict = self.course_rules.validate(preview.sheet(), store.items());
        if !verdict.is_valid() {
            return Ok(ImportOutcome::rejected_locally(verdict));
        }

        let bytes =
            write_sheet(preview.sheet()).map_err(|err| ApiError::Upload(err.to_string()))?;
        let submitted = preview.rows().len() as u64;
        let reply = self
            .api
            .import_courses(SpreadsheetUpload {
                file_name: COURSE_IMPORT_FILE.to_string(),
                bytes,
            })
            .await?;

        let mut outcome = self.reconcile(reply, submitted, preview);
        if let Err(err) = self.refresh_courses(store).await {
            warn!(error = %err, "dataset refresh after course import failed");
            outcome
                .errors
                .push(format!("Pemuatan ulang data mata kuliah gagal: {err}"));
        }
        Ok(outcome)
    }

    fn reconcile<R: ImportRules>(
        &self,
        reply: BulkImportReply,
        submitted: u64,
        preview: &mut ImportPreview<R>,
    ) -> ImportOutcome {
        match reply {
            BulkImportReply::Accepted(accepted) => {
                if accepted.imported_count < submitted {
                    // Lossy by contract: the 200 body carries no per-row
                    // detail about skipped rows, so the preview clears anyway.
                    warn!(
                        imported = accepted.imported_count,
                        submitted, "bulk import accepted fewer rows than submitted"
                    );
                }
                info!(imported = accepted.imported_count, "bulk import accepted");
                preview.clear();
                ImportOutcome {
                    imported_count: accepted.imported_count,
                    failed_rows: None,
                    errors: Vec::new(),
                    cell_errors: Vec::new(),
                }
            }
            BulkImportReply::Rejected(rejected) => {
                let rows = rejected
                    .failed_rows
                    .unwrap_or_else(|| preview.rows().to_vec());
                preview.replace_with_failed(
                    rows.clone(),
                    rejected.errors.clone(),
                    rejected.cell_errors.clone(),
                );
                ImportOutcome {
                    imported_count: 0,
                    failed_rows: Some(rows),
                    errors: rejected.errors,
                    cell_errors: rejected.cell_errors,
                }
            }
        }
    }

    async fn refresh_lecturers(&self, store: &mut DatasetStore<Lecturer>) -> Result<(), ApiError> {
        let generation = store.begin_refresh();
        let items = self.api.list_lecturers().await?;
        store.apply(generation, items);
        Ok(())
    }

    async fn refresh_courses(&self, store: &mut DatasetStore<Course>) -> Result<(), ApiError> {
        let generation = store.begin_refresh();
        let items = self.api.list_courses().await?;
        store.apply(generation, items);
        Ok(())
    }
}
