use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::entities::course::{Course, NewCourse};
use crate::domain::entities::lecturer::{Lecturer, NewLecturer};
use crate::domain::entities::sheet::RawRow;
use crate::domain::entities::validation::FieldError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to backend failed: {0}")]
    Transport(String),
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
    #[error("failed to build spreadsheet upload: {0}")]
    Upload(String),
}

/// A serialized workbook wrapped for the multipart `file` field.
#[derive(Debug, Clone)]
pub struct SpreadsheetUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkAccepted {
    #[serde(alias = "importedCount")]
    pub imported_count: u64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkRejected {
    #[serde(default, alias = "failedRows")]
    pub failed_rows: Option<Vec<RawRow>>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default, alias = "cellErrors")]
    pub cell_errors: Vec<FieldError>,
}

/// Backend verdict on a bulk upload. `Rejected` maps HTTP 422 row-level
/// detail; transport faults and other statuses surface as `ApiError`.
#[derive(Debug, Clone)]
pub enum BulkImportReply {
    Accepted(BulkAccepted),
    Rejected(BulkRejected),
}

#[async_trait]
pub trait CurriculumApi: Send + Sync {
    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, ApiError>;
    async fn create_lecturer(&self, lecturer: &NewLecturer) -> Result<(), ApiError>;
    async fn update_lecturer(&self, id: i64, lecturer: &NewLecturer) -> Result<(), ApiError>;
    async fn delete_lecturer(&self, id: i64) -> Result<(), ApiError>;
    async fn import_lecturers(&self, upload: SpreadsheetUpload)
        -> Result<BulkImportReply, ApiError>;

    async fn list_courses(&self) -> Result<Vec<Course>, ApiError>;
    async fn create_course(&self, course: &NewCourse) -> Result<(), ApiError>;
    async fn update_course(&self, kode: &str, course: &NewCourse) -> Result<(), ApiError>;
    async fn delete_course(&self, kode: &str) -> Result<(), ApiError>;
    async fn import_courses(&self, upload: SpreadsheetUpload) -> Result<BulkImportReply, ApiError>;
}
