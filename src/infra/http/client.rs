use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::domain::entities::course::{Course, NewCourse};
use crate::domain::entities::lecturer::{Lecturer, NewLecturer};
use crate::domain::entities::sheet::RawRow;
use crate::domain::entities::validation::FieldError;
use crate::usecase::ports::api::{
    ApiError, BulkAccepted, BulkImportReply, BulkRejected, CurriculumApi, SpreadsheetUpload,
};

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const BASE_URL_ENV: &str = "KURIKULUM_API_URL";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        ApiConfig {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// The reqwest adapter for the backend port. Paths are the backend's
/// published contract and must stay byte-identical for interop.
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(HttpApi {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let response = expect_success(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::UnexpectedShape(err.to_string()))
    }

    async fn import(&self, path: &str, upload: SpreadsheetUpload) -> Result<Response, ApiError> {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(XLSX_MIME)
            .map_err(|err| ApiError::Upload(err.to_string()))?;
        let form = Form::new().part("file", part);
        self.client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))
    }
}

async fn expect_success(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    Err(status_error(response).await)
}

/// Builds the status error, preferring the server's own `message` field over
/// raw body text.
async fn status_error(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServerMessage>(&body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or(body);
    ApiError::Status { status, message }
}

#[derive(Debug, Deserialize)]
struct ServerMessage {
    #[serde(default)]
    message: Option<String>,
}

// Course import replies wrap the counters behind a success flag.
#[derive(Debug, Deserialize)]
struct CourseImportBody {
    #[serde(default)]
    success: bool,
    #[serde(default, alias = "importedCount")]
    imported_count: u64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "failedRows")]
    failed_rows: Option<Vec<RawRow>>,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default, alias = "cellErrors")]
    cell_errors: Vec<FieldError>,
}

#[async_trait]
impl CurriculumApi for HttpApi {
    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, ApiError> {
        debug!("fetching lecturer collection");
        self.get_json("/users?role=dosen").await
    }

    async fn create_lecturer(&self, lecturer: &NewLecturer) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/users"))
            .json(lecturer)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        expect_success(response).await?;
        Ok(())
    }

    async fn update_lecturer(&self, id: i64, lecturer: &NewLecturer) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.url(&format!("/users/{id}")))
            .json(lecturer)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        expect_success(response).await?;
        Ok(())
    }

    async fn delete_lecturer(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/users/{id}")))
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        expect_success(response).await?;
        Ok(())
    }

    async fn import_lecturers(
        &self,
        upload: SpreadsheetUpload,
    ) -> Result<BulkImportReply, ApiError> {
        debug!(file = %upload.file_name, "uploading lecturer import");
        let response = self.import("/users/import-dosen", upload).await?;
        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let rejected: BulkRejected = response
                .json()
                .await
                .map_err(|err| ApiError::UnexpectedShape(err.to_string()))?;
            return Ok(BulkImportReply::Rejected(rejected));
        }
        if status.is_success() {
            let accepted: BulkAccepted = response
                .json()
                .await
                .map_err(|err| ApiError::UnexpectedShape(err.to_string()))?;
            return Ok(BulkImportReply::Accepted(accepted));
        }
        Err(status_error(response).await)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        debug!("fetching course collection");
        self.get_json("/mata-kuliah").await
    }

    async fn create_course(&self, course: &NewCourse) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/mata-kuliah"))
            .json(course)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        expect_success(response).await?;
        Ok(())
    }

    async fn update_course(&self, kode: &str, course: &NewCourse) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.url(&format!("/mata-kuliah/{kode}")))
            .json(course)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        expect_success(response).await?;
        Ok(())
    }

    async fn delete_course(&self, kode: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/mata-kuliah/{kode}")))
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        expect_success(response).await?;
        Ok(())
    }

    async fn import_courses(&self, upload: SpreadsheetUpload) -> Result<BulkImportReply, ApiError> {
        debug!(file = %upload.file_name, "uploading course import");
        let response = self.import("/mata-kuliah/import", upload).await?;
        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY || status.is_success() {
            let body: CourseImportBody = response
                .json()
                .await
                .map_err(|err| ApiError::UnexpectedShape(err.to_string()))?;
            if status.is_success() && body.success {
                return Ok(BulkImportReply::Accepted(BulkAccepted {
                    imported_count: body.imported_count,
                    message: body.message,
                }));
            }
            let mut errors = body.errors;
            if let Some(message) = body.message {
                if errors.is_empty() {
                    errors.push(message);
                }
            }
            return Ok(BulkImportReply::Rejected(BulkRejected {
                failed_rows: body.failed_rows,
                errors,
                cell_errors: body.cell_errors,
            }));
        }
        Err(status_error(response).await)
    }
}
