pub mod domain;
pub mod infra;
pub mod usecase;


pub use domain::entities::course::{Course, CourseKind, NewCourse};
pub use domain::entities::import::ImportOutcome;
pub use domain::entities::lecturer::{Lecturer, NewLecturer, StringList};
pub use domain::entities::sheet::{normalize_header, Cell, RawRow, SheetData};
pub use domain::entities::validation::{FieldError, ValidationResult};
pub use domain::rules::course::CourseRules;
pub use domain::rules::lecturer::LecturerRules;
pub use domain::rules::{HeaderSpec, ImportRules};
pub use infra::http::client::{ApiConfig, HttpApi};
pub use infra::spreadsheet::reader::read_sheet;
pub use infra::spreadsheet::writer::{course_template, lecturer_template, write_sheet};
pub use usecase::ports::api::{
    ApiError, BulkAccepted, BulkImportReply, BulkRejected, CurriculumApi, SpreadsheetUpload,
};
pub use usecase::services::course_service::CourseService;
pub use usecase::services::dataset_service::{
    DatasetStore, DeleteOutcome, ListEntity, PageQuery, PageResult,
};
pub use usecase::services::import_service::ImportService;
pub use usecase::services::lecturer_service::LecturerService;
pub use usecase::services::preview_service::{ImportPreview, PAGE_SIZE_OPTIONS};
