pub mod course_service;
pub mod dataset_service;
pub mod import_service;
pub mod lecturer_service;
pub mod preview_service;
