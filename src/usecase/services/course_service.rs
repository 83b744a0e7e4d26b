use std::sync::Arc;

use futures_util::future::join_all;
use tracing::debug;

use crate::domain::entities::course::{Course, NewCourse};
use crate::usecase::ports::api::{ApiError, CurriculumApi};
use crate::usecase::services::dataset_service::{DatasetStore, DeleteOutcome};

/// Course CRUD against the backend, keyed by course code. Mutations always
/// refresh the store; see `LecturerService`.
pub struct CourseService<A: CurriculumApi> {
    api: Arc<A>,
}

impl<A: CurriculumApi> CourseService<A> {
    pub fn new(api: Arc<A>) -> Self {
        CourseService { api }
    }

    pub async fn refresh(&self, store: &mut DatasetStore<Course>) -> Result<usize, ApiError> {
        let generation = store.begin_refresh();
        let items = self.api.list_courses().await?;
        let count = items.len();
        if !store.apply(generation, items) {
            debug!(generation, "stale course refresh dropped");
        }
        Ok(count)
    }

    pub async fn create(
        &self,
        store: &mut DatasetStore<Course>,
        course: &NewCourse,
    ) -> Result<(), ApiError> {
        self.api.create_course(course).await?;
        self.refresh(store).await?;
        Ok(())
    }

    pub async fn update(
        &self,
        store: &mut DatasetStore<Course>,
        kode: &str,
        course: &NewCourse,
    ) -> Result<(), ApiError> {
        self.api.update_course(kode, course).await?;
        self.refresh(store).await?;
        Ok(())
    }

    pub async fn delete(
        &self,
        store: &mut DatasetStore<Course>,
        kode: &str,
    ) -> Result<(), ApiError> {
        self.api.delete_course(kode).await?;
        self.refresh(store).await?;
        Ok(())
    }

    pub async fn delete_many(
        &self,
        store: &mut DatasetStore<Course>,
        kodes: &[String],
    ) -> Result<DeleteOutcome, ApiError> {
        let results = join_all(kodes.iter().map(|kode| {
            let api = self.api.clone();
            async move { (kode.clone(), api.delete_course(kode).await) }
        }))
        .await;

        let mut outcome = DeleteOutcome::default();
        for (kode, result) in results {
            match result {
                Ok(()) => outcome.deleted.push(kode),
                Err(err) => outcome.failed.push((kode, err.to_string())),
            }
        }

        self.refresh(store).await?;
        Ok(outcome)
    }
}
