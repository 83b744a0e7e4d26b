use std::sync::Arc;

use futures_util::future::join_all;
use tracing::debug;

use crate::domain::entities::lecturer::{Lecturer, NewLecturer};
use crate::usecase::ports::api::{ApiError, CurriculumApi};
use crate::usecase::services::dataset_service::{DatasetStore, DeleteOutcome};

/// Lecturer CRUD against the backend. Every mutation refreshes the store
/// before the session is considered consistent: the server may skip rows or
/// derive fields, so a local increment would drift from truth.
pub struct LecturerService<A: CurriculumApi> {
    api: Arc<A>,
}

impl<A: CurriculumApi> LecturerService<A> {
    pub fn new(api: Arc<A>) -> Self {
        LecturerService { api }
    }

    pub async fn refresh(&self, store: &mut DatasetStore<Lecturer>) -> Result<usize, ApiError> {
        let generation = store.begin_refresh();
        let items = self.api.list_lecturers().await?;
        let count = items.len();
        if !store.apply(generation, items) {
            debug!(generation, "stale lecturer refresh dropped");
        }
        Ok(count)
    }

    pub async fn create(
        &self,
        store: &mut DatasetStore<Lecturer>,
        lecturer: &NewLecturer,
    ) -> Result<(), ApiError> {
        self.api.create_lecturer(lecturer).await?;
        self.refresh(store).await?;
        Ok(())
    }

    pub async fn update(
        &self,
        store: &mut DatasetStore<Lecturer>,
        id: i64,
        lecturer: &NewLecturer,
    ) -> Result<(), ApiError> {
        self.api.update_lecturer(id, lecturer).await?;
        self.refresh(store).await?;
        Ok(())
    }

    pub async fn delete(
        &self,
        store: &mut DatasetStore<Lecturer>,
        id: i64,
    ) -> Result<(), ApiError> {
        self.api.delete_lecturer(id).await?;
        self.refresh(store).await?;
        Ok(())
    }

    /// Concurrent fan-out delete. Partial failure is expected; the outcome
    /// names each failed id instead of collapsing into one opaque error.
    pub async fn delete_many(
        &self,
        store: &mut DatasetStore<Lecturer>,
        ids: &[i64],
    ) -> Result<DeleteOutcome, ApiError> {
        let results = join_all(ids.iter().map(|id| {
            let api = self.api.clone();
            async move { (*id, api.delete_lecturer(*id).await) }
        }))
        .await;

        let mut outcome = DeleteOutcome::default();
        for (id, result) in results {
            match result {
                Ok(()) => outcome.deleted.push(id.to_string()),
                Err(err) => outcome.failed.push((id.to_string(), err.to_string())),
            }
        }

        self.refresh(store).await?;
        Ok(outcome)
    }
}
