//! Service layer for user-scoped task operations.

use crate::task::{
    domain::{
        NewTask, TaskChanges, TaskId, TaskPayload, TaskValidationError, TaskView, UserId,
        validate, validate_update,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The payload was rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// No task with this id is owned by the caller.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Validates writes, scopes every operation to the caller and projects the
/// status of rows read back from the store.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Lists the caller's tasks with projected statuses.
    ///
    /// Rows keep the store's ordering, which is computed on the stored state
    /// before projection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, user_id: UserId) -> TaskServiceResult<Vec<TaskView>> {
        let tasks = self.repository.list_for_user(user_id).await?;
        let now = self.clock.utc();
        Ok(tasks
            .into_iter()
            .map(|task| TaskView::projected(task, now))
            .collect())
    }

    /// Fetches one of the caller's tasks with its projected status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the caller owns no task
    /// with this id, or [`TaskServiceError::Repository`] when the lookup
    /// fails.
    pub async fn get(&self, user_id: UserId, id: TaskId) -> TaskServiceResult<TaskView> {
        let task = self
            .repository
            .find(user_id, id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        Ok(TaskView::projected(task, self.clock.utc()))
    }

    /// Creates a task for the caller.
    ///
    /// The response carries the stored row as written, without projection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the payload is rejected,
    /// or [`TaskServiceError::Repository`] when the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        payload: TaskPayload,
    ) -> TaskServiceResult<TaskView> {
        let now = self.clock.utc();
        let validated = validate(payload, now)?;
        let stored = self
            .repository
            .insert(NewTask::from_validated(user_id, validated, now))
            .await?;
        tracing::debug!(user_id = %user_id, task_id = %stored.id(), "task created");
        Ok(TaskView::stored(stored))
    }

    /// Replaces the mutable fields of one of the caller's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the payload or status is
    /// rejected, [`TaskServiceError::NotFound`] when the caller owns no task
    /// with this id, or [`TaskServiceError::Repository`] when the update
    /// fails.
    pub async fn update(
        &self,
        user_id: UserId,
        id: TaskId,
        payload: TaskPayload,
    ) -> TaskServiceResult<TaskView> {
        let now = self.clock.utc();
        let (validated, state) = validate_update(payload, now)?;
        let changes = TaskChanges::from_validated(validated, state, now);
        let updated = self
            .repository
            .update(user_id, id, changes)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        tracing::debug!(user_id = %user_id, task_id = %id, state = %state, "task updated");
        Ok(TaskView::projected(updated, self.clock.utc()))
    }

    /// Deletes one of the caller's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the caller owns no task
    /// with this id, or [`TaskServiceError::Repository`] when the delete
    /// fails.
    pub async fn delete(&self, user_id: UserId, id: TaskId) -> TaskServiceResult<()> {
        if !self.repository.delete(user_id, id).await? {
            return Err(TaskServiceError::NotFound(id));
        }
        tracing::debug!(user_id = %user_id, task_id = %id, "task deleted");
        Ok(())
    }
}
