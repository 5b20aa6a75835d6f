//! Repository port for user-scoped task persistence.

use crate::task::domain::{NewTask, Task, TaskChanges, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every lookup and mutation is scoped to the owning user. A task owned by a
/// different user is indistinguishable from a missing one.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns the stored row with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store rejects the
    /// insert.
    async fn insert(&self, task: NewTask) -> TaskRepositoryResult<Task>;

    /// Returns every task owned by `user_id`, ordered by stored state text
    /// then end date, both ascending.
    async fn list_for_user(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds the task `id` owned by `user_id`.
    ///
    /// Returns `None` when no such row exists.
    async fn find(&self, user_id: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Replaces the mutable fields of task `id` owned by `user_id`.
    ///
    /// Returns the updated row, or `None` when no row matched.
    async fn update(
        &self,
        user_id: UserId,
        id: TaskId,
        changes: TaskChanges,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Deletes task `id` owned by `user_id`.
    ///
    /// Returns `false` when no row matched.
    async fn delete(&self, user_id: UserId, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
