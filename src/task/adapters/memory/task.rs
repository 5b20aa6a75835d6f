//! In-memory repository for tests and database-free runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, Task, TaskChanges, TaskId, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are assigned from a sequence starting at 1, mirroring a
/// `BIGSERIAL` column.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Looks up a task only when it belongs to `user_id`.
fn owned_mut(
    state: &mut InMemoryTaskState,
    user_id: UserId,
    id: TaskId,
) -> Option<&mut Task> {
    state
        .tasks
        .get_mut(&id)
        .filter(|task| task.user_id() == user_id)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        state.last_id += 1;
        let stored = task.into_task(TaskId::new(state.last_id));
        state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn list_for_user(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.user_id() == user_id)
            .cloned()
            .collect();
        tasks.sort_by(|left, right| {
            left.state()
                .as_str()
                .cmp(right.state().as_str())
                .then_with(|| left.end_date().cmp(&right.end_date()))
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(tasks)
    }

    async fn find(&self, user_id: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|task| task.user_id() == user_id)
            .cloned())
    }

    async fn update(
        &self,
        user_id: UserId,
        id: TaskId,
        changes: TaskChanges,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        Ok(owned_mut(&mut state, user_id, id).map(|task| {
            task.apply(changes);
            task.clone()
        }))
    }

    async fn delete(&self, user_id: UserId, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        if owned_mut(&mut state, user_id, id).is_none() {
            return Ok(false);
        }
        Ok(state.tasks.remove(&id).is_some())
    }
}
