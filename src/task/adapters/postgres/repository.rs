//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangesetRow, TaskRow},
    schema::todo_task,
};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskChanges, TaskId, TaskState, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Opens a bounded connection pool for `connection_string`.
///
/// The string may be a `postgres://` URL or a libpq key/value list.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be established.
pub fn build_pool(connection_string: &str, max_size: u32) -> Result<TaskPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(connection_string);
    Pool::builder().max_size(max_size).build(manager)
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(todo_task::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn list_for_user(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = todo_task::table
                .filter(todo_task::user_id.eq(user_id.value()))
                .order((todo_task::status.asc(), todo_task::end_date.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find(&self, user_id: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = todo_task::table
                .filter(todo_task::user_id.eq(user_id.value()))
                .filter(todo_task::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update(
        &self,
        user_id: UserId,
        id: TaskId,
        changes: TaskChanges,
    ) -> TaskRepositoryResult<Option<Task>> {
        let changeset = to_changeset(changes);
        self.run_blocking(move |connection| {
            let scoped = todo_task::table
                .filter(todo_task::user_id.eq(user_id.value()))
                .filter(todo_task::id.eq(id.value()));
            let row = diesel::update(scoped)
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, user_id: UserId, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let scoped = todo_task::table
                .filter(todo_task::user_id.eq(user_id.value()))
                .filter(todo_task::id.eq(id.value()));
            let deleted = diesel::delete(scoped)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn to_new_row(task: NewTask) -> NewTaskRow {
    NewTaskRow {
        user_id: task.user_id.value(),
        title: task.title,
        description: task.description,
        start_date: task.start_date,
        end_date: task.end_date,
        status: task.state.as_str().to_owned(),
        created_on: task.created_on,
    }
}

fn to_changeset(changes: TaskChanges) -> TaskChangesetRow {
    TaskChangesetRow {
        title: changes.title,
        description: changes.description,
        start_date: changes.start_date,
        end_date: changes.end_date,
        status: changes.state.as_str().to_owned(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        user_id,
        title,
        description,
        start_date,
        end_date,
        status,
        created_on,
    } = row;

    let state = TaskState::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let owner = UserId::new(user_id).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        user_id: owner,
        title,
        description,
        start_date,
        end_date,
        state,
        created_on,
    }))
}
