//! Route handlers for `/api/v1/todo`.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use mockable::Clock;

use super::{
    ApiError, AppState, CallerIdentity, Endpoint,
    dto::{CreateTaskRequest, DeleteTaskResponse, UpdateTaskRequest},
};
use crate::task::{
    domain::{TaskId, TaskView},
    ports::TaskRepository,
};

/// A path id that is not an integer answers with the route's fallback.
fn parse_task_id(raw: &str, endpoint: Endpoint) -> Result<TaskId, ApiError> {
    raw.parse::<TaskId>().map_err(|err| {
        tracing::debug!(error = %err, "rejected task id in path");
        ApiError::Internal(endpoint)
    })
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))
}

/// `GET /api/v1/todo`
///
/// # Errors
///
/// Returns [`ApiError`] when the caller is unidentified or the store fails.
pub async fn list_tasks<R, C>(
    State(state): State<AppState<R, C>>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<Json<Vec<TaskView>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    tracing::debug!(user_id = %user_id, "listing tasks");
    let tasks = state
        .tasks
        .list(user_id)
        .await
        .map_err(|err| ApiError::from_service(err, Endpoint::List))?;
    Ok(Json(tasks))
}

/// `GET /api/v1/todo/{id}`
///
/// # Errors
///
/// Returns [`ApiError`] when the caller is unidentified, the id is malformed
/// or the caller owns no such task.
pub async fn get_task<R, C>(
    State(state): State<AppState<R, C>>,
    CallerIdentity(user_id): CallerIdentity,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskView>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&raw_id, Endpoint::Get)?;
    tracing::debug!(user_id = %user_id, task_id = %id, "fetching task");
    let task = state
        .tasks
        .get(user_id, id)
        .await
        .map_err(|err| ApiError::from_service(err, Endpoint::Get))?;
    Ok(Json(task))
}

/// `POST /api/v1/todo`
///
/// # Errors
///
/// Returns [`ApiError`] when the caller is unidentified or the body is
/// rejected.
pub async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    CallerIdentity(user_id): CallerIdentity,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskView>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = body(payload)?;
    tracing::debug!(user_id = %user_id, "creating task");
    let task = state
        .tasks
        .create(user_id, request.into())
        .await
        .map_err(|err| ApiError::from_service(err, Endpoint::Create))?;
    Ok(Json(task))
}

/// `PUT /api/v1/todo/{id}`
///
/// # Errors
///
/// Returns [`ApiError`] when the caller is unidentified, the id or body is
/// rejected, or the caller owns no such task.
pub async fn update_task<R, C>(
    State(state): State<AppState<R, C>>,
    CallerIdentity(user_id): CallerIdentity,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskView>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&raw_id, Endpoint::Update)?;
    let request = body(payload)?;
    tracing::debug!(user_id = %user_id, task_id = %id, "updating task");
    let task = state
        .tasks
        .update(user_id, id, request.into())
        .await
        .map_err(|err| ApiError::from_service(err, Endpoint::Update))?;
    Ok(Json(task))
}

/// `DELETE /api/v1/todo/{id}`
///
/// # Errors
///
/// Returns [`ApiError`] when the caller is unidentified, the id is malformed
/// or the caller owns no such task.
pub async fn delete_task<R, C>(
    State(state): State<AppState<R, C>>,
    CallerIdentity(user_id): CallerIdentity,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteTaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&raw_id, Endpoint::Delete)?;
    tracing::debug!(user_id = %user_id, task_id = %id, "deleting task");
    state
        .tasks
        .delete(user_id, id)
        .await
        .map_err(|err| ApiError::from_service(err, Endpoint::Delete))?;
    Ok(Json(DeleteTaskResponse::deleted()))
}
