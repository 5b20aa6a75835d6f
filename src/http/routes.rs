//! Router assembly.

use axum::{Router, routing::get};
use mockable::Clock;
use tower_http::trace::TraceLayer;

use super::{
    AppState, ErrorLogLayer,
    handlers::{create_task, delete_task, get_task, list_tasks, update_task},
};
use crate::task::ports::TaskRepository;

/// Builds the task API router.
#[must_use]
pub fn create_router<R, C>(state: AppState<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/api/v1/todo",
            get(list_tasks::<R, C>).post(create_task::<R, C>),
        )
        .route(
            "/api/v1/todo/{id}",
            get(get_task::<R, C>)
                .put(update_task::<R, C>)
                .delete(delete_task::<R, C>),
        )
        .layer(ErrorLogLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
