//! Shared router state.

use std::sync::Arc;

use mockable::Clock;

use crate::task::{ports::TaskRepository, services::TaskService};

/// State handed to every handler.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Task service shared by all requests.
    pub tasks: Arc<TaskService<R, C>>,
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Builds state around a repository and a clock.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            tasks: Arc::new(TaskService::new(repository, clock)),
        }
    }
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
        }
    }
}
