//! Read-time status projection.

use super::{Task, TaskId, TaskState, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derives the status shown for a task at `now`.
///
/// Completed tasks keep their status. Otherwise a closed window reports
/// [`TaskStatus::Expired`], which wins over an open window reporting
/// [`TaskStatus::Pending`].
#[must_use]
pub fn project_status(
    state: TaskState,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> TaskStatus {
    match state {
        TaskState::Completed => TaskStatus::Completed,
        TaskState::InProgress if end_date < now => TaskStatus::Expired,
        TaskState::InProgress if start_date < now => TaskStatus::Pending,
        TaskState::InProgress => TaskStatus::InProgress,
    }
}

/// Task representation returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Owning caller.
    pub user_id: UserId,
    /// Task title.
    pub title: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Start of the task window.
    pub start_date: DateTime<Utc>,
    /// End of the task window.
    pub end_date: DateTime<Utc>,
    /// Displayed status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
}

impl TaskView {
    /// Renders a task with its status projected at `now`.
    #[must_use]
    pub fn projected(task: Task, now: DateTime<Utc>) -> Self {
        let status = project_status(task.state(), task.start_date(), task.end_date(), now);
        Self::with_status(task, status)
    }

    /// Renders a task with its stored state as status.
    #[must_use]
    pub fn stored(task: Task) -> Self {
        let status = task.state().into();
        Self::with_status(task, status)
    }

    fn with_status(task: Task, status: TaskStatus) -> Self {
        Self {
            id: task.id(),
            user_id: task.user_id(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            start_date: task.start_date(),
            end_date: task.end_date(),
            status,
            created_on: task.created_on(),
        }
    }
}
