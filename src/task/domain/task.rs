//! Task entity and the write models derived from validated payloads.

use super::{TaskId, TaskState, UserId, ValidatedTask};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    user_id: UserId,
    title: String,
    description: Option<String>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    state: TaskState,
    created_on: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-generated identifier.
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
    /// Stored state.
    pub state: TaskState,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            start_date: data.start_date,
            end_date: data.end_date,
            state: data.state,
            created_on: data.created_on,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning caller.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the start of the task window.
    #[must_use]
    pub const fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// Returns the end of the task window.
    #[must_use]
    pub const fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    /// Returns the stored state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    /// Applies an update in place, keeping identity, owner and creation time.
    pub fn apply(&mut self, changes: TaskChanges) {
        self.title = changes.title;
        self.description = changes.description;
        self.start_date = changes.start_date;
        self.end_date = changes.end_date;
        self.state = changes.state;
    }
}

/// A task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
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
    /// Initial state, always [`TaskState::InProgress`].
    pub state: TaskState,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
}

impl NewTask {
    /// Builds the insert model for a validated create payload.
    ///
    /// The state is forced to in progress, a missing start date becomes
    /// `now`, and `created_on` is stamped with `now`.
    #[must_use]
    pub fn from_validated(user_id: UserId, task: ValidatedTask, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            title: task.title,
            description: task.description,
            start_date: task.start_date.unwrap_or(now),
            end_date: task.end_date,
            state: TaskState::InProgress,
            created_on: now,
        }
    }

    /// Attaches the store-generated identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task::from_persisted(PersistedTaskData {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            state: self.state,
            created_on: self.created_on,
        })
    }
}

/// Full replacement of the mutable task fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: String,
    /// New description; `None` clears it.
    pub description: Option<String>,
    /// New start of the task window.
    pub start_date: DateTime<Utc>,
    /// New end of the task window.
    pub end_date: DateTime<Utc>,
    /// New stored state, as supplied by the caller.
    pub state: TaskState,
}

impl TaskChanges {
    /// Builds the update model for a validated update payload.
    #[must_use]
    pub fn from_validated(task: ValidatedTask, state: TaskState, now: DateTime<Utc>) -> Self {
        Self {
            title: task.title,
            description: task.description,
            start_date: task.start_date.unwrap_or(now),
            end_date: task.end_date,
            state,
        }
    }
}
