//! Diesel row models for task persistence.

use super::schema::todo_task;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todo_task)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-generated task identifier.
    pub id: i64,
    /// Owning caller.
    pub user_id: i64,
    /// Task title.
    pub title: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Start of the task window.
    pub start_date: DateTime<Utc>,
    /// End of the task window.
    pub end_date: DateTime<Utc>,
    /// Stored state text.
    pub status: String,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todo_task)]
pub struct NewTaskRow {
    /// Owning caller.
    pub user_id: i64,
    /// Task title.
    pub title: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Start of the task window.
    pub start_date: DateTime<Utc>,
    /// End of the task window.
    pub end_date: DateTime<Utc>,
    /// Stored state text.
    pub status: String,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
}

/// Full-replacement changeset for the mutable task columns.
///
/// `None` clears the description instead of leaving it untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todo_task)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangesetRow {
    /// Task title.
    pub title: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Start of the task window.
    pub start_date: DateTime<Utc>,
    /// End of the task window.
    pub end_date: DateTime<Utc>,
    /// Stored state text.
    pub status: String,
}
