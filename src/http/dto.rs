//! Request and response bodies.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::task::domain::TaskPayload;

/// Body of `POST /api/v1/todo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title.
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    /// Optional free text.
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    /// Optional window start.
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    /// Window end.
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
}

impl From<CreateTaskRequest> for TaskPayload {
    fn from(request: CreateTaskRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            start_date: request.start_date,
            end_date: request.end_date,
            status: None,
        }
    }
}

/// Body of `PUT /api/v1/todo/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskRequest {
    /// Task title.
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    /// Optional free text; omitting it clears the stored description.
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    /// Optional window start.
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    /// Window end.
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    /// Stored state to write, `IN_PROGRESS` or `COMPLETED`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

impl From<UpdateTaskRequest> for TaskPayload {
    fn from(request: UpdateTaskRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            start_date: request.start_date,
            end_date: request.end_date,
            status: request.status,
        }
    }
}

/// Body of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    /// Confirmation text.
    pub message: String,
}

impl DeleteTaskResponse {
    /// Confirmation returned after a task is removed.
    #[must_use]
    pub fn deleted() -> Self {
        Self {
            message: "Task Deleted".to_owned(),
        }
    }
}

/// Reads a body field as text whatever its JSON type.
///
/// Non-string values keep their JSON rendering so that the validation rules
/// decide, in their usual order, which error the caller sees.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}
