//! Domain model for user-owned tasks.
//!
//! The domain holds the two pieces of real decision-making in the service:
//! payload validation and read-time status projection. Both are pure
//! functions of their inputs and an explicit "now".

mod error;
mod ids;
mod projection;
mod status;
mod task;
mod validation;

pub use error::{IdentifierError, ParseTaskStateError, TaskValidationError};
pub use ids::{TaskId, UserId};
pub use projection::{TaskView, project_status};
pub use status::{TaskState, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
pub use validation::{TaskPayload, ValidatedTask, parse_timestamp, validate, validate_update};
