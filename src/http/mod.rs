//! HTTP transport for the task API.
//!
//! Handlers resolve the caller from the `user-id` header, delegate to
//! [`TaskService`](crate::task::services::TaskService) and map failures onto
//! [`ApiError`].

pub mod dto;
mod error;
pub mod handlers;
mod identity;
mod logging;
mod routes;
mod state;

pub use error::{ApiError, Endpoint, ErrorBody, ErrorMessage};
pub use identity::{CallerIdentity, USER_ID_HEADER};
pub use logging::{ErrorLogLayer, ErrorLogService};
pub use routes::create_router;
pub use state::AppState;
