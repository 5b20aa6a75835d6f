//! Transport error taxonomy and its mapping to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::services::TaskServiceError;

/// Route a request was served by.
///
/// Unexpected failures fall back to a status and message chosen per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /api/v1/todo`
    List,
    /// `GET /api/v1/todo/{id}`
    Get,
    /// `POST /api/v1/todo`
    Create,
    /// `PUT /api/v1/todo/{id}`
    Update,
    /// `DELETE /api/v1/todo/{id}`
    Delete,
}

impl Endpoint {
    /// Status and message reported for unexpected failures on this route.
    #[must_use]
    pub const fn fallback(self) -> (StatusCode, &'static str) {
        match self {
            Self::List => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            Self::Get => (StatusCode::NOT_FOUND, "Not found"),
            Self::Create | Self::Update | Self::Delete => (StatusCode::BAD_REQUEST, "Bad Request"),
        }
    }

    /// Message reported when the caller owns no matching task.
    #[must_use]
    pub const fn not_found_message(self) -> &'static str {
        match self {
            Self::Delete => "Task Not Found",
            Self::List | Self::Get | Self::Create | Self::Update => "Record not found",
        }
    }
}

/// Errors returned to HTTP callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The `user-id` header is missing or malformed.
    #[error("UNAUTHORIZED")]
    Unauthenticated,

    /// The request was rejected before reaching the store.
    #[error("{0}")]
    InvalidInput(String),

    /// No matching task is owned by the caller.
    #[error("{0}")]
    NotFound(&'static str),

    /// Unexpected failure, reported with the route's fallback.
    #[error("{}", .0.fallback().1)]
    Internal(Endpoint),
}

impl ApiError {
    /// Maps a service error for the given route.
    ///
    /// Repository failures are logged with their cause and then collapse to
    /// the route's fallback.
    #[must_use]
    pub fn from_service(error: TaskServiceError, endpoint: Endpoint) -> Self {
        match error {
            TaskServiceError::Validation(reason) => Self::InvalidInput(reason.to_string()),
            TaskServiceError::NotFound(_) => Self::NotFound(endpoint.not_found_message()),
            TaskServiceError::Repository(source) => {
                tracing::error!(error = %source, endpoint = ?endpoint, "task store failure");
                Self::Internal(endpoint)
            }
        }
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(endpoint) => endpoint.fallback().0,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// Response extension carrying the error message for request logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        let mut response = (
            status,
            Json(ErrorBody {
                error: message.clone(),
            }),
        )
            .into_response();
        response.extensions_mut().insert(ErrorMessage(message));
        response
    }
}
