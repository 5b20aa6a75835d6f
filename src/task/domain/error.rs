//! Error types for task payload validation and parsing.

use thiserror::Error;

/// Reasons a create or update payload is rejected.
///
/// The display text of each variant is the message reported to callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `end_date` is absent or not a recognisable date-time.
    #[error("Invalid date format for end_date")]
    InvalidEndDate,

    /// `start_date` is present but not a recognisable date-time.
    #[error("Invalid date format for start_date")]
    InvalidStartDate,

    /// `title` is absent or empty.
    #[error("end_date && title must not be null")]
    MissingRequiredField,

    /// `end_date` lies before the current time.
    #[error("now > end_date is not allowed")]
    EndDateInPast,

    /// `start_date` lies after `end_date`.
    #[error("start_date > end_date is not allowed")]
    StartAfterEnd,

    /// An update omitted `status`.
    #[error("status must not be null")]
    MissingStatus,

    /// An update supplied a status that cannot be stored.
    #[error("status must be one of IN_PROGRESS, COMPLETED")]
    UnsupportedStatus(String),
}

/// Errors returned while parsing caller or path identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentifierError {
    /// The caller identity is not a positive integer.
    #[error("invalid user id '{0}', expected a positive integer")]
    InvalidUserId(String),

    /// The task identifier is not an integer.
    #[error("invalid task id '{0}', expected an integer")]
    InvalidTaskId(String),
}

/// Error returned while parsing stored task states.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);
