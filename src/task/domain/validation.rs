//! Structural and temporal validation of task payloads.
//!
//! Validation is a pure function of the payload and the caller-supplied
//! current time. Rules run in a fixed order and the first failing rule is the
//! only one reported.

use super::{TaskState, TaskValidationError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive date-time layouts accepted in addition to RFC 3339. Read as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Unvalidated create or update payload as received from a caller.
///
/// Dates are kept as raw text so that format errors can be reported with the
/// rule-specific message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPayload {
    /// Requested title.
    pub title: Option<String>,
    /// Requested description.
    pub description: Option<String>,
    /// Requested window start, raw.
    pub start_date: Option<String>,
    /// Requested window end, raw.
    pub end_date: Option<String>,
    /// Requested stored state, raw. Only read by updates.
    pub status: Option<String>,
}

impl TaskPayload {
    /// Creates a payload with a title and end date.
    #[must_use]
    pub fn new(title: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
            start_date: None,
            end_date: Some(end_date.into()),
            status: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the start date.
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Sets the requested status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Payload that passed validation, with parsed timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTask {
    /// Non-empty title.
    pub title: String,
    /// Optional description, passed through unchanged.
    pub description: Option<String>,
    /// Parsed start date, `None` when the caller omitted it.
    pub start_date: Option<DateTime<Utc>>,
    /// Parsed end date, not before the validation time.
    pub end_date: DateTime<Utc>,
}

/// Validates a create or update payload against `now`.
///
/// `status` is ignored; see [`validate_update`].
///
/// # Errors
///
/// Returns the [`TaskValidationError`] of the first rule that fails, checked
/// in this order: end date format, start date format, required fields, end
/// date not in the past, start date not after end date.
pub fn validate(
    payload: TaskPayload,
    now: DateTime<Utc>,
) -> Result<ValidatedTask, TaskValidationError> {
    let TaskPayload {
        title,
        description,
        start_date,
        end_date,
        ..
    } = payload;

    let end = end_date
        .as_deref()
        .and_then(parse_timestamp)
        .ok_or(TaskValidationError::InvalidEndDate)?;

    // An empty start date counts as absent.
    let start = match start_date.as_deref().filter(|raw| !raw.is_empty()) {
        Some(raw) => Some(parse_timestamp(raw).ok_or(TaskValidationError::InvalidStartDate)?),
        None => None,
    };

    let title = title
        .filter(|text| !text.is_empty())
        .ok_or(TaskValidationError::MissingRequiredField)?;

    if end < now {
        return Err(TaskValidationError::EndDateInPast);
    }

    if start.is_some_and(|start| start > end) {
        return Err(TaskValidationError::StartAfterEnd);
    }

    Ok(ValidatedTask {
        title,
        description,
        start_date: start,
        end_date: end,
    })
}

/// Validates an update payload, including its caller-supplied status.
///
/// The status check only runs once [`validate`] has accepted the rest of the
/// payload.
///
/// # Errors
///
/// Returns any [`validate`] error, then
/// [`TaskValidationError::MissingStatus`] when `status` is absent or empty and
/// [`TaskValidationError::UnsupportedStatus`] when it names a state that
/// cannot be stored.
pub fn validate_update(
    mut payload: TaskPayload,
    now: DateTime<Utc>,
) -> Result<(ValidatedTask, TaskState), TaskValidationError> {
    let status = payload.status.take();
    let task = validate(payload, now)?;
    let raw_status = status
        .filter(|raw| !raw.is_empty())
        .ok_or(TaskValidationError::MissingStatus)?;
    let state = TaskState::try_from(raw_status.as_str())
        .map_err(|_| TaskValidationError::UnsupportedStatus(raw_status.clone()))?;
    Ok((task, state))
}

/// Parses a caller-supplied date-time.
///
/// Accepts RFC 3339 timestamps, naive date-times (read as UTC) and bare dates
/// (midnight UTC). Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
