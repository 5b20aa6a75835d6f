//! Caller identity taken from the `user-id` header.

use axum::extract::FromRequestParts;
use axum::http::HeaderName;
use axum::http::request::Parts;

use super::ApiError;
use crate::task::domain::UserId;

/// Header a trusted upstream sets to the authenticated caller's id.
pub static USER_ID_HEADER: HeaderName = HeaderName::from_static("user-id");

/// Caller identity extracted from the request.
///
/// A missing header, or one that is not a positive integer, rejects the
/// request with [`ApiError::Unauthenticated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity(pub UserId);

impl CallerIdentity {
    /// Parses the identity from a raw header value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] when the value is absent or not
    /// a positive integer.
    pub fn from_header(raw: Option<&str>) -> Result<Self, ApiError> {
        let Some(value) = raw else {
            tracing::info!("missing request header user-id");
            return Err(ApiError::Unauthenticated);
        };
        value.parse::<UserId>().map(Self).map_err(|err| {
            tracing::info!(error = %err, "rejected request header user-id");
            ApiError::Unauthenticated
        })
    }
}

impl<State> FromRequestParts<State> for CallerIdentity
where
    State: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &State) -> Result<Self, Self::Rejection> {
        let raw = match parts.headers.get(&USER_ID_HEADER) {
            Some(value) => Some(value.to_str().map_err(|_| ApiError::Unauthenticated)?),
            None => None,
        };
        let identity = Self::from_header(raw)?;
        tracing::debug!(user_id = %identity.0, "resolved caller identity");
        Ok(identity)
    }
}
