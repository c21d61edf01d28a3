//! Caller identity extraction.
//!
//! Every authenticated call carries the caller's user id in the
//! `X-Sharer-User-Id` header. The value is trusted as-is; the services
//! only use it for coarse authorization checks.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::error::ApiError;
use super::validation::validate_uuid;

pub const X_SHARER_USER_ID: &str = "X-Sharer-User-Id";

/// The id of the user making the request.
#[derive(Debug, Clone)]
pub struct SharerId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(X_SHARER_USER_ID)
            .ok_or_else(|| {
                ApiError::bad_request(format!("{} header is required", X_SHARER_USER_ID))
            })?
            .to_str()
            .map_err(|_| {
                ApiError::bad_request(format!("{} header is not valid UTF-8", X_SHARER_USER_ID))
            })?
            .to_string();

        validate_uuid(&value, X_SHARER_USER_ID)
            .map_err(|e| ApiError::validation_field(X_SHARER_USER_ID, e))?;

        Ok(Self(value))
    }
}
