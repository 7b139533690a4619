/// Owner identity extraction
///
/// Writes to tasks and categories must be scoped to an identified owner.
/// Transport-level authentication is owned by whatever sits in front of
/// this API; it asserts the caller's identity via the `x-user-id` header,
/// which this extractor reads and parses.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the authenticated user's id
pub const USER_ID_HEADER: &str = "x-user-id";

/// The identified owner of the request
///
/// # Rejections
///
/// - 401 if the header is missing
/// - 400 if the value is not a UUID
#[derive(Debug, Clone, Copy)]
pub struct OwnerId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("user not authenticated".to_string()))?;

        let id = Uuid::parse_str(value)
            .map_err(|_| ApiError::BadRequest("invalid user ID format".to_string()))?;

        Ok(OwnerId(id))
    }
}
