//! Request identity.
//!
//! Authentication happens upstream; by the time a request reaches this
//! service the gateway has verified the session and stamped the user id
//! onto the `x-user-id` header. This extractor only parses it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::UserId;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user, extracted from the `x-user-id` header.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError::Unauthenticated(format!("missing {USER_ID_HEADER} header"))
            })?;

        let uuid = Uuid::parse_str(raw).map_err(|e| {
            ApiError::Unauthenticated(format!("invalid {USER_ID_HEADER} header: {e}"))
        })?;

        Ok(CurrentUser(UserId::from_uuid(uuid)))
    }
}
