//! HTTP route handlers.

pub mod cart;
pub mod health;
pub mod metrics;
pub mod orders;

use uuid::Uuid;

use crate::error::ApiError;

/// Parses a path segment into a typed id.
pub(crate) fn parse_id<T: From<Uuid>>(raw: &str) -> Result<T, ApiError> {
    let uuid = Uuid::parse_str(raw)
        .map_err(|e| ApiError::BadRequest(format!("invalid id format: {e}")))?;
    Ok(T::from(uuid))
}
