//! Domain error types.

use doc_store::StoreError;
use thiserror::Error;

use crate::cart::CartError;
use crate::order::OrderError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The document store failed or rejected a write.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A cart operation was invalid.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// An order operation was invalid.
    #[error(transparent)]
    Order(#[from] OrderError),
}

pub type Result<T> = std::result::Result<T, DomainError>;
