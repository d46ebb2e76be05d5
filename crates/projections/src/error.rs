//! Error types for the read side.

use thiserror::Error;

/// Errors that can occur while building a view.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Underlying document store failure.
    #[error("store error: {0}")]
    Store(#[from] doc_store::StoreError),

    /// A stored document did not match the expected shape.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for view building.
pub type Result<T> = std::result::Result<T, ProjectionError>;
