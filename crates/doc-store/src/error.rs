use thiserror::Error;
use uuid::Uuid;

use crate::Version;

/// Errors produced by document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document with this id already exists in the collection.
    #[error("document already exists: {collection}/{id}")]
    AlreadyExists { collection: String, id: Uuid },

    /// The document was modified since it was read.
    #[error(
        "version conflict on {collection}/{id}: expected {expected}, found {actual}"
    )]
    VersionConflict {
        collection: String,
        id: Uuid,
        expected: Version,
        actual: Version,
    },

    /// The document does not exist.
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: Uuid },

    /// A document body could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying database failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
