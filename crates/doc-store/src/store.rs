use async_trait::async_trait;
use uuid::Uuid;

use crate::{Document, Result, Version};

/// Versioned document storage grouped into named collections.
///
/// Implementations must make `insert` and `replace` atomic per document:
/// two concurrent replaces against the same document may not interleave,
/// one of them fails with [`StoreError::VersionConflict`] and is expected
/// to re-read and retry.
///
/// [`StoreError::VersionConflict`]: crate::StoreError::VersionConflict
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Inserts a new document. Fails with `AlreadyExists` if the id is
    /// taken in this collection.
    async fn insert(&self, collection: &str, document: Document) -> Result<Document>;

    /// Fetches a document by id.
    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>>;

    /// Lists every document in a collection, oldest first.
    async fn list(&self, collection: &str) -> Result<Vec<Document>>;

    /// Finds documents whose top-level body `field` equals `value`.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<Document>>;

    /// Replaces a document body if its stored version still equals
    /// `expected`. Returns the document at `expected.next()` on success,
    /// `VersionConflict` if another writer got there first, `NotFound`
    /// if the document is gone.
    async fn replace(
        &self,
        collection: &str,
        id: Uuid,
        expected: Version,
        body: serde_json::Value,
    ) -> Result<Document>;

    /// Deletes a document. Returns whether anything was removed.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool>;
}
