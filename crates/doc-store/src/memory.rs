use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{Document, DocumentStore, Result, StoreError, Version};

type Collections = HashMap<String, HashMap<Uuid, Document>>;

/// In-memory document store used in tests and as the default backend.
///
/// All mutations take the single write lock, so per-document atomicity
/// holds trivially; version checks still apply so behavior matches the
/// PostgreSQL backend.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }

    /// Removes every document from every collection.
    pub async fn clear(&self) {
        self.collections.write().await.clear();
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<Document> {
        let mut collections = self.collections.write().await;
        let entries = collections.entry(collection.to_string()).or_default();

        if entries.contains_key(&document.id) {
            return Err(StoreError::AlreadyExists {
                collection: collection.to_string(),
                id: document.id,
            });
        }

        entries.insert(document.id, document.clone());
        Ok(document)
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|entries| entries.get(&id))
            .cloned())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let mut documents: Vec<_> = collections
            .get(collection)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default();
        documents.sort_by_key(|d| d.created_at);
        Ok(documents)
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let mut documents: Vec<_> = collections
            .get(collection)
            .map(|entries| {
                entries
                    .values()
                    .filter(|d| d.body.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        documents.sort_by_key(|d| d.created_at);
        Ok(documents)
    }

    async fn replace(
        &self,
        collection: &str,
        id: Uuid,
        expected: Version,
        body: serde_json::Value,
    ) -> Result<Document> {
        let mut collections = self.collections.write().await;
        let entries = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id,
            })?;

        let document = entries.get_mut(&id).ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id,
        })?;

        if document.version != expected {
            return Err(StoreError::VersionConflict {
                collection: collection.to_string(),
                id,
                expected,
                actual: document.version,
            });
        }

        document.version = expected.next();
        document.body = body;
        document.updated_at = Utc::now();
        Ok(document.clone())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .map(|entries| entries.remove(&id).is_some())
            .unwrap_or(false))
    }
}
