//! Read-modify-write helper over the document store.

use doc_store::{DocumentStore, StoreError};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::error::Result;

pub(crate) const MAX_CAS_RETRIES: usize = 3;

/// Runs one atomic read-modify-write cycle against a document, retrying
/// a bounded number of times when a concurrent writer wins the version
/// race.
///
/// Returns `Ok(None)` when the document does not exist (also when it is
/// deleted between the read and the write). An error from `apply`
/// aborts without writing anything.
pub(crate) async fn mutate<S, T, F>(
    store: &S,
    collection: &'static str,
    id: Uuid,
    mut apply: F,
) -> Result<Option<T>>
where
    S: DocumentStore,
    T: Serialize + DeserializeOwned,
    F: FnMut(&mut T) -> Result<()>,
{
    let mut attempts = 0;
    loop {
        let Some(doc) = store.get(collection, id).await? else {
            return Ok(None);
        };

        let mut entity: T = doc.decode()?;
        apply(&mut entity)?;
        let body = serde_json::to_value(&entity).map_err(StoreError::Serialization)?;

        match store.replace(collection, id, doc.version, body).await {
            Ok(_) => return Ok(Some(entity)),
            Err(e @ StoreError::VersionConflict { .. }) => {
                attempts += 1;
                if attempts >= MAX_CAS_RETRIES {
                    return Err(e.into());
                }
                tracing::debug!(collection, %id, "version conflict, retrying");
            }
            Err(StoreError::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e.into()),
        }
    }
}
