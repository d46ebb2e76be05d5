//! Read-only catalog lookup.
//!
//! The catalog is owned by the book CRUD subsystem; this core only reads
//! prices and display fields from it.

use common::{BookId, Money};
use doc_store::DocumentStore;
use serde::{Deserialize, Serialize};

use crate::collections;
use crate::error::Result;

/// A catalog book as this core sees it.
///
/// Stored book documents may carry further fields (borrowing state,
/// approval status); unknown fields are ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub publication_year: i32,
    pub isbn: String,
    #[serde(default = "default_availability")]
    pub availability: bool,
    #[serde(default)]
    pub price: Money,
    #[serde(default)]
    pub cover_image: Option<String>,
}

fn default_availability() -> bool {
    true
}

/// Price and existence source for the checkout path.
#[derive(Clone)]
pub struct Catalog<S> {
    store: S,
}

impl<S: DocumentStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Looks a book up by id. Absence is not an error here; callers
    /// decide whether a missing book is fatal.
    pub async fn find_book(&self, id: BookId) -> Result<Option<Book>> {
        let doc = self.store.get(collections::BOOKS, id.as_uuid()).await?;
        match doc {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }
}
