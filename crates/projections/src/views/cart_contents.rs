//! Cart contents view: the user's cart with each line expanded from the
//! catalog.

use common::{BookId, Money, UserId};
use doc_store::DocumentStore;
use domain::{Book, Cart, collections};
use serde::Serialize;

use crate::Result;

/// One cart line with the catalog fields the cart screen shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub book: BookId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub description: String,
    pub price: Money,
    pub quantity: u32,
}

/// Loads a user's cart with lines expanded.
#[derive(Clone)]
pub struct CartContentsView<S> {
    store: S,
}

impl<S: DocumentStore> CartContentsView<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The user's cart lines with catalog metadata. Lines whose book
    /// has been delisted are dropped from the view; a missing cart
    /// reads as empty.
    #[tracing::instrument(skip(self))]
    pub async fn for_user(&self, user: UserId) -> Result<Vec<CartLineView>> {
        let Some(doc) = self.store.get(collections::CARTS, user.as_uuid()).await? else {
            return Ok(Vec::new());
        };
        let cart: Cart = doc.decode()?;

        let mut lines = Vec::with_capacity(cart.lines().len());
        for line in cart.lines() {
            let Some(book_doc) = self
                .store
                .get(collections::BOOKS, line.book.as_uuid())
                .await?
            else {
                continue;
            };
            let book: Book = book_doc.decode()?;
            lines.push(CartLineView {
                book: line.book,
                title: book.title,
                cover_image: book.cover_image,
                description: book.description,
                price: book.price,
                quantity: line.quantity,
            });
        }
        Ok(lines)
    }
}
