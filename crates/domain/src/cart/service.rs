//! Cart service doing the store round-trips for line mutations.

use common::{BookId, UserId};
use doc_store::{Document, DocumentStore, StoreError};

use crate::cas;
use crate::catalog::Catalog;
use crate::collections;
use crate::error::Result;

use super::{Cart, CartError};

/// Result of an add-to-cart request.
#[derive(Debug, Clone)]
pub enum CartAddOutcome {
    /// A cart was created with this book as its first line.
    Created(Cart),

    /// An existing cart gained or incremented a line.
    Updated(Cart),

    /// The book does not exist; nothing was added. This is a documented
    /// soft failure, not an error.
    UnknownBook,
}

impl CartAddOutcome {
    /// The cart after the add, if anything was added.
    pub fn cart(&self) -> Option<&Cart> {
        match self {
            CartAddOutcome::Created(cart) | CartAddOutcome::Updated(cart) => Some(cart),
            CartAddOutcome::UnknownBook => None,
        }
    }
}

/// Service for cart line mutations.
///
/// Cart documents are keyed by the owner's user id, so there is at most
/// one cart per user and concurrent first adds collapse onto the same
/// document.
#[derive(Clone)]
pub struct CartService<S> {
    store: S,
    catalog: Catalog<S>,
}

impl<S: DocumentStore + Clone> CartService<S> {
    pub fn new(store: S) -> Self {
        Self {
            catalog: Catalog::new(store.clone()),
            store,
        }
    }

    /// Adds one copy of a book to the user's cart, creating the cart if
    /// needed. An unknown book yields [`CartAddOutcome::UnknownBook`].
    #[tracing::instrument(skip(self))]
    pub async fn add_line(&self, user: UserId, book_id: BookId) -> Result<CartAddOutcome> {
        if self.catalog.find_book(book_id).await?.is_none() {
            return Ok(CartAddOutcome::UnknownBook);
        }

        loop {
            let updated = cas::mutate(
                &self.store,
                collections::CARTS,
                user.as_uuid(),
                |cart: &mut Cart| {
                    cart.add_book(book_id);
                    Ok(())
                },
            )
            .await?;

            if let Some(cart) = updated {
                metrics::counter!("cart_lines_added").increment(1);
                return Ok(CartAddOutcome::Updated(cart));
            }

            let mut cart = Cart::new(user);
            cart.add_book(book_id);
            let document = Document::new(user.as_uuid(), &cart)?;
            match self.store.insert(collections::CARTS, document).await {
                Ok(_) => {
                    metrics::counter!("cart_lines_added").increment(1);
                    return Ok(CartAddOutcome::Created(cart));
                }
                // Lost the creation race; fall back to updating.
                Err(StoreError::AlreadyExists { .. }) => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Fetches the user's cart, if one exists.
    #[tracing::instrument(skip(self))]
    pub async fn get_cart(&self, user: UserId) -> Result<Option<Cart>> {
        let doc = self.store.get(collections::CARTS, user.as_uuid()).await?;
        match doc {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Sets a line's quantity exactly (replace, not increment).
    #[tracing::instrument(skip(self))]
    pub async fn set_line_quantity(
        &self,
        user: UserId,
        book_id: BookId,
        quantity: i64,
    ) -> Result<Cart> {
        if quantity < 1 {
            return Err(CartError::QuantityTooSmall { quantity }.into());
        }
        let quantity =
            u32::try_from(quantity).map_err(|_| CartError::QuantityTooLarge { quantity })?;

        let updated = cas::mutate(
            &self.store,
            collections::CARTS,
            user.as_uuid(),
            |cart: &mut Cart| cart.set_quantity(book_id, quantity).map_err(Into::into),
        )
        .await?;

        updated.ok_or_else(|| CartError::CartNotFound.into())
    }

    /// Removes a line entirely.
    #[tracing::instrument(skip(self))]
    pub async fn remove_line(&self, user: UserId, book_id: BookId) -> Result<Cart> {
        let updated = cas::mutate(
            &self.store,
            collections::CARTS,
            user.as_uuid(),
            |cart: &mut Cart| cart.remove_book(book_id).map_err(Into::into),
        )
        .await?;

        updated.ok_or_else(|| CartError::CartNotFound.into())
    }

    /// Empties the user's cart; the cart record itself persists.
    #[tracing::instrument(skip(self))]
    pub async fn clear_cart(&self, user: UserId) -> Result<Cart> {
        let updated = cas::mutate(
            &self.store,
            collections::CARTS,
            user.as_uuid(),
            |cart: &mut Cart| {
                cart.clear();
                Ok(())
            },
        )
        .await?;

        updated.ok_or_else(|| CartError::CartNotFound.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Book;
    use crate::error::DomainError;
    use common::Money;
    use doc_store::InMemoryStore;

    async fn seed_book(store: &InMemoryStore, price: Money) -> BookId {
        let id = BookId::new();
        let book = Book {
            title: "Test Book".into(),
            author: "Author".into(),
            description: "Description".into(),
            genre: "Fiction".into(),
            publication_year: 2020,
            isbn: id.to_string(),
            availability: true,
            price,
            cover_image: None,
        };
        store
            .insert(
                collections::BOOKS,
                Document::new(id.as_uuid(), &book).unwrap(),
            )
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn add_line_creates_cart_on_first_add() {
        let store = InMemoryStore::new();
        let book = seed_book(&store, Money::from_units(20)).await;
        let service = CartService::new(store);
        let user = UserId::new();

        let outcome = service.add_line(user, book).await.unwrap();

        assert!(matches!(outcome, CartAddOutcome::Created(_)));
        let cart = service.get_cart(user).await.unwrap().unwrap();
        assert_eq!(cart.line(book).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn add_line_twice_increments_single_line() {
        let store = InMemoryStore::new();
        let book = seed_book(&store, Money::from_units(20)).await;
        let service = CartService::new(store);
        let user = UserId::new();

        service.add_line(user, book).await.unwrap();
        let outcome = service.add_line(user, book).await.unwrap();

        assert!(matches!(outcome, CartAddOutcome::Updated(_)));
        let cart = outcome.cart().unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(book).unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn add_line_unknown_book_is_a_soft_failure() {
        let store = InMemoryStore::new();
        let service = CartService::new(store.clone());
        let user = UserId::new();

        let outcome = service.add_line(user, BookId::new()).await.unwrap();

        assert!(matches!(outcome, CartAddOutcome::UnknownBook));
        assert!(service.get_cart(user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_line_quantity_replaces_value() {
        let store = InMemoryStore::new();
        let book = seed_book(&store, Money::from_units(20)).await;
        let service = CartService::new(store);
        let user = UserId::new();
        service.add_line(user, book).await.unwrap();

        let cart = service.set_line_quantity(user, book, 4).await.unwrap();

        assert_eq!(cart.line(book).unwrap().quantity, 4);
    }

    #[tokio::test]
    async fn set_line_quantity_rejects_zero_and_negative() {
        let store = InMemoryStore::new();
        let book = seed_book(&store, Money::from_units(20)).await;
        let service = CartService::new(store);
        let user = UserId::new();
        service.add_line(user, book).await.unwrap();

        for quantity in [0, -3] {
            let result = service.set_line_quantity(user, book, quantity).await;
            assert!(matches!(
                result,
                Err(DomainError::Cart(CartError::QuantityTooSmall { .. }))
            ));
        }

        // Line unchanged after the rejections.
        let cart = service.get_cart(user).await.unwrap().unwrap();
        assert_eq!(cart.line(book).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn set_line_quantity_rejects_values_beyond_u32() {
        let store = InMemoryStore::new();
        let book = seed_book(&store, Money::from_units(20)).await;
        let service = CartService::new(store);
        let user = UserId::new();
        service.add_line(user, book).await.unwrap();

        // Would wrap to 5 under a plain cast.
        let result = service
            .set_line_quantity(user, book, (1i64 << 32) + 5)
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Cart(CartError::QuantityTooLarge { .. }))
        ));
        let cart = service.get_cart(user).await.unwrap().unwrap();
        assert_eq!(cart.line(book).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn set_line_quantity_without_cart_is_not_found() {
        let store = InMemoryStore::new();
        let book = seed_book(&store, Money::from_units(20)).await;
        let service = CartService::new(store);

        let result = service.set_line_quantity(UserId::new(), book, 2).await;

        assert!(matches!(
            result,
            Err(DomainError::Cart(CartError::CartNotFound))
        ));
    }

    #[tokio::test]
    async fn remove_line_missing_book_is_not_found_and_cart_unchanged() {
        let store = InMemoryStore::new();
        let book = seed_book(&store, Money::from_units(20)).await;
        let service = CartService::new(store);
        let user = UserId::new();
        service.add_line(user, book).await.unwrap();

        let result = service.remove_line(user, BookId::new()).await;

        assert!(matches!(
            result,
            Err(DomainError::Cart(CartError::LineNotFound { .. }))
        ));
        let cart = service.get_cart(user).await.unwrap().unwrap();
        assert_eq!(cart.lines().len(), 1);
    }

    #[tokio::test]
    async fn clear_cart_empties_but_keeps_record() {
        let store = InMemoryStore::new();
        let book = seed_book(&store, Money::from_units(20)).await;
        let service = CartService::new(store);
        let user = UserId::new();
        service.add_line(user, book).await.unwrap();

        let cart = service.clear_cart(user).await.unwrap();

        assert!(cart.is_empty());
        let stored = service.get_cart(user).await.unwrap().unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn clear_cart_without_cart_is_not_found() {
        let store = InMemoryStore::new();
        let service = CartService::new(store);

        let result = service.clear_cart(UserId::new()).await;

        assert!(matches!(
            result,
            Err(DomainError::Cart(CartError::CartNotFound))
        ));
    }

    #[tokio::test]
    async fn concurrent_adds_both_land() {
        let store = InMemoryStore::new();
        let book = seed_book(&store, Money::from_units(20)).await;
        let service = CartService::new(store);
        let user = UserId::new();
        service.add_line(user, book).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..3 {
            let service = service.clone();
            handles.push(tokio::spawn(
                async move { service.add_line(user, book).await },
            ));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let cart = service.get_cart(user).await.unwrap().unwrap();
        assert_eq!(cart.line(book).unwrap().quantity, 4);
    }
}
