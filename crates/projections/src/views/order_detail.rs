//! Single-order detail, with book and buyer context.

use chrono::{DateTime, Utc};
use common::{Money, OrderId};
use doc_store::DocumentStore;
use domain::{Order, OrderStatus, PaymentStatus, User, collections};
use serde::Serialize;

use crate::Result;
use super::{OrderLineDetail, expand_order_lines};

/// Everything the order detail screen shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub books: Vec<OrderLineDetail>,
    /// The buyer's avatar, when their profile still exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `"{city} {street}"` on one line.
    pub address: String,
    pub total_amount: Money,
    pub shipping_cost: Money,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Loads one order's detail view.
#[derive(Clone)]
pub struct OrderDetailView<S> {
    store: S,
}

impl<S: DocumentStore> OrderDetailView<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The detail view for one order, or `None` if it does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self, id: OrderId) -> Result<Option<OrderDetail>> {
        let Some(doc) = self.store.get(collections::ORDERS, id.as_uuid()).await? else {
            return Ok(None);
        };
        let order: Order = doc.decode()?;

        let books = expand_order_lines(&self.store, &order).await?;
        let buyer: Option<User> = match self
            .store
            .get(collections::USERS, order.owner().as_uuid())
            .await?
        {
            Some(doc) => Some(doc.decode()?),
            None => None,
        };

        let details = order.shipping_details();
        Ok(Some(OrderDetail {
            id,
            books,
            image_url: buyer.map(|u| u.avatar),
            name: details.name.clone(),
            email: details.email.clone(),
            phone: details.phone.clone(),
            address: format!("{} {}", details.address.city, details.address.street),
            total_amount: order.total_amount(),
            shipping_cost: order.shipping_cost(),
            payment_status: order.payment_status(),
            status: order.status(),
            notes: order.notes().map(str::to_string),
            created_at: order.created_at(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{BookId, UserId};
    use doc_store::{Document, InMemoryStore};
    use domain::{Book, CheckoutInput, LineRequest, OrderService};

    async fn seed_book(store: &InMemoryStore, title: &str, price: Money) -> BookId {
        let id = BookId::new();
        let book = Book {
            title: title.into(),
            author: "Iris Vane".into(),
            description: format!("{title}, a novel"),
            genre: "Fiction".into(),
            publication_year: 2019,
            isbn: id.to_string(),
            availability: true,
            price,
            cover_image: Some(format!("https://cdn.example/covers/{title}.png")),
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

    async fn seed_user(store: &InMemoryStore) -> UserId {
        let id = UserId::new();
        let user = User {
            username: "mara".into(),
            email: "mara@example.com".into(),
            avatar: "https://cdn.example/avatars/mara.png".into(),
            role: "member".into(),
            order_history: Vec::new(),
        };
        store
            .insert(
                collections::USERS,
                Document::new(id.as_uuid(), &user).unwrap(),
            )
            .await
            .unwrap();
        id
    }

    fn input(books: Vec<LineRequest>) -> CheckoutInput {
        CheckoutInput {
            books,
            name: "Mara Holt".into(),
            email: "mara@example.com".into(),
            phone: "555-0100".into(),
            street: "12 Elm St".into(),
            city: "Springfield".into(),
            notes: Some("ring twice".into()),
        }
    }

    #[tokio::test]
    async fn detail_combines_order_book_and_buyer() {
        let store = InMemoryStore::new();
        let book = seed_book(&store, "Night Train", Money::from_units(50)).await;
        let user = seed_user(&store).await;
        let orders = OrderService::new(store.clone());
        let (order_id, _) = orders
            .checkout(user, input(vec![LineRequest { book, quantity: 2 }]))
            .await
            .unwrap();

        let detail = OrderDetailView::new(store)
            .load(order_id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(detail.address, "Springfield 12 Elm St");
        assert_eq!(
            detail.image_url.as_deref(),
            Some("https://cdn.example/avatars/mara.png")
        );
        assert_eq!(detail.books.len(), 1);
        assert_eq!(detail.books[0].book_title.as_deref(), Some("Night Train"));
        assert_eq!(detail.books[0].book_price, Money::from_units(50));
        assert_eq!(detail.books[0].book_quantity, 2);
        assert_eq!(detail.total_amount, Money::from_units(200));
        assert_eq!(detail.notes.as_deref(), Some("ring twice"));

        let value = serde_json::to_value(&detail).unwrap();
        assert!(value.get("orderHistory").is_none());
        assert_eq!(value["imageUrl"], "https://cdn.example/avatars/mara.png");
    }

    #[tokio::test]
    async fn delisted_book_keeps_the_snapshot_price() {
        let store = InMemoryStore::new();
        let book = seed_book(&store, "Gone Soon", Money::from_units(25)).await;
        let user = seed_user(&store).await;
        let orders = OrderService::new(store.clone());
        let (order_id, _) = orders
            .checkout(user, input(vec![LineRequest { book, quantity: 1 }]))
            .await
            .unwrap();

        store
            .delete(collections::BOOKS, book.as_uuid())
            .await
            .unwrap();

        let detail = OrderDetailView::new(store)
            .load(order_id)
            .await
            .unwrap()
            .unwrap();
        assert!(detail.books[0].book_title.is_none());
        assert_eq!(detail.books[0].book_price, Money::from_units(25));
    }

    #[tokio::test]
    async fn unknown_order_is_none() {
        let detail = OrderDetailView::new(InMemoryStore::new())
            .load(OrderId::new())
            .await
            .unwrap();
        assert!(detail.is_none());
    }
}
