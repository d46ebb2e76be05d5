//! Order service: checkout, lookups, and lifecycle mutations.

use common::{BookId, Money, OrderId, UserId};
use doc_store::{Document, DocumentStore, StoreError};
use serde::Deserialize;

use crate::cas;
use crate::catalog::Catalog;
use crate::collections;
use crate::directory::Directory;
use crate::error::Result;

use super::aggregate::{Address, ContactUpdate, Order, ShippingDetails};
use super::pricing::price_checkout;
use super::status::OrderStatus;
use super::OrderError;

/// One requested order line.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub book: BookId,
    pub quantity: u32,
}

/// Everything a buyer submits at checkout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInput {
    pub books: Vec<LineRequest>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CheckoutInput {
    /// Validates the shipping fields, trimming whitespace. The first
    /// blank field is reported.
    fn shipping_details(&self) -> std::result::Result<ShippingDetails, OrderError> {
        fn required(value: &str, field: &'static str) -> std::result::Result<String, OrderError> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(OrderError::MissingShippingField { field })
            } else {
                Ok(trimmed.to_string())
            }
        }

        Ok(ShippingDetails {
            name: required(&self.name, "name")?,
            email: required(&self.email, "email")?,
            phone: required(&self.phone, "phone")?,
            address: Address {
                street: required(&self.street, "street")?,
                city: required(&self.city, "city")?,
            },
        })
    }
}

/// Service for placing orders and walking them through fulfillment.
#[derive(Clone)]
pub struct OrderService<S> {
    store: S,
    catalog: Catalog<S>,
    directory: Directory<S>,
}

impl<S: DocumentStore + Clone> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self {
            catalog: Catalog::new(store.clone()),
            directory: Directory::new(store.clone()),
            store,
        }
    }

    /// Places an order: validates the request, snapshots catalog prices,
    /// persists the order, and records it on the buyer's history.
    ///
    /// A missing book aborts the whole checkout before anything is
    /// written. The history back-reference is best effort: a failure
    /// there is retried once and then logged, never surfaced.
    #[tracing::instrument(skip(self, input), fields(books = input.books.len()))]
    pub async fn checkout(&self, user: UserId, input: CheckoutInput) -> Result<(OrderId, Order)> {
        if input.books.is_empty() {
            return Err(OrderError::NoBooks.into());
        }
        for line in &input.books {
            if line.quantity < 1 {
                return Err(OrderError::InvalidQuantity {
                    quantity: line.quantity,
                }
                .into());
            }
        }
        let shipping_details = input.shipping_details()?;

        let mut items: Vec<(BookId, u32, Money)> = Vec::with_capacity(input.books.len());
        for line in &input.books {
            let book = self
                .catalog
                .find_book(line.book)
                .await?
                .ok_or(OrderError::BookNotFound { book_id: line.book })?;
            items.push((line.book, line.quantity, book.price));
        }

        let order = Order::place(user, price_checkout(items), shipping_details, input.notes);
        let order_id = OrderId::new();
        self.store
            .insert(
                collections::ORDERS,
                Document::new(order_id.as_uuid(), &order)?,
            )
            .await?;
        metrics::counter!("orders_created").increment(1);

        self.record_on_history(user, order_id).await;

        Ok((order_id, order))
    }

    /// Appends the order to the buyer's history, retrying once. The
    /// order document is authoritative, so a stale back-reference only
    /// degrades the profile view.
    async fn record_on_history(&self, user: UserId, order: OrderId) {
        for attempt in 1..=2 {
            match self.directory.record_order(user, order).await {
                Ok(()) => return,
                Err(error) => {
                    tracing::warn!(
                        %user,
                        %order,
                        attempt,
                        %error,
                        "failed to record order on user history"
                    );
                }
            }
        }
    }

    /// Fetches one order by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order> {
        let doc = self.store.get(collections::ORDERS, id.as_uuid()).await?;
        match doc {
            Some(doc) => Ok(doc.decode()?),
            None => Err(OrderError::OrderNotFound.into()),
        }
    }

    /// All orders owned by one user, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn orders_for_user(&self, user: UserId) -> Result<Vec<(OrderId, Order)>> {
        let docs = self
            .store
            .find_by_field(
                collections::ORDERS,
                "owner",
                &serde_json::to_value(user).map_err(StoreError::Serialization)?,
            )
            .await?;
        docs.into_iter()
            .map(|doc| Ok((OrderId::from_uuid(doc.id), doc.decode()?)))
            .collect()
    }

    /// Every order in the store, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn all_orders(&self) -> Result<Vec<(OrderId, Order)>> {
        let docs = self.store.list(collections::ORDERS).await?;
        docs.into_iter()
            .map(|doc| Ok((OrderId::from_uuid(doc.id), doc.decode()?)))
            .collect()
    }

    /// Moves an order to `next` along the fulfillment graph.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, next: OrderStatus) -> Result<Order> {
        let updated = cas::mutate(
            &self.store,
            collections::ORDERS,
            id.as_uuid(),
            |order: &mut Order| order.transition(next).map_err(Into::into),
        )
        .await?;

        let order = updated.ok_or(OrderError::OrderNotFound)?;
        metrics::counter!("order_status_transitions").increment(1);
        Ok(order)
    }

    /// Applies a buyer correction to an order's phone and address.
    /// Scoped to the owner: someone else's order reads as not found.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_shipping_contact(
        &self,
        user: UserId,
        id: OrderId,
        update: ContactUpdate,
    ) -> Result<Order> {
        let updated = cas::mutate(
            &self.store,
            collections::ORDERS,
            id.as_uuid(),
            |order: &mut Order| {
                if order.owner() != user {
                    return Err(OrderError::OrderNotFound.into());
                }
                order.update_contact(&update);
                Ok(())
            },
        )
        .await?;

        updated.ok_or_else(|| OrderError::OrderNotFound.into())
    }

    /// Removes an order outright.
    #[tracing::instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<()> {
        let deleted = self.store.delete(collections::ORDERS, id.as_uuid()).await?;
        if deleted {
            Ok(())
        } else {
            Err(OrderError::OrderNotFound.into())
        }
    }
}
