//! A user's own orders.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, UserId};
use doc_store::DocumentStore;
use domain::{Order, OrderStatus, PaymentStatus, ShippingDetails, collections};
use serde::Serialize;

use crate::Result;
use super::{OrderLineDetail, expand_order_lines};

/// One of the user's orders, with lines expanded. The buyer-facing
/// shape carries no status trail and no payment method.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderView {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub books: Vec<OrderLineDetail>,
    pub total_amount: Money,
    pub shipping_cost: Money,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub shipping_details: ShippingDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Loads the orders owned by one user.
#[derive(Clone)]
pub struct CustomerOrdersView<S> {
    store: S,
}

impl<S: DocumentStore> CustomerOrdersView<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The user's orders, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn for_user(&self, user: UserId) -> Result<Vec<CustomerOrderView>> {
        let docs = self
            .store
            .find_by_field(
                collections::ORDERS,
                "owner",
                &serde_json::to_value(user)?,
            )
            .await?;

        let mut views = Vec::with_capacity(docs.len());
        for doc in docs {
            let order: Order = doc.decode()?;
            let books = expand_order_lines(&self.store, &order).await?;
            views.push(CustomerOrderView {
                id: OrderId::from_uuid(doc.id),
                books,
                total_amount: order.total_amount(),
                shipping_cost: order.shipping_cost(),
                status: order.status(),
                payment_status: order.payment_status(),
                shipping_details: order.shipping_details().clone(),
                notes: order.notes().map(str::to_string),
                created_at: order.created_at(),
            });
        }
        Ok(views)
    }
}
