//! Back-office order list.

use chrono::{DateTime, Utc};
use common::{Money, OrderId};
use doc_store::DocumentStore;
use domain::{Order, OrderStatus, PaymentStatus, collections};
use serde::Serialize;

use crate::Result;

/// One row of the back-office order list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderSummary {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub name: String,
    /// `[city, street]`, the order the admin screen renders them in.
    pub address: [String; 2],
    pub date: DateTime<Utc>,
    pub total_price: Money,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
}

/// Loads the full order list for back-office screens.
#[derive(Clone)]
pub struct AdminOrdersView<S> {
    store: S,
}

impl<S: DocumentStore> AdminOrdersView<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Every order, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<AdminOrderSummary>> {
        let docs = self.store.list(collections::ORDERS).await?;
        let mut rows = Vec::with_capacity(docs.len());
        for doc in docs {
            let order: Order = doc.decode()?;
            let details = order.shipping_details();
            rows.push(AdminOrderSummary {
                id: OrderId::from_uuid(doc.id),
                name: details.name.clone(),
                address: [details.address.city.clone(), details.address.street.clone()],
                date: order.created_at(),
                total_price: order.total_amount(),
                payment_status: order.payment_status(),
                status: order.status(),
            });
        }
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }
}
