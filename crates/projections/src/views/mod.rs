//! View loaders and their wire shapes.

mod admin_orders;
mod cart_contents;
mod customer_orders;
mod order_detail;

pub use admin_orders::{AdminOrderSummary, AdminOrdersView};
pub use cart_contents::{CartContentsView, CartLineView};
pub use customer_orders::{CustomerOrderView, CustomerOrdersView};
pub use order_detail::{OrderDetail, OrderDetailView};

use common::Money;
use doc_store::DocumentStore;
use domain::{Book, Order, collections};
use serde::Serialize;

use crate::Result;

/// One order line expanded with catalog metadata.
///
/// `book_price` is the unit price snapshotted at checkout, not the
/// catalog's current price. Title, image, and description come from the
/// live catalog and are absent when the listing has been removed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDetail {
    pub book: common::BookId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_description: Option<String>,
    pub book_price: Money,
    pub book_quantity: u32,
}

/// Expands an order's lines with catalog metadata.
pub(crate) async fn expand_order_lines<S: DocumentStore>(
    store: &S,
    order: &Order,
) -> Result<Vec<OrderLineDetail>> {
    let mut lines = Vec::with_capacity(order.lines().len());
    for line in order.lines() {
        let listing: Option<Book> = match store
            .get(collections::BOOKS, line.book.as_uuid())
            .await?
        {
            Some(doc) => Some(doc.decode()?),
            None => None,
        };
        lines.push(OrderLineDetail {
            book: line.book,
            book_title: listing.as_ref().map(|b| b.title.clone()),
            book_image: listing.as_ref().and_then(|b| b.cover_image.clone()),
            book_description: listing.map(|b| b.description),
            book_price: line.unit_price,
            book_quantity: line.quantity,
        });
    }
    Ok(lines)
}
