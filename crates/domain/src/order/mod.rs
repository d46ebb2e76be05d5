//! Order aggregate, pricing, state machine, and service.

mod aggregate;
mod pricing;
mod service;
mod status;

pub use aggregate::{Address, ContactUpdate, HistoryEntry, Order, OrderLine, ShippingDetails};
pub use pricing::{PricedCheckout, SHIPPING_COST, price_checkout};
pub use service::{CheckoutInput, LineRequest, OrderService};
pub use status::{OrderStatus, PaymentMethod, PaymentStatus};

use common::BookId;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Checkout without any book lines.
    #[error("at least one book is required")]
    NoBooks,

    /// A required shipping field is blank after trimming.
    #[error("complete shipping details are required ({field} is blank)")]
    MissingShippingField { field: &'static str },

    /// A requested line quantity is below the minimum of one.
    #[error("quantity must be at least 1 (got {quantity})")]
    InvalidQuantity { quantity: u32 },

    /// A requested book does not exist in the catalog.
    #[error("book {book_id} not found")]
    BookNotFound { book_id: BookId },

    /// No order with the requested id (or not owned by the requester).
    #[error("order not found")]
    OrderNotFound,

    /// The requested status change violates the fulfillment graph.
    #[error("cannot move a {from} order to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}
