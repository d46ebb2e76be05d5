//! Cart aggregate and service.

mod aggregate;
mod service;

pub use aggregate::{Cart, CartLine};
pub use service::{CartAddOutcome, CartService};

use common::BookId;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantity below the minimum of one.
    #[error("quantity must be at least 1 (got {quantity})")]
    QuantityTooSmall { quantity: i64 },

    /// Quantity beyond what a cart line can hold.
    #[error("quantity too large (got {quantity})")]
    QuantityTooLarge { quantity: i64 },

    /// The user has no cart yet.
    #[error("no cart found for this user")]
    CartNotFound,

    /// The cart has no line for this book.
    #[error("book {book_id} is not in the cart")]
    LineNotFound { book_id: BookId },
}
