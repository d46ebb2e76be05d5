//! Domain layer for the bookstore backend.
//!
//! This crate implements the cart-to-order workflow:
//! - Cart aggregate and [`CartService`] for line mutations
//! - Checkout pricing with catalog price snapshots
//! - Order aggregate with an enforced fulfillment state machine
//! - [`Catalog`] (read-only book lookup) and [`Directory`] (user lookup
//!   and order back-references) collaborators

pub mod cart;
pub(crate) mod cas;
pub mod catalog;
pub mod collections;
pub mod directory;
pub mod error;
pub mod order;

pub use cart::{Cart, CartAddOutcome, CartError, CartLine, CartService};
pub use catalog::{Book, Catalog};
pub use directory::{Directory, User};
pub use error::DomainError;
pub use order::{
    Address, CheckoutInput, ContactUpdate, HistoryEntry, LineRequest, Order, OrderError,
    OrderLine, OrderService, OrderStatus, PaymentMethod, PaymentStatus, PricedCheckout,
    ShippingDetails, SHIPPING_COST,
};
